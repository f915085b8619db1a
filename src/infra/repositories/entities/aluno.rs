//! Student database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Aluno;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alunos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub data_nasc: Date,
    #[sea_orm(unique)]
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub sexo: String,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub nome_responsavel: Option<String>,
    pub cpf_responsavel: Option<String>,
    pub telefone_responsavel: Option<String>,
    pub email_responsavel: Option<String>,
    pub parentesco: Option<String>,
    pub turma: Option<String>,
    pub serie: Option<String>,
    pub escola: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub restricao_alimentar: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub medicamentos: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub observacoes_medicas: Option<String>,
    pub ativo: bool,
    pub data_matricula: Date,
    #[sea_orm(unique)]
    pub numero_matricula: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub foto: Option<String>,
    pub documentos: Json,
    pub usuario_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioId",
        to = "super::usuario::Column::Id"
    )]
    Usuario,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Aluno {
    fn from(model: Model) -> Self {
        Aluno {
            id: model.id,
            nome: model.nome,
            data_nasc: model.data_nasc,
            cpf: model.cpf,
            rg: model.rg,
            sexo: model.sexo.parse().unwrap_or_default(),
            telefone: model.telefone,
            email: model.email,
            endereco: model.endereco,
            numero: model.numero,
            complemento: model.complemento,
            bairro: model.bairro,
            cidade: model.cidade,
            estado: model.estado,
            cep: model.cep,
            nome_responsavel: model.nome_responsavel,
            cpf_responsavel: model.cpf_responsavel,
            telefone_responsavel: model.telefone_responsavel,
            email_responsavel: model.email_responsavel,
            parentesco: model.parentesco,
            turma: model.turma,
            serie: model.serie,
            escola: model.escola,
            restricao_alimentar: model.restricao_alimentar,
            medicamentos: model.medicamentos,
            observacoes_medicas: model.observacoes_medicas,
            ativo: model.ativo,
            data_matricula: model.data_matricula,
            numero_matricula: model.numero_matricula,
            foto: model.foto,
            documentos: model.documentos,
            usuario_id: model.usuario_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
