//! Professor database entity (soft delete via `deleted_at`).

use sea_orm::entity::prelude::*;

use crate::domain::Professor;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "professores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    #[sea_orm(unique)]
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub data_nasc: Date,
    pub sexo: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub formacao: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub especializacao: Option<String>,
    pub experiencia_anos: Option<i32>,
    pub registro_profissional: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub salario: Option<f64>,
    pub data_admissao: Date,
    pub data_demissao: Option<Date>,
    pub status: String,
    pub carga_horaria_semanal: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub observacoes: Option<String>,
    pub foto_url: Option<String>,
    pub usuario_id: i32,
    pub ativo: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = visible)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioId",
        to = "super::usuario::Column::Id"
    )]
    Usuario,
    #[sea_orm(has_many = "super::curso::Entity")]
    Curso,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::curso::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Curso.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Professor {
    fn from(model: Model) -> Self {
        Professor {
            id: model.id,
            nome: model.nome,
            cpf: model.cpf,
            rg: model.rg,
            data_nasc: model.data_nasc,
            sexo: model.sexo.parse().unwrap_or_default(),
            email: model.email,
            telefone: model.telefone,
            endereco: model.endereco,
            numero: model.numero,
            complemento: model.complemento,
            bairro: model.bairro,
            cidade: model.cidade,
            estado: model.estado,
            cep: model.cep,
            formacao: model.formacao,
            especializacao: model.especializacao,
            experiencia_anos: model.experiencia_anos,
            registro_profissional: model.registro_profissional,
            salario: model.salario,
            data_admissao: model.data_admissao,
            data_demissao: model.data_demissao,
            status: model.status.parse().unwrap_or_default(),
            carga_horaria_semanal: model.carga_horaria_semanal,
            observacoes: model.observacoes,
            foto_url: model.foto_url,
            usuario_id: model.usuario_id,
            ativo: model.ativo,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
