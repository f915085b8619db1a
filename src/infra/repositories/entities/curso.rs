//! Course database entity (soft delete via `deleted_at`).

use sea_orm::entity::prelude::*;

use crate::domain::{Curso, DiaSemana};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cursos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    #[sea_orm(unique)]
    pub codigo: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descricao: Option<String>,
    pub categoria: String,
    pub nivel: String,
    pub carga_horaria_total: i32,
    pub duracao_meses: i32,
    pub idade_minima: Option<i32>,
    pub idade_maxima: Option<i32>,
    pub vagas_disponiveis: i32,
    pub vagas_ocupadas: i32,
    pub data_inicio: Date,
    pub data_fim: Date,
    pub horario_inicio: Time,
    pub horario_fim: Time,
    /// JSON array of weekday names
    pub dias_semana: Json,
    pub local: String,
    pub sala: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub material_necessario: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub pre_requisitos: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub objetivos: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub metodologia: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub avaliacao: Option<String>,
    pub certificado: bool,
    #[sea_orm(column_type = "Double")]
    pub valor_curso: f64,
    pub gratuito: bool,
    pub status: String,
    pub professor_id: i32,
    pub usuario_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub observacoes: Option<String>,
    pub foto_url: Option<String>,
    pub ativo: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id"
    )]
    Professor,
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Unknown weekday strings are dropped.
pub fn dias_from_json(value: &Json) -> Vec<DiaSemana> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .filter_map(|s| s.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

pub fn dias_to_json(dias: &[DiaSemana]) -> Json {
    Json::Array(
        dias.iter()
            .map(|d| Json::String(d.as_str().to_string()))
            .collect(),
    )
}

impl From<Model> for Curso {
    fn from(model: Model) -> Self {
        let dias_semana = dias_from_json(&model.dias_semana);
        Curso {
            id: model.id,
            nome: model.nome,
            codigo: model.codigo,
            descricao: model.descricao,
            categoria: model.categoria.parse().unwrap_or_default(),
            nivel: model.nivel.parse().unwrap_or_default(),
            carga_horaria_total: model.carga_horaria_total,
            duracao_meses: model.duracao_meses,
            idade_minima: model.idade_minima,
            idade_maxima: model.idade_maxima,
            vagas_disponiveis: model.vagas_disponiveis,
            vagas_ocupadas: model.vagas_ocupadas,
            data_inicio: model.data_inicio,
            data_fim: model.data_fim,
            horario_inicio: model.horario_inicio,
            horario_fim: model.horario_fim,
            dias_semana,
            local: model.local,
            sala: model.sala,
            material_necessario: model.material_necessario,
            pre_requisitos: model.pre_requisitos,
            objetivos: model.objetivos,
            metodologia: model.metodologia,
            avaliacao: model.avaliacao,
            certificado: model.certificado,
            valor_curso: model.valor_curso,
            gratuito: model.gratuito,
            status: model.status.parse().unwrap_or_default(),
            professor_id: model.professor_id,
            usuario_id: model.usuario_id,
            observacoes: model.observacoes,
            foto_url: model.foto_url,
            ativo: model.ativo,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
