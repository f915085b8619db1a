//! Course (curso) entity, form and cross-field checks.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{clean, Normalize};
use crate::errors::{AppError, AppResult, FieldError};
use crate::utils::serde_ext::flexible_bool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Categoria {
    Informatica,
    Artesanato,
    Culinaria,
    Idiomas,
    Musica,
    Esportes,
    ReforcoEscolar,
    Profissionalizante,
    #[default]
    Outros,
}

impl_string_enum!(Categoria {
    Informatica => "informatica",
    Artesanato => "artesanato",
    Culinaria => "culinaria",
    Idiomas => "idiomas",
    Musica => "musica",
    Esportes => "esportes",
    ReforcoEscolar => "reforco_escolar",
    Profissionalizante => "profissionalizante",
    Outros => "outros",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Nivel {
    #[default]
    Iniciante,
    Intermediario,
    Avancado,
}

impl_string_enum!(Nivel {
    Iniciante => "iniciante",
    Intermediario => "intermediario",
    Avancado => "avancado",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CursoStatus {
    #[default]
    Planejado,
    InscricoesAbertas,
    EmAndamento,
    Concluido,
    Cancelado,
    Suspenso,
}

impl_string_enum!(CursoStatus {
    Planejado => "planejado",
    InscricoesAbertas => "inscricoes_abertas",
    EmAndamento => "em_andamento",
    Concluido => "concluido",
    Cancelado => "cancelado",
    Suspenso => "suspenso",
});

/// Ordered Monday first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DiaSemana {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
    Domingo,
}

impl_string_enum!(DiaSemana {
    Segunda => "segunda",
    Terca => "terca",
    Quarta => "quarta",
    Quinta => "quinta",
    Sexta => "sexta",
    Sabado => "sabado",
    Domingo => "domingo",
});

/// Course domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Curso {
    pub id: i32,
    pub nome: String,
    pub codigo: String,
    pub descricao: Option<String>,
    pub categoria: Categoria,
    pub nivel: Nivel,
    pub carga_horaria_total: i32,
    pub duracao_meses: i32,
    pub idade_minima: Option<i32>,
    pub idade_maxima: Option<i32>,
    pub vagas_disponiveis: i32,
    pub vagas_ocupadas: i32,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    #[schema(value_type = String, example = "08:00:00")]
    pub horario_inicio: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub horario_fim: NaiveTime,
    pub dias_semana: Vec<DiaSemana>,
    pub local: String,
    pub sala: Option<String>,
    pub material_necessario: Option<String>,
    pub pre_requisitos: Option<String>,
    pub objetivos: Option<String>,
    pub metodologia: Option<String>,
    pub avaliacao: Option<String>,
    pub certificado: bool,
    pub valor_curso: f64,
    pub gratuito: bool,
    pub status: CursoStatus,
    pub professor_id: i32,
    pub usuario_id: i32,
    pub observacoes: Option<String>,
    pub foto_url: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Curso {
    pub fn vagas_restantes(&self) -> i32 {
        (self.vagas_disponiveis - self.vagas_ocupadas).max(0)
    }
}

/// Course create/update form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CursoForm {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"))]
    #[schema(example = "Informática Básica")]
    pub nome: String,
    #[validate(length(min = 2, max = 20, message = "Código deve ter entre 2 e 20 caracteres"))]
    #[schema(example = "INF-01")]
    pub codigo: String,
    #[validate(length(max = 2000, message = "Descrição deve ter no máximo 2000 caracteres"))]
    pub descricao: Option<String>,
    pub categoria: Option<Categoria>,
    pub nivel: Option<Nivel>,
    #[validate(range(min = 1, max = 2000, message = "Carga horária total deve estar entre 1 e 2000 horas"))]
    pub carga_horaria_total: i32,
    #[validate(range(min = 1, max = 24, message = "Duração deve estar entre 1 e 24 meses"))]
    pub duracao_meses: i32,
    #[validate(range(min = 5, max = 100, message = "Idade mínima deve estar entre 5 e 100 anos"))]
    pub idade_minima: Option<i32>,
    #[validate(range(min = 5, max = 100, message = "Idade máxima deve estar entre 5 e 100 anos"))]
    pub idade_maxima: Option<i32>,
    #[validate(range(min = 1, max = 100, message = "Vagas disponíveis devem estar entre 1 e 100"))]
    pub vagas_disponiveis: i32,
    #[validate(range(min = 0, message = "Vagas ocupadas não podem ser negativas"))]
    pub vagas_ocupadas: Option<i32>,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    #[schema(value_type = String, example = "08:00:00")]
    pub horario_inicio: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub horario_fim: NaiveTime,
    #[validate(length(min = 1, message = "Informe ao menos um dia da semana"))]
    pub dias_semana: Vec<DiaSemana>,
    #[validate(length(min = 1, max = 200, message = "Local é obrigatório"))]
    pub local: String,
    #[validate(length(max = 50, message = "Sala deve ter no máximo 50 caracteres"))]
    pub sala: Option<String>,
    pub material_necessario: Option<String>,
    pub pre_requisitos: Option<String>,
    pub objetivos: Option<String>,
    pub metodologia: Option<String>,
    pub avaliacao: Option<String>,
    pub certificado: Option<bool>,
    #[validate(range(min = 0.0, message = "Valor do curso não pode ser negativo"))]
    pub valor_curso: Option<f64>,
    pub gratuito: Option<bool>,
    pub status: Option<CursoStatus>,
    pub professor_id: i32,
    pub observacoes: Option<String>,
    #[validate(url(message = "URL da foto inválida"))]
    pub foto_url: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    #[schema(value_type = Option<bool>)]
    pub ativo: Option<bool>,
}

/// Trim text, upper-case the course code and keep each weekday once, in
/// week order.
impl Normalize for CursoForm {
    fn normalized(self) -> Self {
        let mut dias = self.dias_semana;
        dias.sort();
        dias.dedup();
        Self {
            nome: self.nome.trim().to_string(),
            codigo: self.codigo.trim().to_uppercase(),
            descricao: clean(self.descricao),
            local: self.local.trim().to_string(),
            sala: clean(self.sala),
            material_necessario: clean(self.material_necessario),
            pre_requisitos: clean(self.pre_requisitos),
            objetivos: clean(self.objetivos),
            metodologia: clean(self.metodologia),
            avaliacao: clean(self.avaliacao),
            observacoes: clean(self.observacoes),
            foto_url: clean(self.foto_url),
            dias_semana: dias,
            ..self
        }
    }
}

impl CursoForm {
    /// Checks that span several fields. Every violation is reported.
    pub fn check_consistency(&self) -> AppResult<()> {
        let mut errors = Vec::new();

        if self.data_fim <= self.data_inicio {
            errors.push(FieldError::new(
                "data_fim",
                "Data de fim deve ser posterior à data de início",
            ));
        }
        if self.horario_fim <= self.horario_inicio {
            errors.push(FieldError::new(
                "horario_fim",
                "Horário de fim deve ser posterior ao horário de início",
            ));
        }
        if let (Some(min), Some(max)) = (self.idade_minima, self.idade_maxima) {
            if max < min {
                errors.push(FieldError::new(
                    "idade_maxima",
                    "Idade máxima deve ser maior ou igual à idade mínima",
                ));
            }
        }
        if self.vagas_ocupadas.unwrap_or(0) > self.vagas_disponiveis {
            errors.push(FieldError::new(
                "vagas_ocupadas",
                "Vagas ocupadas não podem exceder as vagas disponíveis",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(errors))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CursoFilter {
    pub search: Option<String>,
    pub categoria: Option<Categoria>,
    pub status: Option<CursoStatus>,
    pub professor_id: Option<i32>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CursoListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring of nome, codigo or descricao
    pub search: Option<String>,
    pub categoria: Option<String>,
    pub status: Option<String>,
    pub professor_id: Option<i32>,
    pub ativo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CursoForm {
        serde_json::from_value(serde_json::json!({
            "nome": " Informática Básica ",
            "codigo": " inf-01 ",
            "carga_horaria_total": 40,
            "duracao_meses": 2,
            "vagas_disponiveis": 20,
            "data_inicio": "2026-03-01",
            "data_fim": "2026-05-01",
            "horario_inicio": "08:00:00",
            "horario_fim": "10:00:00",
            "dias_semana": ["segunda", "quarta"],
            "local": "Sala de informática",
            "professor_id": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_form() {
        let f = form();
        assert!(f.validate().is_ok());
        assert!(f.check_consistency().is_ok());
    }

    #[test]
    fn test_normalized_code() {
        let f = form().normalized();
        assert_eq!(f.codigo, "INF-01");
        assert_eq!(f.nome, "Informática Básica");
    }

    #[test]
    fn test_normalized_days_unique_in_week_order() {
        let mut f = form();
        f.dias_semana = vec![DiaSemana::Sexta, DiaSemana::Segunda, DiaSemana::Quarta, DiaSemana::Segunda];
        let f = f.normalized();
        assert_eq!(
            f.dias_semana,
            vec![DiaSemana::Segunda, DiaSemana::Quarta, DiaSemana::Sexta]
        );
    }

    #[test]
    fn test_end_date_must_follow_start() {
        let mut f = form();
        f.data_fim = f.data_inicio;
        let err = f.check_consistency().unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(ref e) if e[0].field == "data_fim"));
    }

    #[test]
    fn test_all_cross_field_violations_reported() {
        let mut f = form();
        f.horario_fim = f.horario_inicio;
        f.idade_minima = Some(15);
        f.idade_maxima = Some(10);
        f.vagas_ocupadas = Some(25);
        match f.check_consistency() {
            Err(AppError::InvalidFields(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["horario_fim", "idade_maxima", "vagas_ocupadas"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_days_rejected() {
        let mut f = form();
        f.dias_semana.clear();
        assert!(f.validate().unwrap_err().field_errors().contains_key("dias_semana"));
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(Categoria::ReforcoEscolar.as_str(), "reforco_escolar");
        assert_eq!(
            serde_json::to_string(&CursoStatus::InscricoesAbertas).unwrap(),
            "\"inscricoes_abertas\""
        );
        assert_eq!("terca".parse::<DiaSemana>(), Ok(DiaSemana::Terca));
    }
}
