//! Professor (professor) entity, form and statistics types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{clean, Normalize, Sexo};
use crate::utils::documents::{
    format_cep, format_cpf, validate_cep, validate_cpf, validate_formatted_phone, validate_uf,
};
use crate::utils::serde_ext::flexible_bool;

/// Employment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfessorStatus {
    #[default]
    Ativo,
    Inativo,
    Licenca,
    Ferias,
}

impl_string_enum!(ProfessorStatus {
    Ativo => "ativo",
    Inativo => "inativo",
    Licenca => "licenca",
    Ferias => "ferias",
});

/// Professor domain entity. Soft-deleted rows never reach this type except
/// through reactivation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Professor {
    pub id: i32,
    pub nome: String,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub data_nasc: NaiveDate,
    pub sexo: Sexo,
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
    pub especializacao: Option<String>,
    pub experiencia_anos: Option<i32>,
    pub registro_profissional: Option<String>,
    pub salario: Option<f64>,
    pub data_admissao: NaiveDate,
    pub data_demissao: Option<NaiveDate>,
    pub status: ProfessorStatus,
    pub carga_horaria_semanal: Option<i32>,
    pub observacoes: Option<String>,
    pub foto_url: Option<String>,
    pub usuario_id: i32,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Professor create/update form
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProfessorForm {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"))]
    #[schema(example = "Carla Mendes")]
    pub nome: String,
    #[validate(custom(function = "validate_cpf", message = "CPF deve estar no formato XXX.XXX.XXX-XX"))]
    pub cpf: Option<String>,
    #[validate(length(min = 5, max = 20, message = "RG deve ter entre 5 e 20 caracteres"))]
    pub rg: Option<String>,
    pub data_nasc: NaiveDate,
    pub sexo: Sexo,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_formatted_phone", message = "Telefone deve estar no formato (XX) XXXXX-XXXX"))]
    pub telefone: Option<String>,
    #[validate(length(max = 200, message = "Endereço deve ter no máximo 200 caracteres"))]
    pub endereco: Option<String>,
    #[validate(length(max = 10, message = "Número deve ter no máximo 10 caracteres"))]
    pub numero: Option<String>,
    #[validate(length(max = 100, message = "Complemento deve ter no máximo 100 caracteres"))]
    pub complemento: Option<String>,
    #[validate(length(max = 100, message = "Bairro deve ter no máximo 100 caracteres"))]
    pub bairro: Option<String>,
    #[validate(length(max = 100, message = "Cidade deve ter no máximo 100 caracteres"))]
    pub cidade: Option<String>,
    #[validate(custom(function = "validate_uf", message = "Estado deve ter 2 letras"))]
    pub estado: Option<String>,
    #[validate(custom(function = "validate_cep", message = "CEP deve estar no formato XXXXX-XXX"))]
    pub cep: Option<String>,
    #[validate(length(min = 2, max = 200, message = "Formação deve ter entre 2 e 200 caracteres"))]
    #[schema(example = "Licenciatura em Matemática")]
    pub formacao: String,
    #[validate(length(max = 1000, message = "Especialização deve ter no máximo 1000 caracteres"))]
    pub especializacao: Option<String>,
    #[validate(range(min = 0, max = 50, message = "Experiência deve estar entre 0 e 50 anos"))]
    pub experiencia_anos: Option<i32>,
    #[validate(length(max = 50, message = "Registro profissional deve ter no máximo 50 caracteres"))]
    pub registro_profissional: Option<String>,
    #[validate(range(min = 0.0, message = "Salário não pode ser negativo"))]
    pub salario: Option<f64>,
    pub data_admissao: NaiveDate,
    pub data_demissao: Option<NaiveDate>,
    pub status: Option<ProfessorStatus>,
    #[validate(range(min = 1, max = 60, message = "Carga horária deve estar entre 1 e 60 horas"))]
    pub carga_horaria_semanal: Option<i32>,
    #[validate(length(max = 2000, message = "Observações devem ter no máximo 2000 caracteres"))]
    pub observacoes: Option<String>,
    #[validate(url(message = "URL da foto inválida"))]
    pub foto_url: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    #[schema(value_type = Option<bool>)]
    pub ativo: Option<bool>,
}

/// Trim text, lowercase the email and reformat CPF/CEP. Salary is rounded
/// to cents.
impl Normalize for ProfessorForm {
    fn normalized(self) -> Self {
        Self {
            nome: self.nome.trim().to_string(),
            cpf: clean(self.cpf).map(|v| format_cpf(&v)),
            rg: clean(self.rg),
            email: clean(self.email).map(|v| v.to_lowercase()),
            telefone: clean(self.telefone),
            endereco: clean(self.endereco),
            numero: clean(self.numero),
            complemento: clean(self.complemento),
            bairro: clean(self.bairro),
            cidade: clean(self.cidade),
            estado: clean(self.estado).map(|v| v.to_uppercase()),
            cep: clean(self.cep).map(|v| format_cep(&v)),
            formacao: self.formacao.trim().to_string(),
            especializacao: clean(self.especializacao),
            registro_profissional: clean(self.registro_profissional),
            salario: self.salario.map(|s| (s * 100.0).round() / 100.0),
            observacoes: clean(self.observacoes),
            foto_url: clean(self.foto_url),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfessorFilter {
    pub search: Option<String>,
    pub status: Option<ProfessorStatus>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfessorListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring of nome, cpf, email or formacao
    pub search: Option<String>,
    pub status: Option<String>,
    pub ativo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormacaoCount {
    pub formacao: String,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorEstatisticas {
    pub total: u64,
    pub ativos: u64,
    pub inativos: u64,
    pub licenca: u64,
    pub ferias: u64,
    pub por_formacao: Vec<FormacaoCount>,
    /// One decimal place, `"0.0"` without data
    #[schema(example = "7.5")]
    pub media_experiencia: String,
}

/// Render an optional average with one decimal place.
pub fn format_media(media: Option<f64>) -> String {
    format!("{:.1}", media.unwrap_or(0.0))
}
