//! Student (aluno) entity, enrollment form and filters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{clean, Normalize, Sexo};
use crate::utils::dates::age_on;
use crate::utils::documents::{
    format_cep, format_cpf, validate_br_phone, validate_cep, validate_cpf, validate_uf,
};
use crate::utils::serde_ext::flexible_bool;

/// Student domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Aluno {
    pub id: i32,
    pub nome: String,
    pub data_nasc: NaiveDate,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub sexo: Sexo,
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
    pub restricao_alimentar: Option<String>,
    pub medicamentos: Option<String>,
    pub observacoes_medicas: Option<String>,
    pub ativo: bool,
    pub data_matricula: NaiveDate,
    pub numero_matricula: Option<String>,
    pub foto: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub documentos: Value,
    pub usuario_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Aluno {
    pub fn idade_em(&self, today: NaiveDate) -> i32 {
        age_on(self.data_nasc, today)
    }
}

/// Student record with its computed age
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlunoResponse {
    #[serde(flatten)]
    pub aluno: Aluno,
    #[schema(example = 12)]
    pub idade: i32,
}

impl AlunoResponse {
    pub fn new(aluno: Aluno, today: NaiveDate) -> Self {
        let idade = aluno.idade_em(today);
        Self { aluno, idade }
    }
}

/// Enrollment form, used for both create and update.
///
/// Unknown keys (`id`, `usuario_id`, timestamps) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AlunoForm {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"))]
    #[schema(example = "João da Silva")]
    pub nome: String,
    #[schema(example = "2014-03-09")]
    pub data_nasc: NaiveDate,
    pub sexo: Sexo,
    #[validate(custom(function = "validate_cpf", message = "CPF deve estar no formato XXX.XXX.XXX-XX"))]
    #[schema(example = "529.982.247-25")]
    pub cpf: Option<String>,
    #[validate(length(max = 20, message = "RG deve ter no máximo 20 caracteres"))]
    pub rg: Option<String>,
    #[validate(custom(function = "validate_br_phone", message = "Telefone inválido"))]
    pub telefone: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
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
    #[validate(length(max = 100, message = "Nome do responsável deve ter no máximo 100 caracteres"))]
    pub nome_responsavel: Option<String>,
    #[validate(custom(function = "validate_cpf", message = "CPF do responsável inválido"))]
    pub cpf_responsavel: Option<String>,
    #[validate(custom(function = "validate_br_phone", message = "Telefone do responsável inválido"))]
    pub telefone_responsavel: Option<String>,
    #[validate(email(message = "Email do responsável inválido"))]
    pub email_responsavel: Option<String>,
    #[validate(length(max = 50, message = "Parentesco deve ter no máximo 50 caracteres"))]
    pub parentesco: Option<String>,
    #[validate(length(max = 50, message = "Turma deve ter no máximo 50 caracteres"))]
    pub turma: Option<String>,
    #[validate(length(max = 20, message = "Série deve ter no máximo 20 caracteres"))]
    pub serie: Option<String>,
    #[validate(length(max = 150, message = "Escola deve ter no máximo 150 caracteres"))]
    pub escola: Option<String>,
    pub restricao_alimentar: Option<String>,
    pub medicamentos: Option<String>,
    pub observacoes_medicas: Option<String>,
    /// Booleans or truthy strings (`sim`, `on`, `matriculado`, ...)
    #[serde(default, deserialize_with = "flexible_bool")]
    #[schema(value_type = Option<bool>)]
    pub ativo: Option<bool>,
    pub data_matricula: Option<NaiveDate>,
    #[validate(length(max = 20, message = "Número de matrícula deve ter no máximo 20 caracteres"))]
    pub numero_matricula: Option<String>,
    pub foto: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub documentos: Option<Vec<Value>>,
}

/// Trim text, drop blanks, lowercase emails and put CPF/CEP/UF in their
/// stored formats.
impl Normalize for AlunoForm {
    fn normalized(self) -> Self {
        Self {
            nome: self.nome.trim().to_string(),
            cpf: clean(self.cpf).map(|v| format_cpf(&v)),
            rg: clean(self.rg),
            telefone: clean(self.telefone),
            email: clean(self.email).map(|v| v.to_lowercase()),
            endereco: clean(self.endereco),
            numero: clean(self.numero),
            complemento: clean(self.complemento),
            bairro: clean(self.bairro),
            cidade: clean(self.cidade),
            estado: clean(self.estado).map(|v| v.to_uppercase()),
            cep: clean(self.cep).map(|v| format_cep(&v)),
            nome_responsavel: clean(self.nome_responsavel),
            cpf_responsavel: clean(self.cpf_responsavel).map(|v| format_cpf(&v)),
            telefone_responsavel: clean(self.telefone_responsavel),
            email_responsavel: clean(self.email_responsavel).map(|v| v.to_lowercase()),
            parentesco: clean(self.parentesco),
            turma: clean(self.turma),
            serie: clean(self.serie),
            escola: clean(self.escola),
            restricao_alimentar: clean(self.restricao_alimentar),
            medicamentos: clean(self.medicamentos),
            observacoes_medicas: clean(self.observacoes_medicas),
            numero_matricula: clean(self.numero_matricula),
            foto: clean(self.foto),
            ..self
        }
    }
}

/// List filters for `GET /api/alunos`
#[derive(Debug, Clone, Default)]
pub struct AlunoFilter {
    pub search: Option<String>,
    pub ativo: Option<bool>,
    pub turma: Option<String>,
}

/// Raw query string of the student list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlunoListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring of nome, numero_matricula or cpf
    pub search: Option<String>,
    /// Applied only when present
    pub ativo: Option<String>,
    pub turma: Option<String>,
}

/// Students per class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TurmaCount {
    pub turma: Option<String>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlunoEstatisticas {
    pub total_alunos: u64,
    pub total_inativos: u64,
    pub alunos_por_turma: Vec<TurmaCount>,
    pub alunos_com_restricao_alimentar: u64,
}

/// Active students of one class
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlunosDaTurma {
    pub turma: String,
    pub total: usize,
    pub alunos: Vec<AlunoResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn form() -> AlunoForm {
        AlunoForm {
            nome: "Ana Clara".to_string(),
            data_nasc: NaiveDate::from_ymd_opt(2014, 3, 9).unwrap(),
            sexo: Sexo::F,
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_form_is_valid() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        let f = AlunoForm {
            nome: "A".to_string(),
            ..form()
        };
        let errors = f.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nome"));
    }

    #[test]
    fn test_invalid_cpf_rejected() {
        let f = AlunoForm {
            cpf: Some("123.456.789-00".to_string()),
            ..form()
        };
        assert!(f.validate().unwrap_err().field_errors().contains_key("cpf"));
    }

    #[test]
    fn test_normalized_formats_documents() {
        let f = AlunoForm {
            nome: "  Ana Clara ".to_string(),
            cpf: Some("52998224725".to_string()),
            cep: Some("01310100".to_string()),
            email: Some(" ANA@Mail.com ".to_string()),
            turma: Some("   ".to_string()),
            estado: Some("sp".to_string()),
            ..form()
        }
        .normalized();

        assert_eq!(f.nome, "Ana Clara");
        assert_eq!(f.cpf.as_deref(), Some("529.982.247-25"));
        assert_eq!(f.cep.as_deref(), Some("01310-100"));
        assert_eq!(f.email.as_deref(), Some("ana@mail.com"));
        assert_eq!(f.estado.as_deref(), Some("SP"));
        assert_eq!(f.turma, None);
    }

    #[test]
    fn test_ativo_accepts_truthy_strings() {
        let json = r#"{"nome":"Ana","data_nasc":"2014-03-09","sexo":"F","ativo":"Matriculado"}"#;
        let f: AlunoForm = serde_json::from_str(json).unwrap();
        assert_eq!(f.ativo, Some(true));

        let json = r#"{"nome":"Ana","data_nasc":"2014-03-09","sexo":"F","ativo":"nao"}"#;
        let f: AlunoForm = serde_json::from_str(json).unwrap();
        assert_eq!(f.ativo, Some(false));

        let json = r#"{"nome":"Ana","data_nasc":"2014-03-09","sexo":"F"}"#;
        let f: AlunoForm = serde_json::from_str(json).unwrap();
        assert_eq!(f.ativo, None);
    }

    #[test]
    fn test_response_flattens_record_with_age() {
        let now = Utc::now();
        let aluno = Aluno {
            id: 1,
            nome: "Ana".into(),
            data_nasc: NaiveDate::from_ymd_opt(2014, 3, 9).unwrap(),
            cpf: None,
            rg: None,
            sexo: Sexo::F,
            telefone: None,
            email: None,
            endereco: None,
            numero: None,
            complemento: None,
            bairro: None,
            cidade: None,
            estado: None,
            cep: None,
            nome_responsavel: None,
            cpf_responsavel: None,
            telefone_responsavel: None,
            email_responsavel: None,
            parentesco: None,
            turma: None,
            serie: None,
            escola: None,
            restricao_alimentar: None,
            medicamentos: None,
            observacoes_medicas: None,
            ativo: true,
            data_matricula: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            numero_matricula: Some("20260001".into()),
            foto: None,
            documentos: Value::Array(vec![]),
            usuario_id: None,
            created_at: now,
            updated_at: now,
        };
        let response = AlunoResponse::new(aluno, NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["idade"], 11);
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["sexo"], "F");
    }
}
