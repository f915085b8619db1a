//! Unit of Work over mockall repositories for service unit tests.

use std::sync::Arc;

use crate::infra::{
    AlunoRepository, CursoRepository, MockAlunoRepository, MockCursoRepository,
    MockProfessorRepository, MockUserRepository, ProfessorRepository, UnitOfWork,
    UserRepository,
};

pub(crate) struct TestUow {
    users: Arc<MockUserRepository>,
    alunos: Arc<MockAlunoRepository>,
    professores: Arc<MockProfessorRepository>,
    cursos: Arc<MockCursoRepository>,
}

impl TestUow {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            alunos: Arc::new(MockAlunoRepository::new()),
            professores: Arc::new(MockProfessorRepository::new()),
            cursos: Arc::new(MockCursoRepository::new()),
        }
    }

    pub(crate) fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub(crate) fn with_alunos(mut self, repo: MockAlunoRepository) -> Self {
        self.alunos = Arc::new(repo);
        self
    }

    pub(crate) fn with_professores(mut self, repo: MockProfessorRepository) -> Self {
        self.professores = Arc::new(repo);
        self
    }

    pub(crate) fn with_cursos(mut self, repo: MockCursoRepository) -> Self {
        self.cursos = Arc::new(repo);
        self
    }
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn alunos(&self) -> Arc<dyn AlunoRepository> {
        self.alunos.clone()
    }

    fn professores(&self) -> Arc<dyn ProfessorRepository> {
        self.professores.clone()
    }

    fn cursos(&self) -> Arc<dyn CursoRepository> {
        self.cursos.clone()
    }
}

pub(crate) fn sample_aluno(id: i32, nome: &str) -> crate::domain::Aluno {
    use chrono::{NaiveDate, Utc};

    let now = Utc::now();
    crate::domain::Aluno {
        id,
        nome: nome.to_string(),
        data_nasc: NaiveDate::from_ymd_opt(2014, 3, 9).unwrap_or_default(),
        cpf: None,
        rg: None,
        sexo: crate::domain::Sexo::F,
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
        turma: Some("A".to_string()),
        serie: None,
        escola: None,
        restricao_alimentar: None,
        medicamentos: None,
        observacoes_medicas: None,
        ativo: true,
        data_matricula: now.date_naive(),
        numero_matricula: Some("20260001".to_string()),
        foto: None,
        documentos: serde_json::json!([]),
        usuario_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn sample_professor(id: i32, nome: &str) -> crate::domain::Professor {
    use chrono::{NaiveDate, Utc};

    let now = Utc::now();
    crate::domain::Professor {
        id,
        nome: nome.to_string(),
        cpf: None,
        rg: None,
        data_nasc: NaiveDate::from_ymd_opt(1985, 6, 1).unwrap_or_default(),
        sexo: crate::domain::Sexo::M,
        email: Some(format!("prof{}@ong.org", id)),
        telefone: None,
        endereco: None,
        numero: None,
        complemento: None,
        bairro: None,
        cidade: None,
        estado: None,
        cep: None,
        formacao: "Pedagogia".to_string(),
        especializacao: None,
        experiencia_anos: Some(5),
        registro_profissional: None,
        salario: None,
        data_admissao: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap_or_default(),
        data_demissao: None,
        status: crate::domain::ProfessorStatus::Ativo,
        carga_horaria_semanal: None,
        observacoes: None,
        foto_url: None,
        usuario_id: 1,
        ativo: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub(crate) fn sample_curso(id: i32, codigo: &str) -> crate::domain::Curso {
    use chrono::{NaiveDate, NaiveTime, Utc};
    use crate::domain::{Categoria, CursoStatus, DiaSemana, Nivel};

    let now = Utc::now();
    crate::domain::Curso {
        id,
        nome: "Informática Básica".to_string(),
        codigo: codigo.to_string(),
        descricao: None,
        categoria: Categoria::Informatica,
        nivel: Nivel::Iniciante,
        carga_horaria_total: 40,
        duracao_meses: 2,
        idade_minima: None,
        idade_maxima: None,
        vagas_disponiveis: 20,
        vagas_ocupadas: 5,
        data_inicio: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default(),
        data_fim: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap_or_default(),
        horario_inicio: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        horario_fim: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        dias_semana: vec![DiaSemana::Segunda],
        local: "Sala 1".to_string(),
        sala: None,
        material_necessario: None,
        pre_requisitos: None,
        objetivos: None,
        metodologia: None,
        avaliacao: None,
        certificado: false,
        valor_curso: 0.0,
        gratuito: true,
        status: CursoStatus::Planejado,
        professor_id: 1,
        usuario_id: 1,
        observacoes: None,
        foto_url: None,
        ativo: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}
