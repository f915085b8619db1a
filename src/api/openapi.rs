//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    aluno_handler, auth_handler, curso_handler, dashboard_handler, health_handler,
    professor_handler,
};
use crate::domain::dashboard::{Distribuicoes, EstatisticasGerais};
use crate::domain::{
    Aluno, AlunoEstatisticas, AlunoForm, AlunoResponse, AlunosDaTurma, Aniversariante, Cargo,
    Categoria, CrescimentoMensal, Curso, CursoForm, CursoStatus, DashboardResumo,
    DashboardStats, DiaSemana, FaixasEtarias, FormacaoCount, Nivel, Professor,
    ProfessorEstatisticas, ProfessorForm, ProfessorStatus, PublicUser, Sexo, TurmaCount,
    UltimoAluno,
};
use crate::services::AuthResponse;

/// OpenAPI documentation for the ONG admin API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ONG Admin API",
        version = "0.1.0",
        description = "Cadastro de alunos, professores e cursos de uma ONG",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3003", description = "Servidor local")
    ),
    paths(
        health_handler::health,
        auth_handler::register,
        auth_handler::login,
        auth_handler::verify,
        auth_handler::logout,
        aluno_handler::list_alunos,
        aluno_handler::get_aluno,
        aluno_handler::create_aluno,
        aluno_handler::update_aluno,
        aluno_handler::delete_aluno,
        aluno_handler::reativar_aluno,
        aluno_handler::alunos_da_turma,
        aluno_handler::estatisticas,
        professor_handler::list_professores,
        professor_handler::get_professor,
        professor_handler::professores_por_status,
        professor_handler::estatisticas,
        professor_handler::create_professor,
        professor_handler::update_professor,
        professor_handler::delete_professor,
        professor_handler::reativar_professor,
        curso_handler::list_cursos,
        curso_handler::get_curso,
        curso_handler::create_curso,
        curso_handler::update_curso,
        curso_handler::delete_curso,
        curso_handler::reativar_curso,
        dashboard_handler::stats,
        dashboard_handler::resumo,
    ),
    components(
        schemas(
            Sexo,
            Cargo,
            PublicUser,
            AuthResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::VerifyResponse,
            Aluno,
            AlunoForm,
            AlunoResponse,
            AlunosDaTurma,
            AlunoEstatisticas,
            TurmaCount,
            Professor,
            ProfessorForm,
            ProfessorStatus,
            ProfessorEstatisticas,
            FormacaoCount,
            Curso,
            CursoForm,
            Categoria,
            Nivel,
            CursoStatus,
            DiaSemana,
            DashboardStats,
            EstatisticasGerais,
            Distribuicoes,
            FaixasEtarias,
            UltimoAluno,
            CrescimentoMensal,
            DashboardResumo,
            Aniversariante,
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
            health_handler::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Disponibilidade dos serviços"),
        (name = "Autenticação", description = "Login, cadastro e sessão"),
        (name = "Alunos", description = "Cadastro de alunos"),
        (name = "Professores", description = "Cadastro de professores"),
        (name = "Cursos", description = "Cadastro de cursos"),
        (name = "Dashboard", description = "Indicadores do painel")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtido em /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/auth/login",
            "/api/alunos/{id}/reativar",
            "/api/professores/estatisticas",
            "/api/cursos",
            "/api/dashboard/resumo",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
