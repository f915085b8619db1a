//! Dashboard aggregates and the pure calendar math behind them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::TurmaCount;
use crate::utils::dates::{age_on, days_until_birthday, month_label_pt_br, month_window};

/// Active students per age bracket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FaixasEtarias {
    #[serde(rename = "0-5")]
    pub ate_5: u64,
    #[serde(rename = "6-10")]
    pub de_6_a_10: u64,
    #[serde(rename = "11-15")]
    pub de_11_a_15: u64,
    #[serde(rename = "16-18")]
    pub de_16_a_18: u64,
    #[serde(rename = "18+")]
    pub acima_de_18: u64,
}

impl FaixasEtarias {
    pub fn add(&mut self, idade: i32) {
        match idade {
            i32::MIN..=5 => self.ate_5 += 1,
            6..=10 => self.de_6_a_10 += 1,
            11..=15 => self.de_11_a_15 += 1,
            16..=18 => self.de_16_a_18 += 1,
            _ => self.acima_de_18 += 1,
        }
    }

    pub fn from_birth_dates(births: &[NaiveDate], today: NaiveDate) -> Self {
        let mut faixas = Self::default();
        for birth in births {
            faixas.add(age_on(*birth, today));
        }
        faixas
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EstatisticasGerais {
    pub total_alunos: u64,
    pub total_usuarios: u64,
    pub alunos_inativos: u64,
    pub alunos_recentes: u64,
    pub alunos_com_restricao: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Distribuicoes {
    pub por_turma: Vec<TurmaCount>,
    pub por_faixa_etaria: FaixasEtarias,
}

/// Short student card for the "latest enrollments" list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UltimoAluno {
    pub id: i32,
    pub nome: String,
    pub turma: Option<String>,
    pub data_matricula: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CrescimentoMensal {
    #[schema(example = "out. de 2026")]
    pub mes: String,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub estatisticas_gerais: EstatisticasGerais,
    pub distribuicoes: Distribuicoes,
    pub ultimos_alunos: Vec<UltimoAluno>,
    pub crescimento_mensal: Vec<CrescimentoMensal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Aniversariante {
    pub id: i32,
    pub nome: String,
    pub data_nasc: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResumo {
    pub total_alunos: u64,
    pub total_turmas: u64,
    pub alunos_cadastrados_hoje: u64,
    pub proximos_aniversarios: usize,
    pub aniversariantes: Vec<Aniversariante>,
}

/// A labelled `[start, end)` month used by the growth series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The `months` calendar months ending with the current one, oldest first.
pub fn growth_windows(today: NaiveDate, months: u32) -> Vec<MonthWindow> {
    (0..months)
        .rev()
        .filter_map(|back| month_window(today, back))
        .map(|(start, end)| MonthWindow {
            label: month_label_pt_br(start),
            start,
            end,
        })
        .collect()
}

/// Birthdays within `window_days` from today (across month and year ends),
/// soonest first. Returns the full count and at most `limit` entries.
pub fn upcoming_birthdays(
    candidates: Vec<Aniversariante>,
    today: NaiveDate,
    window_days: i64,
    limit: usize,
) -> (usize, Vec<Aniversariante>) {
    let mut upcoming: Vec<(i64, Aniversariante)> = candidates
        .into_iter()
        .filter_map(|a| {
            days_until_birthday(a.data_nasc, today)
                .filter(|days| *days <= window_days)
                .map(|days| (days, a))
        })
        .collect();
    upcoming.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.nome.cmp(&b.nome)));

    let total = upcoming.len();
    let list = upcoming.into_iter().take(limit).map(|(_, a)| a).collect();
    (total, list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn aniversariante(id: i32, nome: &str, birth: NaiveDate) -> Aniversariante {
        Aniversariante {
            id,
            nome: nome.to_string(),
            data_nasc: birth,
        }
    }

    #[test]
    fn test_age_brackets_boundaries() {
        let today = d(2026, 10, 14);
        let births = [
            d(2021, 10, 14), // 5
            d(2020, 10, 14), // 6
            d(2016, 10, 15), // 9, birthday tomorrow
            d(2011, 10, 14), // 15
            d(2008, 10, 14), // 18
            d(2007, 10, 14), // 19
        ];
        let faixas = FaixasEtarias::from_birth_dates(&births, today);
        assert_eq!(
            faixas,
            FaixasEtarias {
                ate_5: 1,
                de_6_a_10: 2,
                de_11_a_15: 1,
                de_16_a_18: 1,
                acima_de_18: 1,
            }
        );
    }

    #[test]
    fn test_age_bracket_keys() {
        let json = serde_json::to_value(FaixasEtarias::default()).unwrap();
        for key in ["0-5", "6-10", "11-15", "16-18", "18+"] {
            assert_eq!(json[key], 0, "missing {}", key);
        }
    }

    #[test]
    fn test_growth_windows_cross_year() {
        let windows = growth_windows(d(2026, 2, 20), 6);
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0].start, d(2025, 9, 1));
        assert_eq!(windows[0].label, "set. de 2025");
        assert_eq!(windows[5].start, d(2026, 2, 1));
        assert_eq!(windows[5].end, d(2026, 3, 1));
    }

    #[test]
    fn test_upcoming_birthdays_cross_month_and_year() {
        let today = d(2026, 12, 28);
        let candidates = vec![
            aniversariante(1, "Bia", d(2015, 1, 3)),
            aniversariante(2, "Caio", d(2012, 12, 28)),
            aniversariante(3, "Davi", d(2014, 1, 5)),
            aniversariante(4, "Enzo", d(2013, 12, 27)),
        ];
        let (total, list) = upcoming_birthdays(candidates, today, 7, 5);
        assert_eq!(total, 2);
        let ids: Vec<i32> = list.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_upcoming_birthdays_respects_limit() {
        let today = d(2026, 10, 14);
        let candidates = (0..8)
            .map(|i| aniversariante(i, &format!("Aluno {}", i), d(2015, 10, 15)))
            .collect();
        let (total, list) = upcoming_birthdays(candidates, today, 7, 5);
        assert_eq!(total, 8);
        assert_eq!(list.len(), 5);
    }
}
