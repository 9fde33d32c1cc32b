//! Cálculo de disponibilidade
//!
//! Para cada data pedida, monta o conjunto de chaves dos entregadores
//! escalados no dia e devolve o complemento dentro do cadastro. Data
//! sem nenhum disponível fica fora do resultado (o relatório não ganha
//! seção vazia).

use crate::registry::{Courier, Registry};
use crate::schedule::Schedule;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Disponibilidade por data, em ordem crescente de data.
pub type Availability = BTreeMap<NaiveDate, Vec<Courier>>;

/// Converte as datas selecionadas (já ordenadas e sem repetição na
/// saída). Data inválida é registrada e pulada, sem derrubar as demais.
pub fn parse_dates(raw: &[String], format: &str) -> Vec<NaiveDate> {
    let mut dates = BTreeSet::new();
    for value in raw {
        match NaiveDate::parse_from_str(value.trim(), format) {
            Ok(date) => {
                dates.insert(date);
            }
            Err(e) => tracing::error!(data = %value, erro = %e, "data inválida ignorada"),
        }
    }
    dates.into_iter().collect()
}

/// Motoboys do cadastro sem agendamento em cada data.
///
/// Preserva a ordem do cadastro e não repete motoboy dentro de uma data
/// (cadastros reais têm linha duplicada).
pub fn compute(registry: &Registry, schedule: &Schedule, dates: &[NaiveDate]) -> Availability {
    let mut result = Availability::new();

    for &date in dates {
        let assigned = schedule.assigned_on(date);

        let mut seen = HashSet::new();
        let available: Vec<Courier> = registry
            .couriers
            .iter()
            .filter(|c| !assigned.contains(c.name.as_str()))
            .filter(|c| seen.insert(c.name.clone()))
            .cloned()
            .collect();

        tracing::debug!(
            data = %date,
            escalados = assigned.len(),
            disponiveis = available.len(),
            "data processada"
        );

        if !available.is_empty() {
            result.insert(date, available);
        }
    }

    result
}
