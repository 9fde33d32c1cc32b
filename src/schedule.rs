//! Agendamentos de entrega
//!
//! Extraídos da planilha de pedidos depois da resolução de colunas.
//! Data/hora ilegível nunca é fatal: a linha fica de fora do cruzamento.

use crate::error::{DispoError, Result};
use crate::normalizer::normalize_cell;
use crate::resolver;
use crate::sheet::{Cell, Table};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// Um pedido agendado: entregador designado + data/hora prevista.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Chave normalizada do entregador.
    pub courier: String,
    /// `None` = carimbo ausente ou ilegível.
    pub scheduled_at: Option<NaiveDateTime>,
}

/// Tabela de agendamentos de uma execução.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub bookings: Vec<Booking>,
    /// Rótulo resolvido da coluna do entregador.
    pub courier_column: String,
    /// Rótulo resolvido da coluna de data/hora.
    pub schedule_column: String,
}

impl Schedule {
    pub fn from_table(
        table: &Table,
        configured_courier: &str,
        configured_schedule: &str,
    ) -> Result<Self> {
        let courier_col = resolver::resolve_courier_column(&table.labels, configured_courier)?;
        let schedule_col = resolver::resolve_schedule_column(&table.labels, configured_schedule)?;

        let courier_idx = table
            .column_index(&courier_col.label)
            .ok_or_else(|| DispoError::ColumnNotFound(courier_col.label.clone()))?;
        let schedule_idx = table
            .column_index(&schedule_col.label)
            .ok_or_else(|| DispoError::ColumnNotFound(schedule_col.label.clone()))?;

        let mut unparsed = 0usize;
        let mut bookings = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let courier = row.get(courier_idx).map(normalize_cell).unwrap_or_default();
            let cell = row.get(schedule_idx);
            let scheduled_at = cell.and_then(parse_timestamp);
            if scheduled_at.is_none() && cell.is_some_and(|c| !c.is_empty()) {
                unparsed += 1;
            }
            bookings.push(Booking { courier, scheduled_at });
        }

        if unparsed > 0 {
            tracing::warn!(
                linhas = unparsed,
                "agendamentos com data/hora ilegível ficam fora do cruzamento"
            );
        }
        tracing::info!(
            agendamentos = bookings.len(),
            coluna_entregador = %courier_col.label,
            coluna_data = %schedule_col.label,
            "agendamento processado"
        );

        Ok(Self {
            bookings,
            courier_column: courier_col.label,
            schedule_column: schedule_col.label,
        })
    }

    /// Chaves normalizadas dos entregadores escalados na data.
    pub fn assigned_on(&self, date: NaiveDate) -> HashSet<&str> {
        self.bookings
            .iter()
            .filter(|b| b.scheduled_at.map(|t| t.date()) == Some(date))
            .filter(|b| !b.courier.is_empty())
            .map(|b| b.courier.as_str())
            .collect()
    }
}

/// Formatos aceitos, dia-primeiro na frente (planilha brasileira:
/// `01/02/2024` é 1º de fevereiro).
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Interpreta a célula de data/hora; `None` = ilegível.
pub fn parse_timestamp(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(raw) => parse_timestamp_text(raw),
        _ => None,
    }
}

/// Tenta os formatos de data/hora na ordem; data sem hora vale meia-noite.
pub fn parse_timestamp_text(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_first() {
        let dt = parse_timestamp_text("10/01/2024 08:30").unwrap();
        assert_eq!(dt.date(), date(2024, 1, 10));
    }

    #[test]
    fn test_parse_day_first_wins_over_iso_ambiguity() {
        // 01/02/2024 é 1º de fevereiro, não 2 de janeiro
        let dt = parse_timestamp_text("01/02/2024").unwrap();
        assert_eq!(dt.date(), date(2024, 2, 1));
    }

    #[test]
    fn test_parse_iso() {
        let dt = parse_timestamp_text("2024-01-10 14:00:00").unwrap();
        assert_eq!(dt.date(), date(2024, 1, 10));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp_text("amanhã de manhã").is_none());
        assert!(parse_timestamp_text("").is_none());
        assert!(parse_timestamp(&Cell::Number(42.0)).is_none());
    }

    #[test]
    fn test_from_table_normalizes_and_tracks_columns() {
        let table = Table {
            labels: vec!["data de agendamento".into(), "entregador".into()],
            rows: vec![
                vec![
                    Cell::Text("10/01/2024 08:00".into()),
                    Cell::Text(" Alice ".into()),
                ],
                vec![Cell::Text("isso não é data".into()), Cell::Text("Bob".into())],
            ],
        };
        let schedule = Schedule::from_table(&table, "entregador", "data_agendamento").unwrap();
        assert_eq!(schedule.courier_column, "entregador");
        assert_eq!(schedule.schedule_column, "data de agendamento");
        assert_eq!(schedule.bookings[0].courier, "alice");
        assert!(schedule.bookings[1].scheduled_at.is_none());

        let assigned = schedule.assigned_on(date(2024, 1, 10));
        assert!(assigned.contains("alice"));
        assert!(!assigned.contains("bob"));
    }
}
