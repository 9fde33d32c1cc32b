//! Resolução heurística de colunas da planilha de agendamento
//!
//! Os cabeçalhos vêm de uma ferramenta de pedidos externa e mudam de
//! exportação para exportação (às vezes localizados, às vezes vazios).
//! A identificação é uma lista ordenada de regras; a primeira que casar
//! com algum rótulo vence:
//!
//! 1. nome exato configurado (`planilha.coluna_entregador` / `coluna_data`)
//! 2. palavra-chave contida no rótulo
//! 3. padrão estrutural do rótulo (último recurso)

use crate::error::{DispoError, Result};
use crate::normalizer::normalize_key;
use crate::sheet::PLACEHOLDER_PREFIX;

/// Palavras-chave que indicam a coluna do entregador.
const COURIER_KEYWORDS: &[&str] = &["entregador", "motoboy", "delivery", "nome"];

/// Palavras-chave que indicam a coluna de data do agendamento.
const SCHEDULE_KEYWORDS: &[&str] = &["data", "date", "agendamento", "agenda"];

/// Regra de identificação de coluna.
pub enum ColumnRule {
    /// Nome exato vindo da configuração.
    Configured(String),
    /// Rótulo contém uma das palavras-chave.
    Keyword(&'static [&'static str]),
    /// Predicado estrutural sobre o rótulo.
    Structural(fn(&str) -> bool),
}

impl ColumnRule {
    fn matches(&self, label: &str) -> bool {
        match self {
            ColumnRule::Configured(name) => !name.is_empty() && label == name,
            ColumnRule::Keyword(words) => words.iter().any(|w| label.contains(w)),
            ColumnRule::Structural(pred) => pred(label),
        }
    }

    fn kind(&self) -> RuleKind {
        match self {
            ColumnRule::Configured(_) => RuleKind::Configured,
            ColumnRule::Keyword(_) => RuleKind::Keyword,
            ColumnRule::Structural(_) => RuleKind::Structural,
        }
    }
}

/// Qual regra identificou a coluna.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Configured,
    Keyword,
    Structural,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Configured => write!(f, "configuração"),
            RuleKind::Keyword => write!(f, "palavra-chave"),
            RuleKind::Structural => write!(f, "estrutura"),
        }
    }
}

/// Resultado da resolução: rótulo escolhido + regra que casou.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub label: String,
    pub rule: RuleKind,
}

/// Aplica as regras na ordem; a primeira que casar com algum rótulo vence.
pub fn resolve(labels: &[String], rules: &[ColumnRule]) -> Option<Resolution> {
    rules.iter().find_map(|rule| {
        labels.iter().find(|label| rule.matches(label.as_str())).map(|label| Resolution {
            label: label.clone(),
            rule: rule.kind(),
        })
    })
}

/// Rótulo que parece um nome de pessoa por extenso.
fn looks_like_name_column(label: &str) -> bool {
    label.chars().count() > 10 && label.contains(' ') && !label.starts_with(PLACEHOLDER_PREFIX)
}

/// Rótulo que parece um carimbo de data/hora (`dd/mm/aaaa hh:mm`).
fn looks_like_timestamp_column(label: &str) -> bool {
    label.contains('/') && label.contains(':') && label.chars().count() > 15
}

fn courier_rules(configured: &str) -> [ColumnRule; 3] {
    [
        ColumnRule::Configured(normalize_key(configured)),
        ColumnRule::Keyword(COURIER_KEYWORDS),
        ColumnRule::Structural(looks_like_name_column),
    ]
}

fn schedule_rules(configured: &str) -> [ColumnRule; 3] {
    [
        ColumnRule::Configured(normalize_key(configured)),
        ColumnRule::Keyword(SCHEDULE_KEYWORDS),
        ColumnRule::Structural(looks_like_timestamp_column),
    ]
}

/// Coluna do entregador, ou `ColumnNotFound`.
pub fn resolve_courier_column(labels: &[String], configured: &str) -> Result<Resolution> {
    let resolution = resolve(labels, &courier_rules(configured))
        .ok_or_else(|| DispoError::ColumnNotFound("entregador (agendamento)".into()))?;
    warn_structural(&resolution, "entregador");
    Ok(resolution)
}

/// Coluna de data/hora do agendamento, ou `ColumnNotFound`.
pub fn resolve_schedule_column(labels: &[String], configured: &str) -> Result<Resolution> {
    let resolution = resolve(labels, &schedule_rules(configured))
        .ok_or_else(|| DispoError::ColumnNotFound("data de agendamento (agendamento)".into()))?;
    warn_structural(&resolution, "data de agendamento");
    Ok(resolution)
}

// O padrão estrutural depende de limiares arbitrários e pode errar em
// layouts desconhecidos; quando é ele que decide, o log avisa.
fn warn_structural(resolution: &Resolution, role: &str) {
    if resolution.rule == RuleKind::Structural {
        tracing::warn!(
            coluna = %resolution.label,
            "coluna de {} identificada só pelo padrão estrutural; confira o resultado ou fixe o nome em config.json",
            role
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_configured_name_wins() {
        // "responsavel" não tem palavra-chave, mas está configurado
        let labels = labels(&["responsavel", "entregador antigo", "data"]);
        let resolution = resolve_courier_column(&labels, "responsavel").unwrap();
        assert_eq!(resolution.label, "responsavel");
        assert_eq!(resolution.rule, RuleKind::Configured);
    }

    #[test]
    fn test_configured_overrides_keyword_order() {
        let labels = labels(&["motoboy", "responsavel"]);
        let resolution = resolve_courier_column(&labels, "responsavel").unwrap();
        assert_eq!(resolution.label, "responsavel");
    }

    #[test]
    fn test_keyword_match() {
        let labels = labels(&["cliente", "nome do entregador responsável", "valor"]);
        let resolution = resolve_courier_column(&labels, "entregador").unwrap();
        assert_eq!(resolution.label, "nome do entregador responsável");
        assert_eq!(resolution.rule, RuleKind::Keyword);
    }

    #[test]
    fn test_structural_fallback_long_label_with_space() {
        let labels = labels(&["id", "joão da silva transportes", "valor"]);
        let resolution = resolve_courier_column(&labels, "entregador").unwrap();
        assert_eq!(resolution.label, "joão da silva transportes");
        assert_eq!(resolution.rule, RuleKind::Structural);
    }

    #[test]
    fn test_structural_rejects_placeholder() {
        let labels = labels(&["coluna_2 gerada automaticamente", "id"]);
        let result = resolve_courier_column(&labels, "entregador");
        assert!(matches!(result, Err(DispoError::ColumnNotFound(_))));
    }

    #[test]
    fn test_schedule_keyword() {
        let labels = labels(&["cliente", "data de agendamento"]);
        let resolution = resolve_schedule_column(&labels, "data_agendamento").unwrap();
        assert_eq!(resolution.label, "data de agendamento");
        assert_eq!(resolution.rule, RuleKind::Keyword);
    }

    #[test]
    fn test_schedule_structural_timestamp_shape() {
        let labels = labels(&["cliente", "25/12/2024 14:30:00 hs"]);
        let resolution = resolve_schedule_column(&labels, "data_agendamento").unwrap();
        assert_eq!(resolution.label, "25/12/2024 14:30:00 hs");
        assert_eq!(resolution.rule, RuleKind::Structural);
    }

    #[test]
    fn test_not_found_names_role() {
        let labels = labels(&["id", "valor"]);
        let err = resolve_courier_column(&labels, "").unwrap_err();
        assert!(err.to_string().contains("entregador"));
        let err = resolve_schedule_column(&labels, "").unwrap_err();
        assert!(err.to_string().contains("data de agendamento"));
    }
}
