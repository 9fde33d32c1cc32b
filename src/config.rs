use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use serde_json::Value;
use std::path::Path;

use crate::error::Result;

/// Configuração da aplicação (`config.json` no diretório de trabalho).
///
/// As chaves do arquivo seguem o vocabulário das planilhas
/// (cadastro/agendamento); arquivo ausente usa os padrões embutidos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(rename = "arquivos")]
    pub files: FilesConfig,
    #[serde(rename = "planilha")]
    pub sheet: SheetConfig,
    #[serde(rename = "relatorio")]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilesConfig {
    /// Planilha de cadastro dos motoboys.
    #[serde(rename = "cadastro")]
    pub registry: String,
    /// Planilha de agendamento (pedidos).
    #[serde(rename = "agendamento")]
    pub bookings: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetConfig {
    /// Linhas de preâmbulo antes do cabeçalho na planilha de pedidos.
    #[serde(rename = "header_agendamento")]
    pub bookings_header: usize,
    /// Colunas do cadastro projetadas nos relatórios.
    #[serde(rename = "colunas_cadastro")]
    pub registry_columns: Vec<String>,
    /// Nome fixo da coluna do entregador (prioridade sobre a heurística).
    #[serde(rename = "coluna_entregador")]
    pub courier_column: String,
    /// Nome fixo da coluna de data do agendamento.
    #[serde(rename = "coluna_data")]
    pub schedule_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(rename = "formato_data")]
    pub date_format: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "nome_excel")]
    pub excel_name: String,
    #[serde(rename = "nome_pdf")]
    pub pdf_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: FilesConfig {
                registry: "Entregadores.xlsx".into(),
                bookings: "Pedidos.xls".into(),
            },
            sheet: SheetConfig {
                bookings_header: 3,
                registry_columns: vec![
                    "nome".into(),
                    "telefone".into(),
                    "cidade".into(),
                    "bairro".into(),
                    "cep".into(),
                ],
                courier_column: "entregador".into(),
                schedule_column: "data_agendamento".into(),
            },
            report: ReportConfig {
                date_format: "%d/%m/%Y".into(),
                title: "Relatório de Motoboys Disponíveis".into(),
                excel_name: "Motoboys_Nao_Escalados.xlsx".into(),
                pdf_name: "Motoboys_Nao_Escalados.pdf".into(),
            },
        }
    }
}

impl Config {
    /// Carrega `path` mesclando sobre os padrões, chave a chave.
    ///
    /// Arquivo ausente ou ilegível não é fatal: fica o padrão, com
    /// aviso no log.
    pub fn load(path: &Path) -> Self {
        let defaults = Config::default();
        if !path.exists() {
            return defaults;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(arquivo = %path.display(), erro = %e, "configuração ilegível; usando padrões");
                return defaults;
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(user) => defaults.merged_with(user),
            Err(e) => {
                tracing::warn!(arquivo = %path.display(), erro = %e, "configuração inválida; usando padrões");
                defaults
            }
        }
    }

    /// Grava a configuração efetiva em `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn merged_with(self, user: Value) -> Config {
        let Ok(mut base) = serde_json::to_value(&self) else {
            return self;
        };
        merge_value(&mut base, user);
        match serde_json::from_value(base) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(erro = %e, "configuração com tipos inesperados; usando padrões");
                self
            }
        }
    }
}

/// Mescla recursiva: chave do usuário sobrescreve a do padrão; objetos
/// são mesclados chave a chave, o resto é substituído inteiro.
fn merge_value(base: &mut Value, user: Value) {
    match (base, user) {
        (Value::Object(base_map), Value::Object(user_map)) => {
            for (key, value) in user_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut entry) => merge_value(entry.get_mut(), value),
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/inexistente/config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "arquivos": { "agendamento": "Pedidos_2024.xlsx" }, "planilha": { "header_agendamento": 0 } }"#,
        )
        .unwrap();

        let config = Config::load(&path);
        assert_eq!(config.files.bookings, "Pedidos_2024.xlsx");
        assert_eq!(config.files.registry, "Entregadores.xlsx");
        assert_eq!(config.sheet.bookings_header, 0);
        assert_eq!(config.sheet.courier_column, "entregador");
    }

    #[test]
    fn test_invalid_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ isso não é json").unwrap();

        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_merge_is_recursive_and_keeps_unknown_keys() {
        let mut base = json!({"a": {"b": 1, "c": 2}, "d": 3});
        merge_value(&mut base, json!({"a": {"c": 9, "novo": true}}));
        assert_eq!(base, json!({"a": {"b": 1, "c": 9, "novo": true}, "d": 3}));
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::default();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path), config);
    }
}
