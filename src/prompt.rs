//! Entrada interativa
//!
//! Sem interface gráfica: a seleção de datas e a confirmação dos
//! arquivos de entrada acontecem no terminal.

use crate::error::{DispoError, Result};
use chrono::NaiveDate;
use dialoguer::Input;
use std::path::PathBuf;

/// Laço de entrada de datas: uma por linha, linha vazia encerra.
/// Data ilegível só gera aviso; repetida é ignorada.
pub fn prompt_dates(date_format: &str) -> Result<Vec<String>> {
    println!("Informe as datas a analisar (dd/mm/aaaa). Linha vazia encerra.");

    let mut dates: Vec<String> = Vec::new();
    loop {
        let raw: String = Input::new()
            .with_prompt(format!("Data {}", dates.len() + 1))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| DispoError::Prompt(e.to_string()))?;

        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() {
            break;
        }
        if NaiveDate::parse_from_str(&trimmed, date_format).is_err() {
            println!("  ✗ data inválida, use dd/mm/aaaa");
            continue;
        }
        if dates.contains(&trimmed) {
            println!("  ✗ data já selecionada");
            continue;
        }
        println!("  ✔ {}", trimmed);
        dates.push(trimmed);
    }

    Ok(dates)
}

/// Pede o caminho de uma planilha quando o configurado não existe.
pub fn prompt_file(role: &str, default: &str) -> Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt(format!("Planilha de {}", role))
        .default(default.to_string())
        .interact_text()
        .map_err(|e| DispoError::Prompt(e.to_string()))?;

    Ok(PathBuf::from(raw.trim()))
}
