//! Leitura de planilhas (xls/xlsx) como tabelas genéricas
//!
//! A planilha de agendamento vem de uma ferramenta de pedidos externa,
//! com cabeçalhos instáveis; aqui só se padroniza o rótulo
//! (trim + minúscula) e se preenche cabeçalho vazio com um marcador
//! `coluna_N`. Quem decide o papel de cada coluna é o `resolver`.

use crate::error::{DispoError, Result};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDateTime;
use std::path::Path;

/// Prefixo dos rótulos gerados para cabeçalhos vazios.
pub const PLACEHOLDER_PREFIX: &str = "coluna_";

/// Valor de uma célula já convertido para o modelo da aplicação.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Representação textual para relatórios.
    ///
    /// Número inteiro sai sem casa decimal; telefone lido como número
    /// voltaria como `11999999999.0` sem isso.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Tabela carregada: rótulos padronizados + linhas de células.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub labels: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            data.as_datetime().map(Cell::DateTime).unwrap_or(Cell::Empty)
        }
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

/// Rótulos de cabeçalho padronizados: trim + minúscula, marcador para
/// célula vazia, sufixo numérico para repetição.
fn build_labels(header: &[Cell]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(header.len());
    for (i, cell) in header.iter().enumerate() {
        let raw = cell.to_text().trim().to_lowercase();
        let base = if raw.is_empty() {
            format!("{}{}", PLACEHOLDER_PREFIX, i)
        } else {
            raw
        };
        let mut label = base.clone();
        let mut n = 2;
        while labels.contains(&label) {
            label = format!("{}_{}", base, n);
            n += 1;
        }
        labels.push(label);
    }
    labels
}

/// Carrega a primeira aba de `path`.
///
/// `header_offset` linhas são descartadas antes do cabeçalho; a
/// exportação de pedidos traz 3 linhas de preâmbulo antes dos títulos.
pub fn load_table(path: &Path, header_offset: usize) -> Result<Table> {
    if !path.exists() {
        return Err(DispoError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DispoError::SheetRead(format!("{}: {}", path.display(), e)))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DispoError::SheetRead(format!("{}: planilha sem abas", path.display())))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| DispoError::SheetRead(format!("{}: {}", path.display(), e)))?;

    let mut rows_iter = range.rows().skip(header_offset);
    let header: Vec<Cell> = rows_iter
        .next()
        .ok_or_else(|| {
            DispoError::SheetRead(format!("{}: sem linha de cabeçalho", path.display()))
        })?
        .iter()
        .map(convert)
        .collect();
    let labels = build_labels(&header);

    let mut rows = Vec::new();
    for row in rows_iter {
        let mut cells: Vec<Cell> = row.iter().map(convert).collect();
        cells.resize(labels.len(), Cell::Empty);
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        rows.push(cells);
    }

    tracing::debug!(
        arquivo = %path.display(),
        aba = %sheet_name,
        colunas = labels.len(),
        linhas = rows.len(),
        "planilha carregada"
    );

    Ok(Table { labels, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_trim_lowercase() {
        let header = vec![
            Cell::Text("  Nome ".into()),
            Cell::Text("TELEFONE".into()),
        ];
        assert_eq!(build_labels(&header), vec!["nome", "telefone"]);
    }

    #[test]
    fn test_labels_placeholder_for_empty() {
        let header = vec![Cell::Text("nome".into()), Cell::Empty, Cell::Empty];
        assert_eq!(build_labels(&header), vec!["nome", "coluna_1", "coluna_2"]);
    }

    #[test]
    fn test_labels_duplicates_suffixed() {
        let header = vec![
            Cell::Text("data".into()),
            Cell::Text("Data".into()),
            Cell::Text("DATA".into()),
        ];
        assert_eq!(build_labels(&header), vec!["data", "data_2", "data_3"]);
    }

    #[test]
    fn test_phone_number_without_decimal() {
        assert_eq!(Cell::Number(11999999999.0).to_text(), "11999999999");
        assert_eq!(Cell::Number(25.5).to_text(), "25.5");
    }

    #[test]
    fn test_empty_cell_text() {
        assert_eq!(Cell::Empty.to_text(), "");
    }

    #[test]
    fn test_load_table_missing_file() {
        let result = load_table(Path::new("/inexistente/Pedidos.xls"), 0);
        assert!(matches!(result, Err(DispoError::FileNotFound(_))));
    }
}
