//! Relatório Excel: uma aba por data

use crate::availability::Availability;
use crate::error::{DispoError, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

/// Caracteres proibidos em nome de aba (e inconvenientes em caminhos).
const UNSAFE_SHEET_CHARS: &[char] = &['/', '\\', '?', '*', '[', ']', ':', '\''];

/// Limite do formato xlsx para nome de aba.
const SHEET_NAME_MAX: usize = 31;

/// Nome de aba derivado da data formatada: `10/01/2024` → `10_01_2024`.
pub fn sheet_name_for(formatted_date: &str) -> String {
    let mut name: String = formatted_date
        .chars()
        .map(|c| if UNSAFE_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    name.truncate(SHEET_NAME_MAX);
    name
}

pub fn generate_excel(
    availability: &Availability,
    columns: &[String],
    output_path: &Path,
    date_format: &str,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9D9D9))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let value_format = Format::new()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    for (date, couriers) in availability {
        let formatted = date.format(date_format).to_string();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name_for(&formatted))
            .map_err(|e| DispoError::ExcelGeneration(format!("nome de aba: {}", e)))?;

        for (col, label) in columns.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, 22.0)
                .map_err(|e| DispoError::ExcelGeneration(format!("largura de coluna: {}", e)))?;
            worksheet
                .write_string_with_format(0, col as u16, label.as_str(), &header_format)
                .map_err(|e| DispoError::ExcelGeneration(format!("cabeçalho: {}", e)))?;
        }

        for (row, courier) in couriers.iter().enumerate() {
            for (col, label) in columns.iter().enumerate() {
                let value = courier.field(label).unwrap_or_default();
                worksheet
                    .write_string_with_format((row + 1) as u32, col as u16, value, &value_format)
                    .map_err(|e| {
                        DispoError::ExcelGeneration(format!("linha {}: {}", row + 1, e))
                    })?;
            }
        }
    }

    workbook
        .save(output_path)
        .map_err(|e| DispoError::ExcelGeneration(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_replaces_unsafe_chars() {
        assert_eq!(sheet_name_for("10/01/2024"), "10_01_2024");
        assert_eq!(sheet_name_for("2024: [jan]"), "2024_ _jan_");
    }

    #[test]
    fn test_sheet_name_truncated() {
        let long = "a".repeat(40);
        assert_eq!(sheet_name_for(&long).len(), SHEET_NAME_MAX);
    }
}
