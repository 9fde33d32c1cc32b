pub mod excel;
pub mod pdf;

use crate::availability::Availability;
use crate::cli::ReportFormat;
use crate::config::ReportConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Gera os relatórios no formato pedido e devolve os caminhos gravados.
///
/// Mapa vazio não gera arquivo nenhum: relatório não ganha seção
/// "zero disponíveis".
pub fn generate_reports(
    availability: &Availability,
    columns: &[String],
    format: &ReportFormat,
    output_dir: &Path,
    report: &ReportConfig,
) -> Result<Vec<PathBuf>> {
    if availability.is_empty() {
        return Ok(Vec::new());
    }
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)?;
    }

    let mut written = Vec::new();

    if matches!(format, ReportFormat::Excel | ReportFormat::Both) {
        let path = output_dir.join(&report.excel_name);
        println!("- Gerando Excel...");
        excel::generate_excel(availability, columns, &path, &report.date_format)?;
        println!("✔ Excel: {}", path.display());
        written.push(path);
    }

    if matches!(format, ReportFormat::Pdf | ReportFormat::Both) {
        let path = output_dir.join(&report.pdf_name);
        println!("- Gerando PDF...");
        pdf::generate_pdf(availability, columns, &path, &report.date_format, &report.title)?;
        println!("✔ PDF: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
