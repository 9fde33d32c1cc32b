//! Planilhas de exemplo
//!
//! Gera um cadastro e uma exportação de pedidos com a mesma forma dos
//! arquivos reais (inclusive o preâmbulo antes do cabeçalho), para
//! experimentar o fluxo completo sem dados de produção.

use crate::error::{DispoError, Result};
use chrono::{Duration, Local};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

const SAMPLE_COURIERS: &[(&str, &str, &str, &str, &str)] = &[
    ("João Silva", "11999999999", "São Paulo", "Centro", "01234-567"),
    ("Maria Santos", "11888888888", "São Paulo", "Vila Madalena", "05433-000"),
    ("Pedro Oliveira", "11777777777", "São Paulo", "Moema", "04038-001"),
    ("Ana Costa", "11666666666", "São Paulo", "Itaim Bibi", "04530-001"),
    ("Carlos Ferreira", "11555555555", "São Paulo", "Pinheiros", "05422-000"),
    ("Lucia Rodrigues", "11444444444", "São Paulo", "Consolação", "01302-000"),
    ("Roberto Alves", "11333333333", "São Paulo", "Liberdade", "01508-000"),
    ("Fernanda Lima", "11222222222", "São Paulo", "Perdizes", "01234-000"),
    ("Marcos Pereira", "11111111111", "São Paulo", "Santana", "02012-000"),
    ("Patricia Souza", "11000000000", "São Paulo", "Tatuapé", "03087-000"),
];

/// Quantas linhas de preâmbulo a exportação de pedidos real carrega.
const BOOKINGS_PREAMBLE_ROWS: u32 = 3;

/// Gera as duas planilhas em `dir` e devolve os caminhos.
pub fn write_samples(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let registry_path = dir.join("Entregadores_Exemplo.xlsx");
    write_registry_sample(&registry_path)?;

    let bookings_path = dir.join("Pedidos_Exemplo.xlsx");
    write_bookings_sample(&bookings_path)?;

    Ok(vec![registry_path, bookings_path])
}

fn write_registry_sample(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = ["Nome", "Telefone", "Cidade", "Bairro", "CEP"];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).map_err(sample_err)?;
    }

    for (row, courier) in SAMPLE_COURIERS.iter().enumerate() {
        let r = (row + 1) as u32;
        worksheet.write_string(r, 0, courier.0).map_err(sample_err)?;
        worksheet.write_string(r, 1, courier.1).map_err(sample_err)?;
        worksheet.write_string(r, 2, courier.2).map_err(sample_err)?;
        worksheet.write_string(r, 3, courier.3).map_err(sample_err)?;
        worksheet.write_string(r, 4, courier.4).map_err(sample_err)?;
    }

    workbook.save(path).map_err(sample_err)?;
    Ok(())
}

fn write_bookings_sample(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "Relatório de Pedidos").map_err(sample_err)?;
    worksheet.write_string(1, 0, "Exportação automática").map_err(sample_err)?;

    let headers = ["Data de Agendamento", "Entregador", "Cliente", "Endereço", "Valor"];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(BOOKINGS_PREAMBLE_ROWS, col as u16, *header)
            .map_err(sample_err)?;
    }

    // 3 entregadores escalados por dia, nos próximos 3 dias
    let today = Local::now().date_naive();
    let mut row = BOOKINGS_PREAMBLE_ROWS + 1;
    for day in 0..3i64 {
        let date = today + Duration::days(day);
        for slot in 0..3usize {
            let idx = (day as usize * 3 + slot) % SAMPLE_COURIERS.len();
            let hour = 8 + slot * 2;
            let client = (b'A' + idx as u8) as char;
            worksheet
                .write_string(row, 0, format!("{} {:02}:00", date.format("%d/%m/%Y"), hour))
                .map_err(sample_err)?;
            worksheet
                .write_string(row, 1, SAMPLE_COURIERS[idx].0.to_lowercase())
                .map_err(sample_err)?;
            worksheet
                .write_string(row, 2, format!("Cliente {}", client))
                .map_err(sample_err)?;
            worksheet
                .write_string(row, 3, format!("Rua {} {}", client, 100 + idx))
                .map_err(sample_err)?;
            worksheet
                .write_number(row, 4, 20.0 + idx as f64 * 2.5)
                .map_err(sample_err)?;
            row += 1;
        }
    }

    workbook.save(path).map_err(sample_err)?;
    Ok(())
}

fn sample_err(e: rust_xlsxwriter::XlsxError) -> DispoError {
    DispoError::ExcelGeneration(e.to_string())
}
