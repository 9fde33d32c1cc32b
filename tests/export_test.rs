//! Geração de relatórios Excel e PDF

use chrono::NaiveDate;
use disponibilidade_motoboys::availability::Availability;
use disponibilidade_motoboys::cli::ReportFormat;
use disponibilidade_motoboys::config::ReportConfig;
use disponibilidade_motoboys::export::{self, excel, pdf};
use disponibilidade_motoboys::registry::Courier;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn courier(name: &str, district: &str) -> Courier {
    Courier {
        name: name.into(),
        phone: "11999999999".into(),
        city: "São Paulo".into(),
        district: district.into(),
        postal_code: "01234-567".into(),
    }
}

fn columns() -> Vec<String> {
    vec!["nome".into(), "telefone".into(), "bairro".into()]
}

fn sample_availability() -> Availability {
    let mut availability = Availability::new();
    availability.insert(
        date(2024, 1, 10),
        vec![courier("bob tavares", "Moema"), courier("carol nunes", "Pinheiros")],
    );
    availability.insert(date(2024, 1, 11), vec![courier("alice mendes", "Centro")]);
    availability
}

fn report_config() -> ReportConfig {
    ReportConfig {
        date_format: "%d/%m/%Y".into(),
        title: "Relatório de Motoboys Disponíveis".into(),
        excel_name: "Motoboys_Nao_Escalados.xlsx".into(),
        pdf_name: "Motoboys_Nao_Escalados.pdf".into(),
    }
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("saida.xlsx");

    let result = excel::generate_excel(&sample_availability(), &columns(), &path, "%d/%m/%Y");
    assert!(result.is_ok(), "geração de Excel falhou: {:?}", result.err());
    assert!(path.exists());

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0, "arquivo Excel vazio");
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("saida.pdf");

    let result = pdf::generate_pdf(
        &sample_availability(),
        &columns(),
        &path,
        "%d/%m/%Y",
        "Relatório de Motoboys Disponíveis",
    );
    assert!(result.is_ok(), "geração de PDF falhou: {:?}", result.err());
    assert!(path.exists());

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0, "arquivo PDF vazio");
}

#[test]
fn test_pdf_paginates_many_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("longo.pdf");

    let mut availability = Availability::new();
    let many: Vec<Courier> = (0..120)
        .map(|i| courier(&format!("entregador {}", i), "Centro"))
        .collect();
    availability.insert(date(2024, 1, 10), many);

    let result = pdf::generate_pdf(&availability, &columns(), &path, "%d/%m/%Y", "Relatório");
    assert!(result.is_ok(), "PDF longo falhou: {:?}", result.err());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_both_reports_via_dispatch() {
    let dir = tempdir().unwrap();

    let written = export::generate_reports(
        &sample_availability(),
        &columns(),
        &ReportFormat::Both,
        dir.path(),
        &report_config(),
    )
    .unwrap();

    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|p| p.exists()));
    assert!(written[0].ends_with("Motoboys_Nao_Escalados.xlsx"));
    assert!(written[1].ends_with("Motoboys_Nao_Escalados.pdf"));
}

#[test]
fn test_empty_availability_writes_nothing() {
    let dir = tempdir().unwrap();

    let written = export::generate_reports(
        &Availability::new(),
        &columns(),
        &ReportFormat::Both,
        dir.path(),
        &report_config(),
    )
    .unwrap();

    assert!(written.is_empty());
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_excel_single_format_dispatch() {
    let dir = tempdir().unwrap();

    let written = export::generate_reports(
        &sample_availability(),
        &columns(),
        &ReportFormat::Excel,
        dir.path(),
        &report_config(),
    )
    .unwrap();

    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with("Motoboys_Nao_Escalados.xlsx"));
}
