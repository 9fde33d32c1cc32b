use clap::Parser;
use disponibilidade_motoboys::{
    availability, cli, config, error, export, logger, prompt, registry, resolver, samples,
    schedule, sheet,
};

use cli::{Cli, Commands};
use config::Config;
use error::{DispoError, Result};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::error!(erro = %e, "execução abortada");
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config);

    match cli.command {
        Commands::Executar { cadastro, agendamento, datas, formato, saida } => {
            println!("🚚 Disponibilidade de Motoboys v2.0\n");

            let registry_path = resolve_input(cadastro, &config.files.registry, "cadastro")?;
            let bookings_path = resolve_input(agendamento, &config.files.bookings, "agendamento")?;

            // 1. Planilhas
            println!("[1/3] Carregando planilhas...");
            let registry_table = sheet::load_table(&registry_path, 0)?;
            let registry =
                registry::Registry::from_table(&registry_table, &config.sheet.registry_columns)?;
            println!("✔ {} motoboys no cadastro", registry.len());

            let bookings_table = sheet::load_table(&bookings_path, config.sheet.bookings_header)?;
            let schedule = schedule::Schedule::from_table(
                &bookings_table,
                &config.sheet.courier_column,
                &config.sheet.schedule_column,
            )?;
            println!(
                "✔ {} agendamentos (colunas: {} / {})\n",
                schedule.bookings.len(),
                schedule.courier_column,
                schedule.schedule_column
            );

            // 2. Datas selecionadas + cálculo
            println!("[2/3] Calculando disponibilidade...");
            let raw_dates = if datas.is_empty() {
                prompt::prompt_dates(&config.report.date_format)?
            } else {
                datas
            };
            let dates = availability::parse_dates(&raw_dates, &config.report.date_format);
            if dates.is_empty() {
                return Err(DispoError::NoDatesSelected);
            }

            let result = availability::compute(&registry, &schedule, &dates);
            if result.is_empty() {
                println!("\nNão há motoboys disponíveis nas datas selecionadas!");
                return Ok(());
            }
            println!("✔ {} data(s) com motoboys disponíveis\n", result.len());

            // 3. Relatórios
            println!("[3/3] Gerando relatórios...");
            let output_dir = saida.unwrap_or_else(|| PathBuf::from("."));
            export::generate_reports(
                &result,
                &registry.columns,
                &formato,
                &output_dir,
                &config.report,
            )?;

            println!("\n✅ Concluído");
        }

        Commands::Colunas { agendamento } => {
            let bookings_path = resolve_input(agendamento, &config.files.bookings, "agendamento")?;
            let table = sheet::load_table(&bookings_path, config.sheet.bookings_header)?;

            println!("Colunas de {}:", bookings_path.display());
            for label in &table.labels {
                println!("  - {}", label);
            }
            println!();

            let courier =
                resolver::resolve_courier_column(&table.labels, &config.sheet.courier_column)?;
            let scheduled =
                resolver::resolve_schedule_column(&table.labels, &config.sheet.schedule_column)?;
            println!("Entregador: {} (regra: {})", courier.label, courier.rule);
            println!("Data:       {} (regra: {})", scheduled.label, scheduled.rule);
        }

        Commands::Config { show, init } => {
            if init {
                config.save(&cli.config)?;
                println!("✔ Configuração gravada em {}", cli.config.display());
            }
            if show || !init {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }

        Commands::Exemplos { saida } => {
            println!("📋 Gerando planilhas de exemplo...");
            for path in samples::write_samples(&saida)? {
                println!("✔ {}", path.display());
            }
            println!("\n💡 Use-as como referência do formato esperado.");
        }
    }

    Ok(())
}

/// Caminho de entrada: argumento > configuração; se o arquivo da
/// configuração não existir, pergunta ao usuário.
fn resolve_input(arg: Option<PathBuf>, configured: &str, role: &str) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    let configured_path = PathBuf::from(configured);
    if configured_path.exists() {
        return Ok(configured_path);
    }
    prompt::prompt_file(role, configured)
}
