use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Arquivo de log no diretório de trabalho.
pub const LOG_FILE: &str = "disponibilidade_motoboys.log";

/// Log em dois destinos: console compacto + arquivo de auditoria.
/// Sem permissão de escrita no arquivo, fica só o console.
pub fn init(verbose: bool) {
    let directives = if verbose {
        "disponibilidade_motoboys=debug,disponibilidade=debug"
    } else {
        "disponibilidade_motoboys=info,disponibilidade=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let registry = tracing_subscriber::registry().with(filter).with(console);

    match std::fs::OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file));
            registry.with(file_layer).init();
        }
        Err(e) => {
            registry.init();
            tracing::warn!(erro = %e, "sem acesso a {}; log apenas no console", LOG_FILE);
        }
    }
}
