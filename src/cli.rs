use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "disponibilidade")]
#[command(about = "Análise de disponibilidade de motoboys (relatórios Excel e PDF)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log detalhado
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Arquivo de configuração
    #[arg(short, long, global = true, default_value = "config.json")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calcula a disponibilidade e gera os relatórios
    Executar {
        /// Planilha de cadastro (padrão: configuração)
        #[arg(long)]
        cadastro: Option<PathBuf>,

        /// Planilha de agendamento (padrão: configuração)
        #[arg(long)]
        agendamento: Option<PathBuf>,

        /// Data a analisar, dd/mm/aaaa (repetível; sem datas → modo interativo)
        #[arg(short, long = "data")]
        datas: Vec<String>,

        /// Formato de saída (excel/pdf/both)
        #[arg(short, long, default_value = "both")]
        formato: ReportFormat,

        /// Diretório de saída dos relatórios
        #[arg(short, long)]
        saida: Option<PathBuf>,
    },

    /// Mostra as colunas identificadas na planilha de agendamento
    Colunas {
        /// Planilha de agendamento (padrão: configuração)
        #[arg(long)]
        agendamento: Option<PathBuf>,
    },

    /// Exibe ou grava o arquivo de configuração
    Config {
        /// Mostra a configuração efetiva
        #[arg(long)]
        show: bool,

        /// Grava o arquivo de configuração com os padrões
        #[arg(long)]
        init: bool,
    },

    /// Gera planilhas de exemplo para experimentar o fluxo
    Exemplos {
        /// Diretório de destino
        #[arg(short, long, default_value = "exemplos")]
        saida: PathBuf,
    },
}

#[derive(Clone, Debug, Default)]
pub enum ReportFormat {
    Excel,
    Pdf,
    #[default]
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "pdf" => Ok(ReportFormat::Pdf),
            "both" | "ambos" => Ok(ReportFormat::Both),
            _ => Err(format!("Formato desconhecido: {}. Use excel, pdf ou both", s)),
        }
    }
}
