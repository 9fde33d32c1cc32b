use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispoError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Erro ao ler planilha: {0}")]
    SheetRead(String),

    #[error("Coluna não encontrada: {0}")]
    ColumnNotFound(String),

    #[error("Data inválida: {0} (esperado dd/mm/aaaa)")]
    DateParse(String),

    #[error("Nenhuma data válida selecionada")]
    NoDatesSelected,

    #[error("Erro ao gerar Excel: {0}")]
    ExcelGeneration(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfGeneration(String),

    #[error("Erro de entrada interativa: {0}")]
    Prompt(String),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DispoError>;
