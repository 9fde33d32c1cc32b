//! Normalização de chaves de comparação
//!
//! Os nomes vêm de planilhas preenchidas à mão: espaço sobrando e caixa
//! inconsistente são a regra, não a exceção. Toda comparação entre
//! cadastro e agendamento passa por `normalize_key` antes.

use crate::sheet::Cell;

/// Chave canônica de comparação: sem espaços nas pontas, minúscula.
///
/// Idempotente: normalizar uma chave já normalizada devolve o mesmo valor.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Variante para células: valor ausente vira chave vazia.
pub fn normalize_cell(cell: &Cell) -> String {
    normalize_key(&cell.to_text())
}
