//! Cadastro de motoboys
//!
//! Carregado uma vez por execução e imutável depois; a identidade de um
//! motoboy é o nome normalizado.

use crate::error::{DispoError, Result};
use crate::normalizer::normalize_key;
use crate::sheet::{Cell, Table};

/// Coluna obrigatória do cadastro.
pub const NAME_COLUMN: &str = "nome";

/// Colunas do cadastro que os relatórios sabem projetar.
pub const KNOWN_COLUMNS: &[&str] = &["nome", "telefone", "cidade", "bairro", "cep"];

/// Motoboy cadastrado.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Courier {
    /// Nome normalizado (chave de comparação).
    pub name: String,
    pub phone: String,
    pub city: String,
    pub district: String,
    pub postal_code: String,
}

impl Courier {
    /// Valor do campo correspondente ao rótulo de coluna do cadastro.
    pub fn field(&self, label: &str) -> Option<&str> {
        match label {
            "nome" => Some(&self.name),
            "telefone" => Some(&self.phone),
            "cidade" => Some(&self.city),
            "bairro" => Some(&self.district),
            "cep" => Some(&self.postal_code),
            _ => None,
        }
    }
}

/// Cadastro completo.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Motoboys na ordem da planilha.
    pub couriers: Vec<Courier>,
    /// Colunas projetadas nos relatórios: ordem da configuração,
    /// restritas às que existem na planilha.
    pub columns: Vec<String>,
}

impl Registry {
    /// Monta o cadastro a partir da tabela carregada.
    ///
    /// `projected` é a lista de colunas configurada para os relatórios
    /// (`planilha.colunas_cadastro`); entradas ausentes da planilha ou
    /// desconhecidas são descartadas em silêncio, como campos opcionais.
    pub fn from_table(table: &Table, projected: &[String]) -> Result<Self> {
        let name_idx = table
            .column_index(NAME_COLUMN)
            .ok_or_else(|| DispoError::ColumnNotFound(format!("'{}' (cadastro)", NAME_COLUMN)))?;

        let phone_idx = table.column_index("telefone");
        let city_idx = table.column_index("cidade");
        let district_idx = table.column_index("bairro");
        let postal_idx = table.column_index("cep");

        let text_at = |row: &[Cell], idx: Option<usize>| -> String {
            idx.and_then(|i| row.get(i)).map(Cell::to_text).unwrap_or_default()
        };

        let mut couriers = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let name = normalize_key(&text_at(row, Some(name_idx)));
            if name.is_empty() {
                // linha sem nome não identifica ninguém
                continue;
            }
            couriers.push(Courier {
                name,
                phone: text_at(row, phone_idx),
                city: text_at(row, city_idx),
                district: text_at(row, district_idx),
                postal_code: text_at(row, postal_idx),
            });
        }

        let columns: Vec<String> = projected
            .iter()
            .map(|c| normalize_key(c))
            .filter(|c| KNOWN_COLUMNS.contains(&c.as_str()) && table.column_index(c).is_some())
            .collect();

        tracing::info!(motoboys = couriers.len(), "cadastro processado");

        Ok(Self { couriers, columns })
    }

    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }
}
