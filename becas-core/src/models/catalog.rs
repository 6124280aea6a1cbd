use std::collections::BTreeMap;

use crate::error::ConfigurationError;
use crate::models::{DiscountTable, TabuladorId};

/// Every discount table the institution uses, keyed by tabulador.
///
/// Built once from static configuration and read-only afterwards; the engine
/// borrows it rather than reaching for a global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabuladorCatalog {
    tables: BTreeMap<TabuladorId, DiscountTable>,
}

impl TabuladorCatalog {
    /// Builds a catalog from `(id, table)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateTabulador`] if an id repeats.
    pub fn from_tables<I>(tables: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (TabuladorId, DiscountTable)>,
    {
        let mut map = BTreeMap::new();
        for (id, table) in tables {
            if map.insert(id, table).is_some() {
                return Err(ConfigurationError::DuplicateTabulador(id));
            }
        }
        Ok(Self { tables: map })
    }

    /// Resolves `id` to its table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownTabulador`] when absent; there is
    /// no fallback table.
    pub fn get(
        &self,
        id: TabuladorId,
    ) -> Result<&DiscountTable, ConfigurationError> {
        self.tables
            .get(&id)
            .ok_or(ConfigurationError::UnknownTabulador(id))
    }

    pub fn contains(
        &self,
        id: TabuladorId,
    ) -> bool {
        self.tables.contains_key(&id)
    }

    /// Identifiers in ascending cap order.
    pub fn ids(&self) -> impl Iterator<Item = TabuladorId> + '_ {
        self.tables.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TabuladorId, &DiscountTable)> {
        self.tables.iter().map(|(id, table)| (*id, table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
