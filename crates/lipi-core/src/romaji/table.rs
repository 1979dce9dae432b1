use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::config::{parse_table_toml, RomanTableError, TableEntry};
use super::trie::{RomanTrie, TrieLookupResult};

pub const DEFAULT_TOML: &str = include_str!("default_table.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Lookup result with the matched entry resolved.
#[derive(Debug, PartialEq)]
pub enum TableLookup<'a> {
    None,
    Prefix,
    Exact(&'a TableEntry),
    ExactAndPrefix(&'a TableEntry),
}

/// A parsed romanization table indexed by a byte trie.
#[derive(Debug)]
pub struct RomanTable {
    entries: Vec<TableEntry>,
    trie: RomanTrie,
}

impl RomanTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomanTableError> {
        // Validate eagerly
        parse_table_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomanTableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomanTable {
        Self::instance()
    }

    /// Shared handle to the global singleton.
    pub fn shared() -> Arc<RomanTable> {
        Arc::clone(Self::instance())
    }

    fn instance() -> &'static Arc<RomanTable> {
        static INSTANCE: OnceLock<Arc<RomanTable>> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            Arc::new(RomanTable::from_toml(toml_str).expect("romanization TOML must be valid"))
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RomanTableError> {
        Ok(Self::from_entries(parse_table_toml(toml_str)?))
    }

    /// Build from entries in declaration order. Duplicate keys keep the
    /// first declaration.
    pub fn from_entries(entries: Vec<TableEntry>) -> Self {
        let mut trie = RomanTrie::new();
        for (id, entry) in entries.iter().enumerate() {
            if !trie.insert(&entry.roman, id) {
                debug!(roman = %entry.roman, "duplicate roman key ignored");
            }
        }
        Self { entries, trie }
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn lookup(&self, roman: &str) -> TableLookup<'_> {
        match self.trie.lookup(roman) {
            TrieLookupResult::None => TableLookup::None,
            TrieLookupResult::Prefix => TableLookup::Prefix,
            TrieLookupResult::Exact(id) => TableLookup::Exact(&self.entries[id]),
            TrieLookupResult::ExactAndPrefix(id) => TableLookup::ExactAndPrefix(&self.entries[id]),
        }
    }

    /// Longest entry whose key starts `input`, with its byte length.
    pub fn longest_match(&self, input: &str) -> Option<(usize, &TableEntry)> {
        self.trie
            .longest_match(input)
            .map(|(len, id)| (len, &self.entries[id]))
    }
}

/// Returns the embedded default table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
