//! Roman-to-Devanagari conversion engine.
//!
//! A trie-indexed table maps Latin keystroke sequences to Devanagari
//! letters, vowel signs and marks; `convert` applies the combining rules
//! (halant for conjuncts, dependent vowel signs) over the matched tokens.

mod config;
mod convert;
mod table;
mod trie;

pub use config::{parse_table_toml, RomanTableError, TableEntry, TokenKind};
pub use convert::{convert, convert_with, HALANT};
pub use table::{default_toml, RomanTable, TableLookup, DEFAULT_TOML};
pub use trie::{RomanTrie, TrieLookupResult};
