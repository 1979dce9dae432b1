use serde::Deserialize;

/// Grammatical role of a table entry, driving the combining rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A consonant letter (or a precomposed conjunct such as क्ष).
    Consonant(String),
    /// A vowel with its independent form and its dependent sign.
    /// The sign is empty for the inherent vowel.
    Vowel { independent: String, sign: String },
    /// Anusvara, chandrabindu, visarga.
    Mark(String),
    /// Punctuation and digits.
    Symbol(String),
}

/// One row of the romanization table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub roman: String,
    pub kind: TokenKind,
}

#[derive(Deserialize)]
struct RomanConfig {
    #[serde(default)]
    consonants: Vec<(String, String)>,
    #[serde(default)]
    vowels: Vec<(String, String, String)>,
    #[serde(default)]
    marks: Vec<(String, String)>,
    #[serde(default)]
    symbols: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomanTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("romanization table is empty")]
    Empty,
    #[error("empty roman key")]
    EmptyKey,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("romanization table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into table entries, preserving declaration order.
pub fn parse_table_toml(toml_str: &str) -> Result<Vec<TableEntry>, RomanTableError> {
    let config: RomanConfig =
        toml::from_str(toml_str).map_err(|e| RomanTableError::Parse(e.to_string()))?;

    let mut entries = Vec::with_capacity(
        config.consonants.len() + config.vowels.len() + config.marks.len() + config.symbols.len(),
    );
    for (roman, letter) in config.consonants {
        entries.push(TableEntry {
            roman,
            kind: TokenKind::Consonant(letter),
        });
    }
    for (roman, independent, sign) in config.vowels {
        entries.push(TableEntry {
            roman,
            kind: TokenKind::Vowel { independent, sign },
        });
    }
    for (roman, mark) in config.marks {
        entries.push(TableEntry {
            roman,
            kind: TokenKind::Mark(mark),
        });
    }
    for (roman, symbol) in config.symbols {
        entries.push(TableEntry {
            roman,
            kind: TokenKind::Symbol(symbol),
        });
    }

    if entries.is_empty() {
        return Err(RomanTableError::Empty);
    }

    for entry in &entries {
        validate_entry(entry)?;
    }

    Ok(entries)
}

fn validate_entry(entry: &TableEntry) -> Result<(), RomanTableError> {
    if entry.roman.is_empty() {
        return Err(RomanTableError::EmptyKey);
    }
    if !entry.roman.is_ascii() {
        return Err(RomanTableError::NonAsciiKey(entry.roman.clone()));
    }
    let empty = match &entry.kind {
        TokenKind::Consonant(s) | TokenKind::Mark(s) | TokenKind::Symbol(s) => s.is_empty(),
        // The sign may be empty (inherent vowel), the independent form may not.
        TokenKind::Vowel { independent, .. } => independent.is_empty(),
    };
    if empty {
        return Err(RomanTableError::EmptyValue(entry.roman.clone()));
    }
    Ok(())
}
