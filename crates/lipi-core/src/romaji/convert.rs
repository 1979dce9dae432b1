use super::config::TokenKind;
use super::table::RomanTable;

/// Devanagari sign virama, joining a consonant to the next one.
pub const HALANT: char = '\u{094D}';

/// Convert a romanized word with the global table.
pub fn convert(raw: &str) -> String {
    convert_with(RomanTable::global(), raw)
}

/// Convert a romanized word with an explicit table.
///
/// Greedy longest-match tokenization followed by the combining rules:
/// consonant clusters are joined with a halant, a vowel after a consonant
/// becomes its sign, a trailing consonant keeps its halant.
/// Characters with no table entry pass through unchanged.
pub fn convert_with(table: &RomanTable, raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() * 3);
    // Set while the last emitted letter is a consonant still awaiting a vowel.
    let mut open_consonant = false;
    let mut rest = raw;

    while !rest.is_empty() {
        let Some((len, entry)) = table.longest_match(rest) else {
            let ch = rest.chars().next().unwrap_or_default();
            if open_consonant {
                out.push(HALANT);
                open_consonant = false;
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
            continue;
        };

        match &entry.kind {
            TokenKind::Consonant(letter) => {
                if open_consonant {
                    out.push(HALANT);
                }
                out.push_str(letter);
                open_consonant = true;
            }
            TokenKind::Vowel { independent, sign } => {
                if open_consonant {
                    out.push_str(sign);
                } else {
                    out.push_str(independent);
                }
                open_consonant = false;
            }
            TokenKind::Mark(mark) => {
                // The consonant keeps its inherent vowel: "kM" → "कं".
                out.push_str(mark);
                open_consonant = false;
            }
            TokenKind::Symbol(symbol) => {
                if open_consonant {
                    out.push(HALANT);
                }
                out.push_str(symbol);
                open_consonant = false;
            }
        }
        rest = &rest[len..];
    }

    if open_consonant {
        out.push(HALANT);
    }
    out
}
