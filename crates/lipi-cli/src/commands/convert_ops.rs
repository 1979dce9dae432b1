use std::fs;
use std::process;
use std::sync::Arc;

use unicode_width::UnicodeWidthStr;

use lipi_core::romaji::{convert_with, RomanTable, TableLookup, TokenKind};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// The default table, or one read from `table_file`.
pub fn load_table(table_file: Option<&str>) -> Arc<RomanTable> {
    match table_file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            Arc::new(die!(RomanTable::from_toml(&content), "Error: {}"))
        }
        None => RomanTable::shared(),
    }
}

pub fn convert_cmd(raws: &[String], table_file: Option<&str>) {
    let table = load_table(table_file);
    for raw in raws {
        println!("{}", convert_with(&table, raw));
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Consonant(letter) => format!("consonant {letter}"),
        TokenKind::Vowel { independent, sign } if sign.is_empty() => {
            format!("vowel {independent} (inherent)")
        }
        TokenKind::Vowel { independent, sign } => format!("vowel {independent} sign {sign}"),
        TokenKind::Mark(mark) => format!("mark {mark}"),
        TokenKind::Symbol(symbol) => format!("symbol {symbol}"),
    }
}

pub fn lookup_cmd(roman: &str, table_file: Option<&str>) {
    let table = load_table(table_file);
    match table.lookup(roman) {
        TableLookup::None => println!("{roman}: no mapping"),
        TableLookup::Prefix => {
            println!("{roman}: prefix only");
            print_extensions(&table, roman);
        }
        TableLookup::Exact(entry) => println!("{roman}: {}", describe(&entry.kind)),
        TableLookup::ExactAndPrefix(entry) => {
            println!("{roman}: {} (also a prefix)", describe(&entry.kind));
            print_extensions(&table, roman);
        }
    }
}

fn print_extensions(table: &RomanTable, prefix: &str) {
    let longer: Vec<_> = table
        .entries()
        .iter()
        .filter(|e| e.roman.len() > prefix.len() && e.roman.starts_with(prefix))
        .collect();
    let width = longer
        .iter()
        .map(|e| UnicodeWidthStr::width(e.roman.as_str()))
        .max()
        .unwrap_or(0);
    for e in longer {
        let pad = width - UnicodeWidthStr::width(e.roman.as_str());
        println!("  {}{}  {}", e.roman, " ".repeat(pad), describe(&e.kind));
    }
}
