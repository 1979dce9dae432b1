use std::fs;
use std::process;

use serde::Serialize;

use lipi_core::document::Document;
use lipi_core::render::{render_html, render_text};
use lipi_core::settings::{parse_settings_toml, Settings};
use lipi_core::storage::{load_document, FileStorage, MemoryStorage, Storage};
use lipi_session::EditingSession;

use super::convert_ops::load_table;
use super::keys::parse_keys;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

impl OutputFormat {
    pub fn from_flags(json: bool, html: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if html {
            OutputFormat::Html
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Serialize)]
struct TypeReport<'a> {
    document: &'a Document,
    /// Keystrokes of the unfinished word.
    pending: &'a str,
    transliterate: bool,
}

pub struct TypeOptions<'a> {
    pub store: Option<&'a str>,
    pub settings_file: Option<&'a str>,
    pub table_file: Option<&'a str>,
    pub format: OutputFormat,
}

fn load_settings(file: Option<&str>) -> Settings {
    match file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            die!(parse_settings_toml(&content), "Error: {}")
        }
        None => Settings::default_settings(),
    }
}

/// Replay `keys` against the stored (or seed) document and print the result.
pub fn type_cmd(keys: &str, opts: &TypeOptions<'_>) {
    let events = die!(parse_keys(keys), "Error parsing keys: {}");
    let settings = load_settings(opts.settings_file);
    let table = load_table(opts.table_file);
    match opts.store {
        Some(dir) => {
            let mut session =
                EditingSession::open_with_table(FileStorage::new(dir), settings, table);
            replay(&mut session, events, opts.format);
        }
        None => {
            let mut session =
                EditingSession::open_with_table(MemoryStorage::new(), settings, table);
            replay(&mut session, events, opts.format);
        }
    }
}

fn replay<S: Storage>(
    session: &mut EditingSession<S>,
    events: Vec<lipi_session::KeyEvent>,
    format: OutputFormat,
) {
    for event in events {
        session.handle_key(event);
    }
    if format == OutputFormat::Json {
        let report = TypeReport {
            document: session.document(),
            pending: session.input().raw(),
            transliterate: session.input().is_transliterating(),
        };
        let json = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{json}");
    } else {
        print_document(session.document(), format);
    }
}

/// Print the document stored under `key` in `dir`.
pub fn render_cmd(dir: &str, key: Option<&str>, format: OutputFormat) {
    let storage = FileStorage::new(dir);
    let key = key.unwrap_or(&Settings::default_settings().storage.key).to_string();
    let doc = die!(load_document(&storage, &key), "Error loading {key}: {}");
    match doc {
        Some(doc) => print_document(&doc, format),
        None => {
            eprintln!("No document stored under {key:?} in {dir}");
            process::exit(1);
        }
    }
}

fn print_document(doc: &Document, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(doc)),
        OutputFormat::Html => println!("{}", render_html(doc)),
        OutputFormat::Json => {
            let json = die!(serde_json::to_string_pretty(doc), "Error: {}");
            println!("{json}");
        }
    }
}
