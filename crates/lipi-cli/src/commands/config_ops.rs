use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn table_export() {
    print!("{}", lipi_core::romaji::default_toml());
}

pub fn table_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let entries = die!(lipi_core::romaji::parse_table_toml(&content), "Error: {}");
    println!("OK: {} mappings", entries.len());
}

pub fn settings_export() {
    print!("{}", lipi_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        lipi_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: storage.key={}, input.transliterate={}, input.max_word_chars={}",
        s.storage.key, s.input.transliterate, s.input.max_word_chars
    );
}
