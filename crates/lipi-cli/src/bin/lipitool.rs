use clap::{Parser, Subcommand};

use lipi_cli::commands::edit_ops::{OutputFormat, TypeOptions};
use lipi_cli::commands::{config_ops, convert_ops, edit_ops};

#[derive(Parser)]
#[command(name = "lipitool", about = "Devanagari transliteration and editor diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert romanized words to Devanagari
    Convert {
        /// Romanized input, one word per argument
        #[arg(required = true)]
        raw: Vec<String>,
        /// Custom romanization table (TOML)
        #[arg(long)]
        table: Option<String>,
    },
    /// Show how a romanized key resolves in the table
    Lookup {
        roman: String,
        /// Custom romanization table (TOML)
        #[arg(long)]
        table: Option<String>,
    },
    /// Replay keystrokes against the document and print the result
    ///
    /// Named keys and chords go in braces: {enter}, {bs}, {left}, {ctrl+b}.
    Type {
        keys: String,
        /// Directory holding the stored document (default: in-memory seed)
        #[arg(long)]
        store: Option<String>,
        /// Settings file (TOML)
        #[arg(long)]
        settings: Option<String>,
        /// Custom romanization table (TOML)
        #[arg(long)]
        table: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Output as HTML
        #[arg(long, conflicts_with = "json")]
        html: bool,
    },
    /// Print a stored document
    Render {
        /// Directory holding the stored document
        #[arg(long)]
        store: String,
        /// Storage key (default from settings)
        #[arg(long)]
        key: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Output as HTML
        #[arg(long, conflicts_with = "json")]
        html: bool,
    },
    /// Print the default romanization table
    DefaultTable,
    /// Validate a romanization table file
    ValidateTable { file: String },
    /// Print the default settings
    DefaultSettings,
    /// Validate a settings file
    ValidateSettings { file: String },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { raw, table } => convert_ops::convert_cmd(&raw, table.as_deref()),
        Command::Lookup { roman, table } => convert_ops::lookup_cmd(&roman, table.as_deref()),
        Command::Type {
            keys,
            store,
            settings,
            table,
            json,
            html,
        } => {
            let opts = TypeOptions {
                store: store.as_deref(),
                settings_file: settings.as_deref(),
                table_file: table.as_deref(),
                format: OutputFormat::from_flags(json, html),
            };
            edit_ops::type_cmd(&keys, &opts);
        }
        Command::Render {
            store,
            key,
            json,
            html,
        } => edit_ops::render_cmd(&store, key.as_deref(), OutputFormat::from_flags(json, html)),
        Command::DefaultTable => config_ops::table_export(),
        Command::ValidateTable { file } => config_ops::table_validate(&file),
        Command::DefaultSettings => config_ops::settings_export(),
        Command::ValidateSettings { file } => config_ops::settings_validate(&file),
    }
}
