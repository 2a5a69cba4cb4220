use clap::{Parser, Subcommand};

use ruby_cli::commands::{config_ops, dict_ops};

#[derive(Parser)]
#[command(name = "dictool", about = "Furigana dictionary build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a surface dictionary from lexicon CSV files
    Compile {
        /// Dictionary source (mecab, ipadic, sudachi)
        #[arg(long, default_value = "mecab")]
        source: String,
        /// Input directory
        input_dir: String,
        /// Output file
        output_file: String,
    },
    /// Compile a connection matrix from matrix.def
    CompileConn {
        /// Input text file
        input_txt: String,
        /// Output binary file
        output_file: String,
    },
    /// Show dictionary or connection matrix info (auto-detected by magic bytes)
    Info {
        /// Dictionary (.dict) or connection matrix (.conn) file
        file: String,
    },
    /// Look up a surface in the dictionary (exact match)
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Surface form to look up
        surface: String,
    },
    /// Common-prefix search (all surfaces that are prefixes of the query)
    Prefix {
        /// Dictionary file
        dict_file: String,
        /// Query string
        query: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            source,
            input_dir,
            output_file,
        } => dict_ops::compile(&source, &input_dir, &output_file),
        Command::CompileConn {
            input_txt,
            output_file,
        } => dict_ops::compile_conn(&input_txt, &output_file),
        Command::Info { file } => dict_ops::info(&file),
        Command::Lookup { dict_file, surface } => dict_ops::lookup(&dict_file, &surface),
        Command::Prefix { dict_file, query } => dict_ops::prefix(&dict_file, &query),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
