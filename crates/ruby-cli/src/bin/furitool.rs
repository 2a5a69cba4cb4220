use clap::{Args, Parser, Subcommand};

use ruby_cli::commands::{annotate_ops, config_ops};

#[derive(Parser)]
#[command(name = "furitool", about = "Furigana annotation diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DictArgs {
    /// Path to the compiled dictionary file
    #[arg(long)]
    dict: String,
    /// Path to the compiled connection matrix file (optional)
    #[arg(long)]
    conn: Option<String>,
    /// Custom settings TOML (optional)
    #[arg(long)]
    settings: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print ruby markup for a text
    Annotate {
        #[command(flatten)]
        dict: DictArgs,
        /// Text to annotate
        text: String,
    },
    /// Show the token sequence for a text
    Tokenize {
        #[command(flatten)]
        dict: DictArgs,
        /// Text to tokenize
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl DictArgs {
    fn apply_settings(&self) {
        if let Some(file) = &self.settings {
            config_ops::load_custom(file);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Annotate { dict, text } => {
            dict.apply_settings();
            annotate_ops::annotate_cmd(&dict.dict, dict.conn.as_deref(), &text);
        }
        Command::Tokenize { dict, text, json } => {
            dict.apply_settings();
            annotate_ops::tokenize_cmd(&dict.dict, dict.conn.as_deref(), &text, json);
        }
    }
}
