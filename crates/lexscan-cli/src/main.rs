mod args;
mod commands;
mod output;
mod web;

use args::{ProviderArgs, RulesArgs};
use clap::{Parser, Subcommand};
use lexscan_core::extraction::PdfBackend;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lexscan",
    version,
    about = "Summarize legislation PDFs and check them against a compliance checklist with an LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text from a PDF (no analysis)
    Extract {
        /// Path to PDF file
        input_file: PathBuf,

        /// Extraction backend: lopdf (default) or pdftotext
        #[arg(short, long, default_value = "lopdf")]
        backend: PdfBackend,

        /// Write the text to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the prompt that would be sent for a PDF, without calling the provider
    Prompt {
        /// Path to PDF file
        input_file: PathBuf,

        #[arg(short, long, default_value = "lopdf")]
        backend: PdfBackend,

        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Analyze a PDF with the completion provider
    Analyze {
        /// Path to PDF file
        input_file: PathBuf,

        #[arg(short, long, default_value = "lopdf")]
        backend: PdfBackend,

        #[command(flatten)]
        rules: RulesArgs,

        #[command(flatten)]
        provider: ProviderArgs,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Also write the JSON report (analysis_<timestamp>.json) into this directory
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },
    /// Render a previously exported JSON report
    Show {
        /// Path to an analysis_*.json report
        report: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Parse a saved raw completion reply into a report
    ParseReply {
        /// File holding the model's reply text
        reply_file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Manage and inspect rule checklists
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Serve the browser interface
    Serve {
        /// Address to listen on
        #[arg(long, env = "LEXSCAN_ADDR", default_value = "127.0.0.1:8501")]
        addr: SocketAddr,

        #[arg(short, long, default_value = "lopdf")]
        backend: PdfBackend,

        #[command(flatten)]
        rules: RulesArgs,

        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined checklists
    List,
    /// Show the rules of a checklist
    Explain {
        /// Preset name (e.g., "legislation")
        preset: String,
    },
    /// Print the JSON format of a checklist file
    Schema,
    /// Validate a custom checklist file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lexscan=info,lexscan_core=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            backend,
            out,
        } => commands::extract::run(input_file, backend, out),
        Commands::Prompt {
            input_file,
            backend,
            rules,
        } => commands::prompt::run(input_file, backend, &rules),
        Commands::Analyze {
            input_file,
            backend,
            rules,
            provider,
            output,
            save,
        } => commands::analyze::run(input_file, backend, &rules, &provider, &output, save),
        Commands::Show { report, output } => commands::show::run(&report, &output),
        Commands::ParseReply { reply_file, output } => {
            commands::show::run_reply(&reply_file, &output)
        }
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { preset } => commands::rules::explain(&preset),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
        Commands::Serve {
            addr,
            backend,
            rules,
            provider,
        } => commands::serve::run(addr, backend, &rules, &provider),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
