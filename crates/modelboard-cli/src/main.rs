mod paint;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use modelboard_core::{CardDescriptor, ModelboardConfig};
use modelboard_services::{BoardHandle, ConnectOutcome, Services};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modelboard")]
#[command(about = "Modelboard - AI model benchmark catalog", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip reconnecting to the saved remote source
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show model cards
    List {
        /// Benchmark category (all, general, coding, multimodal)
        #[arg(short, long)]
        filter: Option<String>,

        /// Benchmark key to sort by (mmlu, gpqa, humaneval, mmmu)
        #[arg(short, long)]
        sort: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Load the catalog from a remote JSON document
    Connect {
        /// Source URL
        url: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the saved source and database location
    Status,

    /// Forget the saved remote source
    Forget,

    /// List benchmark definitions
    Benchmarks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Html,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ModelboardConfig::load(cli.config.as_deref())?;
    tracing::debug!("Loaded config: {:?}", config);
    let services = Services::start(config)?;

    match cli.command {
        Some(Commands::List {
            filter,
            sort,
            format,
        }) => {
            if !cli.offline {
                services.auto_reconnect().await;
            }
            cmd_list(&services.board, filter.as_deref(), sort.as_deref(), format).await?
        }
        Some(Commands::Connect { url, format }) => cmd_connect(&services, &url, format).await?,
        Some(Commands::Status) => cmd_status(&services).await?,
        Some(Commands::Forget) => cmd_forget(&services)?,
        Some(Commands::Benchmarks) => print!("{}", paint::terminal::benchmarks()),
        None => run_interactive(&services, cli.offline).await?,
    }

    Ok(())
}

async fn run_interactive(services: &Services, offline: bool) -> Result<()> {
    display_welcome();

    cmd_list(&services.board, None, None, OutputFormat::Table).await?;
    if !offline {
        spawn_auto_reconnect(services);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();
        let arg = parts.get(1).copied();

        match cmd.as_str() {
            "help" | "h" | "?" => display_help(),
            "list" | "l" | "ls" => cmd_list(&services.board, None, None, OutputFormat::Table).await?,
            "filter" | "f" => match arg {
                Some(category) => {
                    let cards = services.board.set_filter(category).await?;
                    print_cards(&services.board, &cards).await?;
                }
                None => println!("Usage: filter <all|general|coding|multimodal>"),
            },
            "sort" | "s" => match arg {
                Some(key) => match services.board.set_sort(key).await {
                    Ok(cards) => print_cards(&services.board, &cards).await?,
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: sort <mmlu|gpqa|humaneval|mmmu>"),
            },
            "connect" | "c" => {
                let url = match arg {
                    Some(url) => url.to_string(),
                    None => {
                        print!("  Source URL (blank to cancel): ");
                        stdout.flush()?;
                        lines.next_line().await?.unwrap_or_default()
                    }
                };
                spawn_connect(services.board.clone(), url);
            }
            "status" => cmd_status(services).await?,
            "benchmarks" | "b" => print!("{}", paint::terminal::benchmarks()),
            "reset" => {
                services.board.reset().await?;
                println!("  Restored the built-in catalog.");
            }
            "forget" => cmd_forget(services)?,
            "clear" | "cls" => {
                print!("\x1B[2J\x1B[1;1H");
                stdout.flush()?;
            }
            "exit" | "quit" | "q" => {
                println!("  Goodbye!");
                break;
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for available commands.", cmd);
            }
        }
    }

    Ok(())
}

/// Connect on a background task so the prompt stays usable
fn spawn_connect(board: BoardHandle, url: String) {
    let url = url.trim().to_string();
    if url.is_empty() {
        return;
    }
    println!("  Connecting to {} in the background…", url);
    tokio::spawn(async move {
        match board.connect(&url).await {
            Ok(outcome) => {
                println!();
                print_outcome(&outcome);
                if outcome.is_connected() {
                    println!("  Type `list` to see the new catalog.");
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    });
}

/// Reconnect to the saved source without holding up the prompt. Only a
/// successful reconnect is reported.
fn spawn_auto_reconnect(services: &Services) {
    let Some(reconnect) = services.spawn_auto_reconnect() else {
        return;
    };
    tokio::spawn(async move {
        if let Ok(outcome) = reconnect.await {
            if outcome.is_connected() {
                println!();
                print_outcome(&outcome);
                println!("  Type `list` to see the new catalog.");
            }
        }
    });
}

fn display_welcome() {
    println!();
    println!("  Modelboard - AI model benchmark catalog");
    println!();
    println!("  list, l                # Show model cards");
    println!("  filter, f <category>   # all, general, coding, multimodal");
    println!("  sort, s <benchmark>    # mmlu, gpqa, humaneval, mmmu");
    println!("  connect, c [url]       # Load catalog from a remote JSON source");
    println!("  help                   # Show all command options");
    println!("  exit, quit, q          # Leave");
    println!();
}

fn display_help() {
    println!();
    println!("Available Commands:");
    println!("  list, l, ls            Show model cards for the current filter and sort");
    println!("  filter, f <category>   Show only benchmarks in a category");
    println!("                         Categories: all, general, coding, multimodal");
    println!("  sort, s <benchmark>    Rank models by a benchmark (highest first)");
    println!("                         Benchmarks: mmlu, gpqa, humaneval, mmmu");
    println!("  connect, c [url]       Replace the catalog from a remote JSON document");
    println!("                         Prompts for the URL when omitted; blank cancels");
    println!("  status                 Show data source details");
    println!("  benchmarks, b          List benchmark definitions");
    println!("  reset                  Go back to the built-in catalog");
    println!("  forget                 Forget the saved remote source");
    println!("  clear, cls             Clear screen");
    println!("  help, h                Show this help message");
    println!("  exit, quit, q          Leave");
    println!();
}

fn print_outcome(outcome: &ConnectOutcome) {
    match outcome {
        ConnectOutcome::Connected { url, models } => {
            println!("  ✅ Connected to {} ({} models)", url, models)
        }
        ConnectOutcome::Failed { url, reason } => {
            println!("  ❌ Failed to connect to {}: {}", url, reason)
        }
        ConnectOutcome::Skipped => {}
    }
}

async fn print_cards(board: &BoardHandle, cards: &[CardDescriptor]) -> Result<()> {
    let snapshot = board.snapshot().await?;
    println!();
    println!("{}", paint::terminal::view(&snapshot.view));
    print!("{}", paint::terminal::cards(cards));
    println!();
    Ok(())
}

async fn cmd_list(
    board: &BoardHandle,
    filter: Option<&str>,
    sort: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(filter) = filter {
        board.set_filter(filter).await?;
    }
    if let Some(sort) = sort {
        board.set_sort(sort).await?;
    }

    let cards = board.render().await?;
    let snapshot = board.snapshot().await?;

    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "status": snapshot.status,
                "view": snapshot.view,
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Html => {
            print!(
                "{}",
                paint::html::page(&snapshot.status, &snapshot.view, &cards)
            );
        }
        OutputFormat::Table => {
            println!();
            print!("{}", paint::terminal::status(&snapshot.status));
            println!();
            println!("{}", paint::terminal::view(&snapshot.view));
            print!("{}", paint::terminal::cards(&cards));
            println!();
        }
    }

    Ok(())
}

async fn cmd_connect(services: &Services, url: &str, format: OutputFormat) -> Result<()> {
    let outcome = services.board.connect(url).await?;
    if let ConnectOutcome::Failed { reason, .. } = &outcome {
        eprintln!("Failed to connect: {}", reason);
    }
    cmd_list(&services.board, None, None, format).await
}

async fn cmd_status(services: &Services) -> Result<()> {
    let snapshot = services.board.snapshot().await?;

    println!("Data Source:");
    println!("{:-<40}", "");
    print!("{}", paint::terminal::status(&snapshot.status));
    if let Some(url) = &snapshot.connecting {
        println!("  Connecting:    {}", url);
    }
    println!("  Models:        {}", snapshot.catalog.len());
    println!();

    match services.settings.source_url() {
        Ok(Some(url)) => println!("  Saved source:  {}", url),
        Ok(None) => println!("  Saved source:  (none)"),
        Err(e) => println!("  Saved source:  unavailable ({})", e),
    }
    if let Some(path) = services.db_path() {
        println!("  Database:      {}", path.display());
    }
    println!();

    Ok(())
}

fn cmd_forget(services: &Services) -> Result<()> {
    services.settings.clear_source_url()?;
    println!("  Saved source cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag_parses_known_values() {
        let cli = Cli::try_parse_from(["modelboard", "list", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::List { format, .. }) => assert_eq!(format, OutputFormat::Json),
            _ => panic!("expected list"),
        }

        let cli = Cli::try_parse_from(["modelboard", "connect", "http://x/m.json"]).unwrap();
        match cli.command {
            Some(Commands::Connect { format, .. }) => assert_eq!(format, OutputFormat::Table),
            _ => panic!("expected connect"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["modelboard", "list", "--format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["modelboard", "list", "--output", "json"]).is_err());
    }
}
