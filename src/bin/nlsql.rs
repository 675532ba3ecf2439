//! nlsql: the command line front end
//!
//! # Usage
//!
//! ```bash
//! # Generate SQL
//! nlsql "사용자 목록을 보여줘"
//!
//! # Full result envelope
//! nlsql "주문 내역을 찾아줘" --format json
//!
//! # Interactive mode
//! nlsql repl
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use nlsql::guard;
use nlsql::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nlsql")]
#[command(author = "nlsql contributors")]
#[command(version)]
#[command(about = "Rule-based natural language to SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    nlsql '사용자 목록을 보여줘'
    nlsql '상품 정보를 조회해줘' --format json
    nlsql explain '주문 내역을 찾아줘'
    nlsql check 'SELECT id FROM users'")]
struct Cli {
    /// The request to turn into SQL
    query: Option<String>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Log every pipeline stage to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, env = "NLSQL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show what each pipeline stage did with a request
    Explain {
        /// The request to explain
        query: String,
    },
    /// Show the table catalog
    Tables,
    /// Check that an SQL string is a read-only SELECT
    Check {
        /// The SQL to check
        sql: String,
    },
    /// Interactive REPL mode
    Repl,
}

/// Exit status when a request, check, or REPL session fails.
const EXIT_FAILURE: i32 = 1;
/// Exit status when the config file cannot be loaded.
const EXIT_CONFIG: i32 = 2;

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}

/// Run one invocation and return its exit status.
fn run(cli: &Cli) -> i32 {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} cannot load config: {}", "Error:".red().bold(), e);
            return EXIT_CONFIG;
        }
    };
    init_logging(&config, cli.verbose);

    let format = cli.format.map(OutputFormat::from).unwrap_or(config.format);
    let orchestrator = Orchestrator::new(&config);

    let ok = match &cli.command {
        Some(Commands::Explain { query }) => {
            explain_query(&orchestrator, query);
            true
        }
        Some(Commands::Tables) => {
            show_tables();
            true
        }
        Some(Commands::Check { sql }) => check_sql(sql),
        Some(Commands::Repl) => match run_repl(&orchestrator, &config, format) {
            Ok(()) => true,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                false
            }
        },
        None => match &cli.query {
            Some(query) => {
                let envelope = ResultEnvelope::from(orchestrator.run_traced(query));
                println!("{}", render(&envelope, format));
                envelope.success
            }
            None => {
                println!("{}", "nlsql: natural language to SQL".cyan().bold());
                println!();
                println!("Usage: nlsql <QUERY> [OPTIONS]");
                println!();
                println!("Try: nlsql --help");
                true
            }
        },
    };

    if ok { 0 } else { EXIT_FAILURE }
}

/// `NLSQL_LOG` wins, then `--verbose`, then the config's `log_level`.
fn init_logging(config: &Config, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter =
        EnvFilter::try_from_env("NLSQL_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed when `run` is called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Text form: the SQL on success, one error line otherwise.
fn render(envelope: &ResultEnvelope, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(envelope).unwrap_or_default(),
        OutputFormat::Text => match (&envelope.payload, &envelope.error) {
            (Some(generated), _) => generated.sql.clone(),
            (None, Some(error)) => {
                let stage = envelope.stage.map(|s| s.name()).unwrap_or("pipeline");
                format!("{} [{}] {}", "Error:".red().bold(), stage, error)
            }
            (None, None) => String::new(),
        },
    }
}

fn explain_query(orchestrator: &Orchestrator, query: &str) {
    println!("{}", "nlsql Query Explanation".cyan().bold());
    println!();
    println!("{} {}", "Query:".dimmed(), query.yellow());
    println!();

    let trace = orchestrator.run_traced(query);

    for stage in Stage::ALL {
        if trace.completed.contains(&stage) {
            println!("  {} {}", "✓".green(), stage.name().white());
        } else if matches!(&trace.result, Err(e) if e.stage == stage) {
            println!("  {} {}", "✗".red(), stage.name().white());
        } else {
            println!("  {} {}", "·".dimmed(), stage.name().dimmed());
        }
    }
    println!();

    match &trace.result {
        Ok(generated) => {
            let mapping = generated.table.mapping();
            println!("{}", "Matched:".green().bold());
            println!("  {} {}", "Table:".dimmed(), generated.table.to_string().cyan());
            println!("  {} {}", "Keyword:".dimmed(), generated.keyword.yellow());
            println!("  {} {}", "Columns:".dimmed(), mapping.columns.join(", ").white());
            println!("  {} {}", "Order:".dimmed(), mapping.order_by.to_string().white());
            println!("  {} {}", "Limit:".dimmed(), mapping.limit.to_string().white());
            println!("  {} {}", "Confidence:".dimmed(), generated.confidence.to_string().white());
            println!();
            println!("{}", "Generated SQL:".green().bold());
            println!("  {}", generated.sql.white());
        }
        Err(e) => {
            println!("{} {}", "Stopped:".red().bold(), e.source);
        }
    }
}

fn show_tables() {
    println!("{}", "nlsql Table Catalog".cyan().bold());
    println!();

    println!(
        "{:10} {:40} {}",
        "Table".white().bold(),
        "Keywords".white().bold(),
        "SQL".white().bold()
    );
    println!("{}", "─".repeat(100).dimmed());

    for mapping in &CATALOG {
        println!(
            "{:10} {:40} {}",
            mapping.table.name().cyan().bold(),
            mapping.keywords.join(", ").yellow(),
            mapping.to_sql().dimmed()
        );
    }
}

fn check_sql(sql: &str) -> bool {
    match guard::check(sql) {
        Ok(()) => {
            println!("{} read-only SELECT", "✓".green());
            true
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            false
        }
    }
}

fn run_repl(orchestrator: &Orchestrator, config: &Config, format: OutputFormat) -> Result<()> {
    use rustyline::DefaultEditor;
    use rustyline::error::ReadlineError;

    println!("{}", "nlsql REPL (interactive mode)".cyan().bold());
    println!("{}", "Type a request to see the generated SQL. Commands:".dimmed());
    println!("  {}   - Exit the REPL", ".exit".yellow());
    println!("  {} - Show the table catalog", ".tables".yellow());
    println!("  {}  - Clear screen", ".clear".yellow());
    println!();

    let mut rl = DefaultEditor::new()?;

    let history_path = config.history_path();
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = "nlsql> ".cyan().bold().to_string();
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ".exit" | ".quit" | "exit" | "quit" | "q" => {
                        println!("{}", "Goodbye!".green());
                        break;
                    }
                    ".tables" | "tables" => {
                        show_tables();
                        continue;
                    }
                    ".clear" | "clear" => {
                        print!("\x1B[2J\x1B[1;1H");
                        continue;
                    }
                    _ => {}
                }

                let envelope = ResultEnvelope::from(orchestrator.run_traced(line));
                let out = render(&envelope, format);
                if envelope.success && format == OutputFormat::Text {
                    println!("{} {}", "→".green(), out.white().bold());
                } else {
                    println!("{}", out);
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(e) => {
                tracing::warn!("REPL read failed: {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Err(e) = rl.save_history(path) {
            tracing::debug!("Could not save history to {}: {}", path.display(), e);
        }
    }

    Ok(())
}
