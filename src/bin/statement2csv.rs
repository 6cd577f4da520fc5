use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use statement_lens::{
    ExtractOptions, ExtractedDocument, PageSelection, StatementRecord, parse_statement_file,
    write_transactions_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "statement2csv",
    version,
    about = "Extract summary fields and transactions from credit-card statement PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse one statement and print its summary.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Write recognized transactions to this CSV file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the whole record as JSON instead of the summary.
    #[arg(long)]
    json: bool,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Minimum cells required per candidate table row.
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// Print extraction warnings.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ParseArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    Ok(ExtractOptions {
        pages,
        min_cols: args.min_cols,
    })
}

fn field(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn print_summary(record: &StatementRecord) {
    println!("Issuer:          {}", record.issuer);
    println!("Card last 4:     {}", field(record.card_last4.as_deref()));
    println!("Card variant:    {}", field(record.card_variant.as_deref()));
    println!("Total balance:   {}", field(record.total_balance.as_deref()));
    println!("Payment due:     {}", field(record.payment_due_date.as_deref()));
    println!("Billing cycle:   {}", field(record.billing_cycle.as_deref()));
    println!();

    if record.transactions.is_empty() {
        println!(
            "No transactions table recognized. The parser is heuristic; check the raw text below."
        );
    } else {
        println!("Transactions ({}):", record.transactions.len());
        for row in &record.transactions {
            println!(
                "  {:<12} {:<40} {:>12}",
                row.date.to_string(),
                row.description,
                field(row.amount.as_deref())
            );
        }
    }
    println!();

    println!("Raw text snippet:");
    println!(
        "{}",
        record
            .raw_text_snippet
            .as_deref()
            .unwrap_or("No text extracted")
    );
}

fn log_warnings(document: &ExtractedDocument, verbose: bool) {
    if document.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", document.warnings.len());
    if verbose {
        for warning in &document.warnings {
            eprintln!(
                "  - {:?} page={:?}: {}",
                warning.code, warning.page, warning.message
            );
        }
    }
}

fn run_parse(args: &ParseArgs) -> Result<StatementRecord> {
    let options = parse_options(args)?;
    let (record, document) = parse_statement_file(&args.input, &options)
        .with_context(|| format!("failed to parse statement '{}'", args.input.display()))?;
    log_warnings(&document, args.verbose);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("failed to serialize record")?
        );
    } else {
        print_summary(&record);
    }

    if let Some(output) = &args.output {
        write_transactions_csv(output, &record.transactions)
            .with_context(|| format!("failed to write '{}'", output.display()))?;
    }

    Ok(record)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("statement_lens=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse(args) => match run_parse(&args) {
            Ok(record) if record.transactions.is_empty() => ExitCode::from(2),
            Ok(_) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
