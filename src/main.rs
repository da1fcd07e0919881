use anyhow::{bail, Context, Result};
use quality_metrics::batch::{parse_records, score_batch, BatchReport};
use quality_metrics::settings::{settings, SETTINGS_ENV};
use quality_metrics::utils::{
    log_batch_error, log_batch_start, log_batch_summary, log_init, log_report_written,
};
use quality_metrics::QualityScorer;
use std::io::Read;
use std::sync::Arc;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    eprintln!("Usage: quality-metrics <input|-> [--output|-o <path>] [--concurrency|-c <n>]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <input>        JSON array or JSON Lines of experiment records, '-' for stdin");
    eprintln!("  --output       Write the report to a file instead of stdout");
    eprintln!("  --concurrency  Records scored at once (default from settings)");
}

struct Args {
    input: String,
    output: Option<String>,
    concurrency: Option<usize>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut output = None;
    let mut concurrency = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" | "-o" => output = Some(args.next().context("--output needs a path")?),
            "--concurrency" | "-c" => {
                let value = args.next().context("--concurrency needs a number")?;
                concurrency = Some(value.parse().context("--concurrency must be a number")?);
            }
            "--help" | "-h" => return Ok(None),
            _ if input.is_none() => input = Some(arg),
            _ => bail!("unexpected argument: {arg}"),
        }
    }

    Ok(input.map(|input| Args {
        input,
        output,
        concurrency,
    }))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("quality_metrics=info".parse()?))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        );
    set_global_default(subscriber).context("failed to set tracing subscriber")?;

    let Some(args) = parse_args()? else {
        print_usage();
        std::process::exit(1);
    };

    let s = settings();
    let concurrency = args.concurrency.unwrap_or(s.batch.concurrency);
    let settings_source =
        std::env::var(SETTINGS_ENV).unwrap_or_else(|_| "metrics.ron / defaults".to_string());
    let to_stdout = args.output.is_none();

    // Keep stdout clean for the JSON report.
    if !to_stdout {
        log_init(&settings_source, concurrency);
    }

    let scorer = Arc::new(QualityScorer::new(s)?);
    let records = parse_records(&read_input(&args.input)?)?;

    if !to_stdout {
        log_batch_start(records.len(), &args.input);
    }

    let scored = match score_batch(scorer, records, concurrency).await {
        Ok(scored) => scored,
        Err(e) => {
            log_batch_error(&e.to_string());
            return Err(e);
        }
    };

    let report = BatchReport::new(scored);
    let json = serde_json::to_string_pretty(&report)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("failed to write {path}"))?;
            log_batch_summary(&report);
            log_report_written(&path);
        }
        None => println!("{json}"),
    }

    Ok(())
}
