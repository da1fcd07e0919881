use quality_metrics::scoring::default_scorer;
use quality_metrics::utils::{log_invalid_input, log_metrics};
use serde_json::json;
use std::env;
use std::process;

fn print_usage() {
    eprintln!("Usage: score-text <text> [--prompt|-p <prompt>] [--file|-f <path>] [--json]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <text>     Response text to score");
    eprintln!("  --prompt   Prompt the response was generated for");
    eprintln!("  --file     Read the response text from a file");
    eprintln!("  --json     Print metrics as JSON instead of a tree");
}

struct Args {
    text: Option<String>,
    file: Option<String>,
    prompt: Option<String>,
    json: bool,
}

fn parse_args(raw: &[String]) -> Option<Args> {
    let mut args = Args {
        text: None,
        file: None,
        prompt: None,
        json: false,
    };
    let mut words: Vec<&str> = Vec::new();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--prompt" | "-p" => args.prompt = Some(iter.next()?.clone()),
            "--file" | "-f" => args.file = Some(iter.next()?.clone()),
            "--json" => args.json = true,
            _ => words.push(arg),
        }
    }

    if !words.is_empty() {
        args.text = Some(words.join(" "));
    }
    Some(args)
}

fn main() {
    dotenvy::dotenv().ok();

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        print_usage();
        process::exit(1);
    };

    let text = match (&args.file, args.text) {
        (Some(path), _) => match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log_invalid_input(&format!("failed to read {path}: {e}"));
                process::exit(1);
            }
        },
        (None, Some(text)) => text,
        (None, None) => {
            print_usage();
            process::exit(1);
        }
    };

    let scorer = match default_scorer() {
        Ok(scorer) => scorer,
        Err(e) => {
            log_invalid_input(&e.to_string());
            process::exit(1);
        }
    };

    let detailed = match scorer.detailed_metrics(&text, args.prompt.as_deref()) {
        Ok(detailed) => detailed,
        Err(e) => {
            log_invalid_input(&e.to_string());
            process::exit(1);
        }
    };

    if args.json {
        let m = &detailed.metrics;
        let output = json!({
            "metrics": m,
            "percentages": m.percentages(),
            "tier": m.tier(),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                log_invalid_input(&e.to_string());
                process::exit(1);
            }
        }
    } else {
        log_metrics(&text, &detailed);
    }
}
