use console::{measure_text_width, Style};

use crate::batch::BatchReport;
use crate::scoring::{DetailedMetrics, MetricsResult, QualityTier};

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';
pub const TREE_VERT: char = '\u{2502}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 28;
const PREVIEW_CHARS: usize = 60;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_indent() -> String {
    dim().apply_to(format!("{}   ", TREE_VERT)).to_string()
}

fn tree_blank() -> String {
    "    ".to_string()
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

fn batch_prefix() -> String {
    magenta().apply_to("[BATCH]").to_string()
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn format_signed(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{:.2}", dim().apply_to(sign), value.abs())
}

fn score_style(score: f64) -> Style {
    match QualityTier::from_score(score) {
        QualityTier::Excellent | QualityTier::Good => green(),
        QualityTier::Fair => yellow(),
        QualityTier::Poor => red(),
    }
}

fn format_score(score: f64) -> String {
    score_style(score)
        .apply_to(format!("{:.2}", score * 100.0))
        .to_string()
}

fn format_component(score: f64) -> String {
    dim().apply_to(format!("{:.2}", score)).to_string()
}

pub fn preview(text: &str) -> String {
    let preview = if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", text.chars().take(PREVIEW_CHARS - 3).collect::<String>())
    } else {
        text.to_string()
    };
    preview.replace('\n', " ")
}

pub fn log_init(settings_source: &str, concurrency: usize) {
    println!(
        "{} scoring with settings from {}...",
        init_prefix(),
        cyan().apply_to(settings_source),
    );
    println!(
        "{} concurrency is {}.",
        init_prefix(),
        bold().apply_to(concurrency)
    );
}

pub fn log_batch_start(records: usize, source: &str) {
    println!(
        "{} scoring {} records from {}...",
        batch_prefix(),
        bold().apply_to(records),
        cyan().apply_to(source),
    );
}

pub fn log_batch_error(error: &str) {
    println!(
        "{} {} {}",
        batch_prefix(),
        red().apply_to("failed:"),
        dim().apply_to(error)
    );
}

pub fn log_report_written(path: &str) {
    println!(
        "{} report written to {}",
        batch_prefix(),
        cyan().apply_to(path)
    );
}

pub fn log_batch_summary(report: &BatchReport) {
    let summary = &report.summary;
    println!("{} done.", batch_prefix());
    println!(
        "{}{} {}",
        tree_branch(),
        pad_label("scored", 1),
        bold().apply_to(report.total - report.failed)
    );

    let failed_style = if report.failed > 0 { red() } else { dim() };
    println!(
        "{}{} {}",
        tree_branch(),
        pad_label("failed", 1),
        failed_style.apply_to(report.failed)
    );

    if let Some(ref averages) = summary.averages {
        println!(
            "{}{} {}",
            tree_branch(),
            pad_label("mean overall", 1),
            format_score(averages.overall)
        );
    }

    if let (Some(id), Some(best)) = (&summary.best_id, summary.best_overall) {
        println!(
            "{}{} {} {}",
            tree_branch(),
            pad_label("best", 1),
            bold().apply_to(id),
            format_score(best)
        );
    }

    println!("{}{}", tree_end(), pad_label("parameters", 1));
    if summary.by_parameters.is_empty() {
        println!("{}{}{}", tree_blank(), tree_end(), dim().apply_to("none"));
        return;
    }

    let count = summary.by_parameters.len();
    for (i, group) in summary.by_parameters.iter().enumerate() {
        let branch = if i == count - 1 {
            tree_end()
        } else {
            tree_branch()
        };
        let p = &group.parameters;
        let label = format!(
            "t={:.2} top_p={:.2} max={}",
            p.temperature, p.top_p, p.max_tokens
        );
        println!(
            "{}{}{} {} {}",
            tree_blank(),
            branch,
            pad_label(&label, 2),
            format_score(group.mean_overall),
            dim().apply_to(format!("({} responses)", group.responses))
        );
    }
}

fn push_row(lines: &mut Vec<String>, last: bool, label: &str, value: String) {
    let branch = if last { tree_end() } else { tree_branch() };
    lines.push(format!("{}{} {}", branch, pad_label(label, 1), value));
}

fn push_child(lines: &mut Vec<String>, parent_last: bool, last: bool, label: &str, value: String) {
    let indent = if parent_last {
        tree_blank()
    } else {
        tree_indent()
    };
    let branch = if last { tree_end() } else { tree_branch() };
    lines.push(format!("{}{}{} {}", indent, branch, pad_label(label, 2), value));
}

fn push_text_stats(lines: &mut Vec<String>, m: &MetricsResult) {
    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("TEXT")));
    push_row(lines, false, "words", bold().apply_to(m.word_count).to_string());
    push_row(lines, false, "sentences", bold().apply_to(m.sentence_count).to_string());
    push_row(lines, false, "paragraphs", bold().apply_to(m.paragraph_count).to_string());
    push_row(
        lines,
        false,
        "avg sentence length",
        format!("{:.1}", m.avg_sentence_length),
    );
    push_row(
        lines,
        false,
        "lexical diversity",
        format_component(m.lexical_diversity),
    );
    push_row(lines, false, "sentiment", format_signed(m.sentiment_polarity));
    push_row(lines, true, "complexity", format_component(m.complexity_score));
}

/// Prints the full scoring tree for one text.
pub fn log_metrics(text: &str, detailed: &DetailedMetrics) {
    let m = &detailed.metrics;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} \"{}\"",
        magenta().apply_to(bold().apply_to("[QUALITY METRICS]")),
        dim().apply_to(preview(text))
    ));

    push_text_stats(&mut lines, m);

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SCORES")));

    let c = &detailed.coherence;
    push_row(&mut lines, false, "coherence", format_score(m.coherence_score));
    push_child(&mut lines, false, false, "transitions", format_component(c.transitions));
    push_child(&mut lines, false, false, "pronouns", format_component(c.pronouns));
    push_child(&mut lines, false, false, "topic", format_component(c.topic));
    push_child(&mut lines, false, true, "structure", format_component(c.structure));

    push_row(&mut lines, false, "completeness", format_score(m.completeness_score));

    let r = &detailed.readability;
    push_row(&mut lines, false, "readability", format_score(m.readability_score));
    push_child(&mut lines, false, false, "sentence length", format_component(r.sentence_length));
    push_child(&mut lines, false, false, "vocabulary", format_component(r.lexical_diversity));
    push_child(&mut lines, false, false, "paragraphs", format_component(r.paragraph_structure));
    push_child(&mut lines, false, true, "word complexity", format_component(r.word_complexity));

    push_row(
        &mut lines,
        false,
        "length",
        format_score(m.length_appropriateness_score),
    );

    let cr = &detailed.creativity;
    push_row(&mut lines, false, "creativity", format_score(m.creativity_score));
    push_child(&mut lines, false, false, "metaphors", format_component(cr.metaphors));
    push_child(&mut lines, false, false, "variety", format_component(cr.sentence_variety));
    push_child(&mut lines, false, false, "uncommon words", format_component(cr.uncommon_words));
    push_child(&mut lines, false, true, "narrative", format_component(cr.narrative));

    let s = &detailed.specificity;
    push_row(&mut lines, true, "specificity", format_score(m.specificity_score));
    push_child(&mut lines, true, false, "numbers", format_component(s.numeric));
    push_child(&mut lines, true, false, "terms", format_component(s.terms));
    push_child(&mut lines, true, true, "examples", format_component(s.examples));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("RESULT")));

    let tier = m.tier();
    push_row(&mut lines, false, "overall", format_score(m.overall_score));
    push_row(
        &mut lines,
        true,
        "tier",
        score_style(m.overall_score).bold().apply_to(tier).to_string(),
    );

    println!("{}\n", lines.join("\n"));
}

pub fn log_invalid_input(error: &str) {
    eprintln!("{} {}", red().apply_to("[ERROR]"), error);
}
