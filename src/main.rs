use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mailtriage::{Config, IncomingMail, PipelineConfig, TriagePipeline, TriageTaxonomy, TriagedMail};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Parser, Debug)]
#[command(name = "mailtriage")]
#[command(version)]
#[command(about = "Triage campus mail into category, priority, deadline, action items and summary")]
struct Args {
    /// Subject line of a single message
    #[arg(short, long, default_value = "")]
    subject: String,

    /// Body of a single message (read from stdin when neither this nor --input is given)
    #[arg(short, long)]
    body: Option<String>,

    /// JSON file with one mail object or an array of mails
    #[arg(short, long, conflicts_with_all = ["body", "subject"])]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum sentences in each summary
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    summary_sentences: Option<u64>,

    /// Triage rules JSON file (overrides MAILTRIAGE_RULES_PATH)
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mailtriage=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let taxonomy = match args.rules.as_ref().or(config.rules_path.as_ref()) {
        Some(path) => TriageTaxonomy::from_json_file(path)?,
        None => TriageTaxonomy::default(),
    };

    let mut pipeline_config = PipelineConfig::from(&config);
    if let Some(n) = args.summary_sentences {
        pipeline_config.summary_sentences = usize::try_from(n)?;
    }

    let mails = read_mails(&args)?;
    if mails.len() == 1 {
        // nothing to fan out
        pipeline_config.show_progress = false;
    }

    let pipeline = Arc::new(TriagePipeline::new(taxonomy, pipeline_config));
    let triaged = pipeline.process_batch(mails).await;

    output_triaged(&triaged, &args)?;

    Ok(())
}

fn read_mails(args: &Args) -> anyhow::Result<Vec<IncomingMail>> {
    if let Some(ref path) = args.input {
        let json = std::fs::read_to_string(path)?;
        return Ok(IncomingMail::parse_many(&json)?);
    }

    let body = match args.body {
        Some(ref body) => body.clone(),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    Ok(vec![IncomingMail::new(args.subject.clone(), body)])
}

fn output_triaged(triaged: &[TriagedMail], args: &Args) -> anyhow::Result<()> {
    let output = match args.format {
        OutputFormat::Json => {
            if let [single] = triaged {
                serde_json::to_string_pretty(&single.result)?
            } else {
                serde_json::to_string_pretty(triaged)?
            }
        }
        OutputFormat::Markdown => format_markdown(triaged),
        OutputFormat::Text => format_text(triaged),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(triaged: &[TriagedMail]) -> String {
    let mut output = String::new();

    for item in triaged {
        let result = &item.result;
        let title = if item.mail.subject.is_empty() {
            "(no subject)"
        } else {
            item.mail.subject.as_str()
        };

        output.push_str(&format!("\n=== {} ===\n\n", title));
        if !item.mail.sender.is_empty() {
            output.push_str(&format!("From: {}\n", item.mail.sender));
        }
        output.push_str(&format!("Category: {}\n", result.category));
        output.push_str(&format!("Priority: {:.2}\n", result.priority_score));
        if result.has_deadline() {
            output.push_str(&format!("Deadline: {}\n", result.deadline));
        }
        output.push_str(&format!("\nSummary: {}\n", result.summary));

        if !result.action_items.is_empty() {
            output.push_str("\nAction Items:\n");
            for action in &result.action_items {
                output.push_str(&format!("  - {}\n", action));
            }
        }
    }

    output.push_str(&format!("\nTriaged on: {}\n", triaged_on(triaged)));

    output
}

fn format_markdown(triaged: &[TriagedMail]) -> String {
    let mut output = String::new();

    output.push_str("# Mail Triage\n\n");
    output.push_str("| Subject | Category | Priority | Deadline |\n");
    output.push_str("|---------|----------|----------|----------|\n");

    for item in triaged {
        output.push_str(&format!(
            "| {} | {} | {:.2} | {} |\n",
            escape_cell(&item.mail.subject),
            item.result.category,
            item.result.priority_score,
            escape_cell(&item.result.deadline),
        ));
    }

    for item in triaged {
        let result = &item.result;
        output.push_str(&format!("\n## {}\n\n", item.mail.subject));
        output.push_str(&format!("> {}\n", result.summary));

        if !result.action_items.is_empty() {
            output.push_str("\n**Action items:**\n\n");
            for action in &result.action_items {
                output.push_str(&format!("- [ ] {}\n", action));
            }
        }
    }

    output.push_str(&format!("\n---\n*Triaged on {}*\n", triaged_on(triaged)));

    output
}

// Latest stamp across the batch.
fn triaged_on(triaged: &[TriagedMail]) -> String {
    triaged
        .iter()
        .map(|item| item.triaged_at)
        .max()
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mailtriage::TriageResult;

    fn triaged_at(hour: u32) -> TriagedMail {
        TriagedMail {
            mail: IncomingMail::new("Hello", "Hi there."),
            result: TriageResult::default(),
            triaged_at: Utc.with_ymd_and_hms(2026, 3, 15, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_footer_uses_latest_triage_stamp() {
        let triaged = vec![triaged_at(9), triaged_at(11)];
        assert!(format_text(&triaged).contains("Triaged on: 2026-03-15 11:00:00 UTC"));
        assert!(format_markdown(&triaged).contains("*Triaged on 2026-03-15 11:00:00 UTC*"));
    }

    #[test]
    fn test_input_conflicts_with_subject() {
        let args = Args::try_parse_from(["mailtriage", "-i", "mails.json", "-s", "Hi"]);
        assert!(args.is_err());
    }

    #[test]
    fn test_zero_summary_sentences_rejected() {
        assert!(Args::try_parse_from(["mailtriage", "--summary-sentences", "0"]).is_err());
        let args = Args::try_parse_from(["mailtriage", "--summary-sentences", "1"]).unwrap();
        assert_eq!(args.summary_sentences, Some(1));
    }
}
