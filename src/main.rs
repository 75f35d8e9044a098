// keyword-cluster CLI
// 1 行 1 キーワードを file か stdin から読み、JSON レポートを stdout に出す
// ログは stderr (RUST_LOG, デフォルト warn)

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use keyword_cluster::{ClusterConfig, ClusterReport, KeywordClusterer, LogBuffer};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "keyword-cluster")]
#[command(about = "Group SEO keywords by n-gram similarity and label their search intent", long_about = None)]
struct Cli {
    /// Keyword file, one keyword per line (stdin when omitted)
    input: Option<PathBuf>,

    /// Minimum combined similarity for joining a cluster (overrides the config file)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Config file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print only the summary
    #[arg(long)]
    summary_only: bool,

    /// Keep the last N debug log entries and print them to stderr at exit
    #[arg(long, value_name = "N")]
    debug_log: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_buffer = cli.debug_log.map(LogBuffer::with_capacity);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(env_filter),
        )
        .with(log_buffer.clone().map(|buffer| buffer.with_filter(LevelFilter::DEBUG)))
        .init();

    let mut config = match &cli.config {
        Some(path) => ClusterConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ClusterConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }
    let clusterer = KeywordClusterer::new(config).context("invalid clustering config")?;

    let text = read_input(cli.input.as_ref())?;
    let keywords = parse_keywords(&text);
    tracing::info!(keywords = keywords.len(), "read keywords");

    let report = ClusterReport::new(clusterer.cluster(&keywords));
    let output = if cli.summary_only {
        if cli.pretty {
            serde_json::to_string_pretty(&report.summary)?
        } else {
            serde_json::to_string(&report.summary)?
        }
    } else if cli.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{output}");

    if let Some(buffer) = log_buffer {
        for entry in buffer.drain() {
            eprintln!("{entry}");
        }
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// 空行は捨てて前後の空白を落とす
fn parse_keywords(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keywords_skips_blank_lines() {
        let text = "seo tools\n\n  seo tool  \r\n\t\nbest pizza";
        assert_eq!(parse_keywords(text), vec!["seo tools", "seo tool", "best pizza"]);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["keyword-cluster", "kw.txt", "-t", "0.6", "--pretty", "--debug-log", "50"]);
        assert_eq!(cli.input, Some(PathBuf::from("kw.txt")));
        assert_eq!(cli.threshold, Some(0.6));
        assert!(cli.pretty);
        assert!(!cli.summary_only);
        assert_eq!(cli.debug_log, Some(50));
        assert!(cli.config.is_none());
    }
}
