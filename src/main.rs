use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use vitals::config::{CliArgs, Config};
use vitals::pipeline;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitals=info".into()),
        )
        .init();

    let args = CliArgs::parse();

    if !args.results.exists() {
        error!("result file not found: {}", args.results.display());
        list_siblings(&args.results);
        std::process::exit(1);
    }

    if let Err(e) = run(args).await {
        error!("report generation failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = Config::load(&cwd);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.report.output_dir.clone());

    info!(
        results = %args.results.display(),
        output = %output_dir.display(),
        "generating unified report"
    );

    let paths = pipeline::generate_from_file(&args.results, &output_dir, &config).await?;
    println!("{}", paths.html_latest.display());
    Ok(())
}

/// Diagnostic aid when the expected result file is missing: show what is
/// actually sitting next to it.
fn list_siblings(results: &Path) {
    let dir = results.parent().filter(|p| !p.as_os_str().is_empty());
    let Some(dir) = dir else { return };
    let pattern = dir.join("*").to_string_lossy().to_string();
    let Ok(entries) = glob::glob(&pattern) else {
        return;
    };
    let names: Vec<String> = entries
        .flatten()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    if names.is_empty() {
        eprintln!("no files found in {}", dir.display());
    } else {
        eprintln!("files in {}:", dir.display());
        for name in names {
            eprintln!("  {name}");
        }
    }
}
