use anyhow::{Context, Result};
use clap::Parser;
use costar::{
    analysis, cli::Cli, cli::OutputFormat, config::Thresholds, csv_output, filter::RecordFilter,
    html_output, json_output::JsonReport, loader, report,
};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load thresholds from the config file, or the defaults
fn load_thresholds(cli: &Cli) -> Result<Thresholds> {
    let thresholds = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => Thresholds::default(),
    };
    thresholds
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid thresholds: {}", e))?;
    Ok(thresholds)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let thresholds = load_thresholds(&cli)?;

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read input file {}", cli.input.display()))?;
    let records = loader::parse_records(&input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let row_filter = RecordFilter::new(
        cli.filter_function.as_deref(),
        cli.environment.as_deref(),
    )?;
    let records = row_filter.apply(records);

    let result = analysis::analyze(records, &thresholds);

    let rendered = match cli.format {
        OutputFormat::Text => report::to_report_string(&result, &thresholds, cli.top),
        OutputFormat::Json => JsonReport::from_analysis(&result, &thresholds)
            .to_json()
            .context("failed to serialize JSON report")?,
        OutputFormat::Csv => csv_output::to_csv(&result),
        OutputFormat::Html => html_output::to_html(&result, &thresholds, cli.top),
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
