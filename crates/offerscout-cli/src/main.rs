use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use offerscout_core::AppConfig;
use offerscout_scraper::{JsonFileSink, OfferPipeline, ScraperError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "offerscout")]
#[command(about = "Fetch third-party seller offers for a single product page")]
struct Cli {
    /// Product page URL. Read from stdin when omitted.
    url: Option<String>,

    /// Where to write the offers JSON (overrides OFFERSCOUT_OUTPUT_PATH).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides OFFERSCOUT_REQUEST_TIMEOUT_SECS).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = offerscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    cli.apply(&mut config);
    tracing::debug!(?config, "loaded configuration");

    let url = match cli.url {
        Some(url) => url,
        None => prompt_product_url(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let pipeline = match OfferPipeline::new(&url, &config) {
        Ok(pipeline) => pipeline,
        Err(err) => return Ok(report_failure(&err)),
    };
    let sink = JsonFileSink::new(&config.output_path);

    match pipeline.run_into(&sink).await {
        Ok(report) => {
            println!(
                "Fetched seller offers for SKU {} in {:.2} seconds.",
                report.sku,
                report.elapsed.as_secs_f64()
            );
            println!("Saved to {}", sink.path().display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_failure(&err)),
    }
}

fn prompt_product_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<String> {
    write!(output, "Enter the product link: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let url = line.trim();
    if url.is_empty() {
        anyhow::bail!("no product link given");
    }
    Ok(url.to_string())
}

fn report_failure(err: &ScraperError) -> ExitCode {
    let stage = err.stage();
    tracing::error!(%stage, error = %err, "pipeline halted");
    eprintln!("{stage} stage failed: {err}");
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests;
