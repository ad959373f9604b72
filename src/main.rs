use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zap2xml::{
    config::{
        Config,
        defaults::{DEFAULT_CONFIG_FILE, MAX_TIMESPAN_HOURS},
    },
    ingestor::ingest_listings,
    sources::GridSource,
    utils::{
        StandardHttpClient,
        human_format::{format_elapsed, format_size},
    },
    xmltv::XmltvGenerator,
};

#[derive(Parser, Debug)]
#[command(name = "zap2xml")]
#[command(version)]
#[command(about = "Fetch grid TV listings and write them as an XMLTV guide")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Append " *" to titles of new or live airings
    #[arg(long, alias = "appendAsterisk")]
    append_asterisk: bool,

    /// Emit the xmltv_ns episode number first
    #[arg(long)]
    mediaportal: bool,

    /// Lineup ID
    #[arg(long, alias = "lineupId", value_name = "ID")]
    lineup_id: Option<String>,

    /// Hours of listings to fetch (up to 360)
    #[arg(long, value_name = "HOURS", value_parser = clap::value_parser!(u32).range(1..=MAX_TIMESPAN_HOURS as i64))]
    timespan: Option<u32>,

    /// Grid preferences, comma separated
    #[arg(long, value_name = "PREFS")]
    pref: Option<String>,

    /// Country code
    #[arg(long, value_name = "CODE")]
    country: Option<String>,

    /// Postal code
    #[arg(long, alias = "postalCode", value_name = "ZIP")]
    postal_code: Option<String>,

    /// Custom user agent (random browser user agent if not set)
    #[arg(long, alias = "userAgent", value_name = "AGENT")]
    user_agent: Option<String>,

    /// Output file
    #[arg(long, alias = "outputFile", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Override configuration values with the ones given on the command line
    fn apply_overrides(&self, config: &mut Config) {
        if self.append_asterisk {
            config.output.append_asterisk = true;
        }
        if self.mediaportal {
            config.output.mediaportal = true;
        }
        if let Some(lineup_id) = &self.lineup_id {
            config.listings.lineup_id = lineup_id.clone();
        }
        if let Some(timespan) = self.timespan {
            config.listings.timespan_hours = timespan;
        }
        if let Some(pref) = &self.pref {
            config.listings.pref = pref.clone();
        }
        if let Some(country) = &self.country {
            config.listings.country = country.clone();
        }
        if let Some(postal_code) = &self.postal_code {
            config.listings.postal_code = postal_code.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.listings.user_agent = Some(user_agent.clone());
        }
        if let Some(output_file) = &self.output_file {
            config.output.file = output_file.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("zap2xml={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load_from_file(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    info!("Starting zap2xml v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: country={}, postal_code={}, lineup_id={}, output_file={}",
        config.listings.country,
        config.listings.postal_code,
        config.listings.lineup_id,
        config.output.file.display()
    );

    let started = Instant::now();

    let client = StandardHttpClient::with_timeout(config.listings.request_timeout)?;
    let source = GridSource::new(Box::new(client), config.listings.clone());
    let payload = ingest_listings(&source, Utc::now().timestamp()).await?;
    info!("Fetched {} channels", payload.len());

    let generator = XmltvGenerator::new(config.output.xmltv_options());
    let xmltv = generator.generate(&payload);

    info!("Writing XMLTV to {}", config.output.file.display());
    tokio::fs::write(&config.output.file, xmltv.as_bytes()).await?;
    info!(
        "XMLTV file created successfully ({}) in {}",
        format_size(xmltv.len()),
        format_elapsed(started.elapsed())
    );

    Ok(())
}
