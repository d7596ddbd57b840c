use clap::Parser;
use name_roster::config::toml_config::TomlConfig;
use name_roster::domain::ports::ConfigProvider;
use name_roster::utils::{logger, validation::Validate};
use name_roster::{LocalStorage, RosterEngine, RosterPipeline};

#[derive(Parser)]
#[command(name = "toml-roster")]
#[command(about = "Roster builds driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "roster-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override max_records from the config
    #[arg(long)]
    max_records: Option<usize>,

    /// Show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting TOML-driven roster build");
    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(max_records) = args.max_records {
        config.extract.max_records = Some(max_records);
        tracing::info!("max_records overridden to: {}", max_records);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("Configuration loaded and validated successfully");

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no records will be processed");
        return Ok(());
    }

    let storage = LocalStorage::new(".");
    let pipeline = RosterPipeline::new(storage, config);
    let engine = RosterEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Roster built successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Roster build failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("Pipeline: {} v{}", config.pipeline.name, config.pipeline.version);
    tracing::info!("Source: {}", config.source());
    tracing::info!(
        "Output: {} ({})",
        config.output_path(),
        config.output_formats().join(", ")
    );
    if let Some(max_records) = config.max_records() {
        tracing::info!("Record limit: {}", max_records);
    }
}
