use clap::Parser;
use incident_etl::config::toml_config::TomlConfig;
use incident_etl::domain::ports::ConfigProvider;
use incident_etl::utils::{logger, validation::Validate};
use incident_etl::{EtlEngine, LocalStorage, TranscodePipeline};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Incident CSV to JSON conversion driven by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "incident-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be processed without reading or writing data
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if args.dry_run {
        println!("Pipeline:       {}", config.pipeline.name);
        println!("Input:          {}", config.input_path());
        println!("Output:         {}", config.output_path());
        println!("Numeric fields: {}", config.numeric_fields().join(", "));
        println!("Indent:         {}", config.indent());
        println!("Monitoring:     {}", monitor_enabled);
        return;
    }

    tracing::info!("🚀 Running pipeline '{}'", config.pipeline.name);

    let pipeline = TranscodePipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => println!("OK -> {}", output_path),
        Err(e) => {
            tracing::error!("❌ Pipeline failed: {} ({:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
