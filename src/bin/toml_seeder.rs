use clap::Parser;
use device_seeder::config::toml_config::TomlConfig;
use device_seeder::core::ConfigProvider;
use device_seeder::utils::{logger, validation::Validate};
use device_seeder::app;

#[derive(Parser)]
#[command(name = "toml-seeder")]
#[command(about = "Device fixture seeder driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "seeder.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the RNG seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Write fixtures to the export path instead of POSTing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置 (日誌格式取決於配置，所以先載入)
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(args.verbose, config.json_logs());
    tracing::info!("🚀 Starting TOML-based device seeder");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if args.dry_run {
        config.set_dry_run(true);
        tracing::info!("🔧 Dry run enabled from command line");
    }
    if let Some(seed) = args.seed {
        config.set_seed(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }
    if let Some(monitor) = args.monitor {
        config.set_monitoring(monitor);
        tracing::info!("🔧 Monitoring overridden to: {}", monitor);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    match app::run(&config).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Finished in {}ms",
                (summary.finished_at - summary.started_at).num_milliseconds()
            );
            println!("{}", app::completion_message(&config, &summary));
        }
        Err(e) => {
            tracing::error!(
                "❌ Seeding failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  🌐 Target: {}", config.base_url());
    tracing::info!(
        "  📂 Reference: {} ({}, {}, {})",
        config.reference_dir(),
        config.places_file(),
        config.industries_file(),
        config.kinds_file()
    );
    tracing::info!(
        "  🎲 Plan: {} batches x {} devices, seed: {}",
        config.batches(),
        config.devices_per_batch(),
        config
            .seed()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string())
    );
    if config.dry_run() {
        tracing::info!(
            "  💾 Dry run export: {}/{}",
            config.output_path(),
            config.export_format().file_name()
        );
    }
}
