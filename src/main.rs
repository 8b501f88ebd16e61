use ban_import::utils::error::{ErrorSeverity, ImportError};
use ban_import::utils::logger;
use ban_import::{build_registry, CliConfig, ImportEngine, LocalBanSource, RecordNormalizer};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // 先載入配置，log 格式可能由設定檔決定
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if args.log_json || config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting ban-import");
    tracing::debug!("Resolved config: {:?}", config);
    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - bans will be validated but not registered");
    }

    if let Err(e) = run(&config, args.dry_run).await {
        tracing::error!(
            "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // registry 錯誤，可重試
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: &ban_import::TomlConfig, dry_run: bool) -> Result<(), ImportError> {
    let schema = config.schema_kind()?;
    let normalizer = RecordNormalizer::new(config.identifier_validator()?);
    let registry = build_registry(&config.registry, dry_run)?;

    let engine = ImportEngine::new(
        LocalBanSource::default(),
        config.banfile(),
        schema,
        normalizer,
        registry,
    );
    let report = engine.run().await?;

    println!("✅ Process finished!");
    println!("   Imported bans: {}", report.accepted);
    println!("   Invalid bans: {}", report.rejected);
    Ok(())
}
