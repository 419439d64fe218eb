use clap::Parser;
use table_assign::config::cli::{CheckArgs, Command};
use table_assign::domain::time::{parse_clock, parse_date};
use table_assign::utils::error::{AssignError, ErrorSeverity};
use table_assign::utils::{logger, validation::Validate};
use table_assign::{AssignmentEngine, CliConfig, EngineConfig, JsonSnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入引擎設定（未指定則使用預設值）
    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, Some(config.log_level()));
    } else {
        logger::init_cli_logger(cli.verbose, Some(config.log_level()));
    }

    tracing::info!("🚀 Starting table-assign");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli.command, config).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: &Command, config: EngineConfig) -> table_assign::Result<String> {
    match command {
        Command::Assign(args) => {
            let engine = AssignmentEngine::try_new(JsonSnapshotStore::new(&args.snapshot), config)?;
            let result = engine.assign(&args.payload()?).await?;
            Ok(serde_json::to_string_pretty(&result)?)
        }
        Command::Availability(args) => {
            let engine = AssignmentEngine::try_new(JsonSnapshotStore::new(&args.snapshot), config)?;
            let tables = engine.available_tables(&args.payload()?).await?;
            Ok(serde_json::to_string_pretty(&tables)?)
        }
        Command::Check(args) => check(args, config).await,
    }
}

async fn check(args: &CheckArgs, config: EngineConfig) -> table_assign::Result<String> {
    let date = parse_date(&args.date).ok_or_else(|| {
        AssignError::invalid_request("date", format!("'{}' is not a YYYY-MM-DD date", args.date))
    })?;
    let time = parse_clock(&args.time).ok_or_else(|| {
        AssignError::invalid_request("time", format!("'{}' is not an HH:MM time", args.time))
    })?;

    let engine = AssignmentEngine::try_new(JsonSnapshotStore::new(&args.snapshot), config)?;
    let conflicts = engine
        .table_conflicts(&args.restaurant, &args.table, date, time, args.duration)
        .await?;

    if conflicts.is_empty() {
        tracing::info!("✅ Table {} is free", args.table);
    } else {
        tracing::info!("⛔ Table {} has {} conflicts", args.table, conflicts.len());
    }
    Ok(serde_json::to_string_pretty(&conflicts)?)
}
