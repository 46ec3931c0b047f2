use clap::Parser;
use state_city_join::core::ConfigProvider;
use state_city_join::utils::{logger, validation::Validate};
use state_city_join::{
    CliConfig, EtlEngine, EtlError, JoinPipeline, LocalStorage, RunSummary, TomlConfig,
    WriteOutcome,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    let quiet = cli.quiet;

    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                logger::init_cli_logger(cli.verbose || config.verbose());
                tracing::info!("📁 Loaded configuration from: {}", path);
                let base_dir = config.base_dir().to_string();
                run(config, base_dir).await
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(e.severity().exit_code());
            }
        },
        None => {
            logger::init_cli_logger(cli.verbose);
            tracing::debug!("CLI config: {:?}", cli);
            let base_dir = cli.base_dir.clone();
            run(cli, base_dir).await
        }
    };

    match result {
        Ok(summary) => report(&summary, quiet),
        Err(e) => {
            tracing::error!(
                "❌ Join failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }
}

async fn run<C>(config: C, base_dir: String) -> Result<RunSummary, EtlError>
where
    C: ConfigProvider + Validate,
{
    // 驗證配置
    config.validate()?;

    let storage = LocalStorage::new(base_dir);
    let engine = EtlEngine::new(JoinPipeline::new(storage, config));
    engine.run().await
}

/// 先印出合併結果，再回報寫檔狀態；寫檔失敗不改變結束碼
fn report(summary: &RunSummary, quiet: bool) {
    if !quiet {
        match serde_json::to_string_pretty(&summary.records) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::warn!("Could not print merged records: {}", e),
        }
    }

    match &summary.outcome {
        WriteOutcome::Saved { .. } => println!("The file was saved!"),
        WriteOutcome::Failed { reason } => eprintln!("❌ {}", reason),
    }
}
