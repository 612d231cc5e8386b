use clap::Parser;
use contacts_convert::utils::{logger, validation::Validate};
use contacts_convert::{CliConfig, ContactsPipeline, EtlEngine, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting contacts-convert CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.category().exit_code());
    }

    let preview_json = config.preview_json;
    let pipeline = ContactsPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            if !summary.preview.source.is_empty() {
                if preview_json {
                    println!("{}", summary.preview.to_json()?);
                } else {
                    println!("{}", summary.preview);
                }
            }
            println!(
                "✅ Converted {} contacts → {}",
                summary.contacts, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());

            // 輸出用戶友好的錯誤信息，不產生任何輸出檔
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.category().exit_code());
        }
    }

    Ok(())
}
