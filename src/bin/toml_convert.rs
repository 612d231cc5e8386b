use clap::Parser;
use contacts_convert::config::toml_config::{PreviewFormat, TomlConfig};
use contacts_convert::core::{ConfigProvider, Pipeline};
use contacts_convert::utils::{logger, validation::Validate};
use contacts_convert::{ContactsPipeline, EtlEngine, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-convert")]
#[command(about = "Contacts conversion driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "contacts-convert.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - validate and sniff the input without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(2);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.category().exit_code());
    }

    tracing::info!(
        "✅ Configuration loaded: {} → {}",
        config.input_path(),
        config.output_path()
    );

    let preview_format = config.preview_format();
    let storage = LocalStorage::default();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        let pipeline = ContactsPipeline::new(storage, config);
        return match pipeline.extract().await {
            Ok(source) => {
                println!(
                    "{} rows, {} columns, delimiter {:?}, encoding {:?}",
                    source.table.len(),
                    source.table.headers.len(),
                    source.delimiter as char,
                    source.encoding
                );
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.category().exit_code());
            }
        };
    }

    let engine = EtlEngine::new(ContactsPipeline::new(storage, config));

    match engine.run().await {
        Ok(summary) => {
            if !summary.preview.source.is_empty() {
                match preview_format {
                    PreviewFormat::Json => {
                        println!("{}", summary.preview.to_json()?)
                    }
                    PreviewFormat::Text => println!("{}", summary.preview),
                }
            }
            println!(
                "✅ Converted {} contacts → {}",
                summary.contacts, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.category().exit_code());
        }
    }

    Ok(())
}
