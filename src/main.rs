use clap::Parser;
use scholar_homepage::core::ConfigProvider;
use scholar_homepage::utils::error::ErrorSeverity;
use scholar_homepage::utils::{logger, validation::Validate};
use scholar_homepage::{CliConfig, HttpFetcher, LocalStorage, SiteEngine, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let dry_run = cli.dry_run;

    match cli.config.clone() {
        Some(path) => {
            // 載入 TOML 配置
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            config.apply_overrides(&cli);

            init_logging(cli.verbose || config.verbose(), cli.json_logs || config.json_logs());
            tracing::info!("📁 Loaded configuration from: {}", path);
            run(config, dry_run).await
        }
        None => {
            init_logging(cli.verbose, cli.json_logs);
            run(cli, dry_run).await
        }
    }
}

fn init_logging(verbose: bool, json: bool) {
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
}

async fn run<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting homepage-render");

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let engine = SiteEngine::new(LocalStorage::new("."), config);

    match engine.run().await {
        Ok(output) => {
            tracing::debug!("Render report: {}", serde_json::to_string(&output.report)?);
            println!("✅ Page rendered to {}", output.output_path);
            for failed in output.report.failed() {
                println!("⚠️  {} section shows placeholder content", failed.pipeline);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Render failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn perform_dry_run<C: ConfigProvider>(config: &C) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(config.base_url())?;
    let paths = config.data_paths();

    println!("📄 Template: {}", config.template_path());
    println!("💾 Output:   {}", config.output_path());
    println!(
        "📝 Markdown: {}",
        if config.markdown_enabled() { "enabled" } else { "raw text" }
    );
    for path in [&paths.profile, &paths.about, &paths.publications, &paths.service] {
        println!("🌐 GET {}", fetcher.resolve(path)?);
    }

    Ok(())
}
