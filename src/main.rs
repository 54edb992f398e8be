use clap::Parser;
use std::time::Instant;
use volby_scrape::utils::{logger, validation::Validate};
use volby_scrape::{
    CliConfig, ElectionPipeline, EtlEngine, HttpFetcher, LocalStorage, ScrapeError,
    ScrapeSettings,
};

fn exit_with(e: &ScrapeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let start_time = Instant::now();
    let args = CliConfig::parse();

    logger::init_cli_logger();
    tracing::debug!("CLI arguments: {:?}", args);

    let settings = ScrapeSettings::from_env().unwrap_or_else(|e| exit_with(&e));
    let config = args.with_settings(settings);

    // Nothing is fetched until both arguments pass validation.
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let monitor_enabled = config.settings.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let fetcher = HttpFetcher::new(&config.settings.user_agent).unwrap_or_else(|e| exit_with(&e));
    let storage = LocalStorage::new(String::new());
    let pipeline = ElectionPipeline::new(fetcher, storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    if let Err(e) = engine.run().await {
        exit_with(&e);
    }

    println!(
        "Execution time: {:.3} sec",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
