use clap::Parser;
use league_standings::config::LogFormat;
use league_standings::core::{ConfigProvider, StandingsQuery};
use league_standings::utils::error::{ErrorSeverity, Result, StandingsError};
use league_standings::utils::{logger, validation::Validate};
use league_standings::{
    ApiKey, CliConfig, EtlEngine, LeagueCatalog, LocalStorage, SelectionDriver, StandingsFetcher,
    StandingsPipeline, StandingsService,
};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting league-standings");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ league-standings failed: {} (Category: {:?}, Severity: {:?})",
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
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;
    let catalog = Arc::new(config.catalog()?);

    if cli.list_leagues {
        for (index, entry) in catalog.entries().iter().enumerate() {
            println!("{:>2}. {:<28} {:>5}", index + 1, entry.name, entry.id);
        }
        return Ok(());
    }

    // Fail before any request if the key is missing.
    let api_key = ApiKey::from_env(config.api_key_env())?;
    let fetcher = StandingsFetcher::from_config(&config, api_key)?;
    let league = cli
        .league
        .clone()
        .unwrap_or_else(|| catalog.default_league().name.clone());

    if cli.export {
        let league_id = catalog
            .resolve(&league)
            .ok_or_else(|| StandingsError::UnknownLeague { name: league.clone() })?;
        let query = StandingsQuery::new(league_id, config.season());

        let storage = LocalStorage::new(config.output_path().to_string());
        let monitor_enabled = config.monitoring_enabled();
        if monitor_enabled {
            tracing::info!("🔍 System monitoring enabled");
        }
        let pipeline = StandingsPipeline::new(fetcher, storage, config);
        let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

        let output_path = engine.run(query).await?;
        println!("✅ {} standings exported to {}", league, output_path);
        return Ok(());
    }

    let season = config.season();
    let service = Arc::new(StandingsService::new(fetcher, Arc::clone(&catalog), season));

    if cli.interactive {
        return interactive(service, catalog, league).await;
    }

    let view = service.standings_for(&league).await;
    println!("{} {}", league, season);
    print!("{}", view);
    Ok(())
}

/// Accepts a 1-based catalog index or a league name.
fn pick_league(catalog: &LeagueCatalog, input: &str) -> Option<String> {
    if let Ok(index) = input.parse::<usize>() {
        return catalog
            .entries()
            .get(index.checked_sub(1)?)
            .map(|entry| entry.name.clone());
    }
    catalog
        .resolve(input)
        .and_then(|id| catalog.name_of(id))
        .map(str::to_string)
}

async fn interactive(
    service: Arc<StandingsService<StandingsFetcher>>,
    catalog: Arc<LeagueCatalog>,
    initial: String,
) -> Result<()> {
    let season = service.season();

    println!("Select a league (number or name, 'q' to quit):");
    for (index, name) in catalog.names().enumerate() {
        println!("  {}. {}", index + 1, name);
    }

    let (selection_tx, selection_rx) = watch::channel(Some(initial));
    let (mut displays, driver) = SelectionDriver::new(service).spawn(selection_rx);

    let printer = tokio::spawn(async move {
        while displays.changed().await.is_ok() {
            let current = displays.borrow_and_update().clone();
            if let Some(display) = current {
                println!("\n{} {}", display.league, season);
                print!("{}", display.view);
            }
        }
    });

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "q" | "quit" | "exit") {
            break;
        }

        match pick_league(&catalog, input) {
            Some(name) => {
                selection_tx.send_replace(Some(name));
            }
            None => eprintln!("Unknown league: {}", input),
        }
    }

    drop(selection_tx);
    if let Err(e) = driver.await {
        tracing::error!("Selection driver stopped abnormally: {}", e);
    }
    if let Err(e) = printer.await {
        tracing::error!("Display task stopped abnormally: {}", e);
    }

    Ok(())
}
