use clap::ArgMatches;
use tracing::{info, warn};

use opsboard_core::config::{self, OpsboardConfig};
use opsboard_core::nav::NavRouter;
use opsboard_core::storage::{self, FileStore};
use opsboard_core::{HttpConfigSource, PageMap, PageSession};

use crate::console::{ConsoleNavigator, ConsoleSidebar};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_or_default() -> OpsboardConfig {
    match config::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: failed to load config, using defaults: {}", e);
            warn!(event = "cli.config.load_failed", error = %e);
            OpsboardConfig::default()
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("fix", _)) => handle_fix(),
        Some(("routes", _)) => handle_routes(),
        Some(("resolve", sub_matches)) => handle_resolve(sub_matches),
        Some(("watch", sub_matches)) => handle_watch(sub_matches),
        _ => unreachable!("Subcommand required by clap"),
    }
}

fn handle_fix() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open_default();
    if let Some(load_error) = store.load_error() {
        eprintln!("Warning: {}", load_error);
    }

    info!(event = "cli.fix.started", path = %store.path().display());
    let events = storage::check_and_fix(&mut store)?;

    if events.is_empty() {
        println!("Client state already consistent");
    } else {
        println!("Avatar URLs updated");
    }
    Ok(())
}

fn handle_routes() -> Result<(), Box<dyn std::error::Error>> {
    let pages = PageMap::standard();
    for route in pages.routes() {
        let target = if route.target.is_empty() {
            "(landing page)"
        } else {
            route.target.as_str()
        };
        println!("{}\t{}", route.label, target);
    }
    Ok(())
}

fn handle_resolve(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_or_default();
    let label = matches
        .get_one::<String>("label")
        .expect("label is a required argument");
    let document_path = matches
        .get_one::<String>("document-path")
        .map(String::as_str)
        .unwrap_or_else(|| config.document_path());

    let router = NavRouter::new(PageMap::standard(), document_path);
    let destination = router.resolve_destination(label)?;
    println!("{}", destination);
    Ok(())
}

fn handle_watch(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_or_default();
    let base_url = matches
        .get_one::<String>("base-url")
        .map(String::as_str)
        .unwrap_or_else(|| config.base_url())
        .to_string();
    let document_path = config.document_path().to_string();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch_session(base_url, document_path))
}

async fn watch_session(
    base_url: String,
    document_path: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = PageMap::standard();
    let sidebar = ConsoleSidebar::from_page_map(&pages);

    let mut session = PageSession::new(
        Box::new(FileStore::open_default()),
        Box::new(sidebar),
        Box::new(ConsoleNavigator),
        pages,
        &document_path,
    );
    let mut events = session.subscribe();

    let source = HttpConfigSource::new(base_url);
    let settings = session
        .initialize(&source, std::sync::Arc::new(|| {}))
        .await;

    for warning in session.startup_warnings() {
        eprintln!("Warning: {}", warning);
    }

    if settings.enabled {
        println!(
            "Auto-refresh enabled, interval {}s. Press Ctrl-C to stop.",
            settings.interval.as_secs()
        );
    } else {
        println!("Auto-refresh disabled. Press Ctrl-C to exit.");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                session.stop_auto_refresh();
                info!(event = "cli.watch.stopped");
                break;
            }
            event = events.recv() => match event {
                Ok(page_event) => println!("{}", serde_json::to_string(&page_event)?),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(event = "cli.watch.events_lagged", skipped = skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}
