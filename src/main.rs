use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use fitcontent_api::{RestApi, ServiceConfig};
use fitcontent_storage::{seed_catalog, CatalogStore};

/// Content-catalog service for exercises, workouts, and instructional media
#[derive(Parser, Debug)]
#[command(name = "fitcontent")]
#[command(about = "Fitness content-catalog service", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Base URL of the media service (videos)
    #[arg(long)]
    media_service_url: Option<String>,

    /// Base URL of the comms service (notifications)
    #[arg(long)]
    comms_service_url: Option<String>,

    /// Seconds between background catalog saves
    #[arg(long, default_value_t = 300)]
    save_interval_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting fitcontent v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let store = Arc::new(CatalogStore::open(&args.data_dir)?);
    if store.is_empty() {
        seed_catalog(&store)?;
        info!(
            exercises = store.exercise_count(),
            workouts = store.workout_count(),
            "Seeded catalog with starter content"
        );
    }
    store.start_background_save(Duration::from_secs(args.save_interval_secs));
    info!("Storage initialized");

    let services = ServiceConfig {
        media_base_url: args.media_service_url.clone(),
        comms_base_url: args.comms_service_url.clone(),
        timeout: Duration::from_secs(5),
    };

    let store_http = store.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(store_http, services, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("fitcontent started successfully");
    info!("HTTP API: http://localhost:{}/content", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Saving catalog before shutdown...");
    store.save()?;
    info!("Shutting down...");
    Ok(())
}
