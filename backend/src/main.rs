use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use culture_selector::{AppState, build_router, config::Config};

#[derive(Parser, Debug)]
#[command(name = "culture-selector", version, about = "Culture selection service")]
struct Args {
    /// Path to config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the listening port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let (mut config, notes) = Config::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _guard = init_logging(&config)?;
    notes.iter().for_each(|note| note.log());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Default culture {}, cookie {}",
        config.localization.default_culture,
        config.localization.cookie_name
    );

    let state = Arc::new(AppState::new(&config.localization)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Install stdout logging plus an optional daily-rolling log file.
fn init_logging(config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let stdout_layer = tracing_subscriber::fmt::layer().with_filter(filter());

    let (file_layer, guard) = match config.logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("logging.file has no file name: {}", file))?;
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry().with(stdout_layer).with(file_layer).try_init()?;

    Ok(guard)
}
