#[cfg(not(any(all(target_os = "macos", target_arch = "aarch64"), target_os = "ios")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use cviz::{gallery_router, GalleryState, TemplateRenderer, ViewModel, GALLERY_PATH};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod browser;
mod config;

/// Browse classification results as a local image gallery
#[derive(Parser, Debug)]
#[command(name = "cviz", version, about)]
struct Cli {
    /// JSON file with `classes` and `objects`
    input: PathBuf,

    /// Print the gallery URL without launching a browser
    #[arg(long)]
    no_open: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("cviz: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config::Config::from_env()?;
    if cli.no_open {
        config.open_browser = false;
    }

    tracing::info!(input = %cli.input.display(), "Loading classification results");
    let model = ViewModel::load(&cli.input, &config.colors).await?;
    tracing::info!(
        classes = model.classes.len(),
        objects = model.objects.len(),
        labeled = model.summary.labeled,
        "Built gallery"
    );

    let renderer = Arc::new(TemplateRenderer::new()?);
    let state = GalleryState::new(model, renderer).with_default_limit(config.page_limit);
    let app = gallery_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let addr = listener.local_addr()?;
    let url = format!("http://{}{}", addr, GALLERY_PATH);
    tracing::info!("Gallery listening on {}", addr);

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    println!("Opening cviz at: {}", url);
    if config.open_browser {
        if let Err(e) = browser::open_url(&url) {
            tracing::warn!(error = %e, "Could not open a browser, visit {} manually", url);
        }
    }

    server.await??;
    tracing::info!("Gallery stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gallery");
}
