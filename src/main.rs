// vision-ask - ask an OpenAI vision model questions about an image

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use tokio::signal;
use tracing::{info, warn};
use vision_ask::cli::{Args, Command};
use vision_ask::config::AppConfig;
use vision_ask::credentials::Credential;
use vision_ask::error::VisionError;
use vision_ask::openai::OpenAiClient;
use vision_ask::server::{create_router, AppState};
use vision_ask::upload::validate_upload;
use vision_ask::utils::logging;
use vision_ask::vision;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;

    // Phase 3: Resolve the credential once; everything downstream gets it injected
    let credential = match Credential::from_env(&config.openai.api_key_env) {
        Ok(credential) => Some(credential),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    let client = OpenAiClient::new(&config.openai)?;

    match args.command {
        Command::Serve {
            host,
            port,
            data_dir,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.uploads.data_dir = data_dir;
            }
            serve(config, client, credential).await
        }
        Command::Ask { image, question } => {
            match ask(&config, &client, credential.as_ref(), &image, &question).await {
                Ok(answer) => {
                    println!("{}", answer);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

async fn serve(config: AppConfig, client: OpenAiClient, credential: Option<Credential>) -> Result<()> {
    info!("Starting vision-ask v{}", env!("CARGO_PKG_VERSION"));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(AppState::new(config, client, credential))?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn ask(
    config: &AppConfig,
    client: &OpenAiClient,
    credential: Option<&Credential>,
    image: &Path,
    question: &str,
) -> vision_ask::error::Result<String> {
    let credential = credential
        .ok_or_else(|| VisionError::MissingCredential(config.openai.api_key_env.clone()))?;

    let bytes = vision::read_image(image).await?;
    validate_upload(
        &image.to_string_lossy(),
        &bytes,
        config.uploads.max_image_bytes,
    )?;

    vision::analyze(
        client,
        Some(credential),
        &bytes,
        question,
        &config.openai.api_key_env,
    )
    .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
