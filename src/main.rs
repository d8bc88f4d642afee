// src/main.rs
// EduMentor - AI learning assistant backend

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

use edumentor::{
    AppState, Tutor,
    api::create_router,
    config::CONFIG,
    llm::{LlmError, provider::build_provider},
};

#[derive(Parser)]
#[command(name = "edumentor")]
#[command(about = "AI-powered learning assistant backend for students")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Address to bind (overrides EDUMENTOR_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides EDUMENTOR_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send one message through the tutor and print the reply
    Ask {
        /// The message to send
        message: String,

        /// Session id to use
        #[arg(long, default_value = "cli")]
        session: String,
    },
}

/// Build the provider, check its credentials, and wire up the tutor
async fn init_tutor() -> Result<Tutor, LlmError> {
    let provider = build_provider(&CONFIG)?;
    info!("Validating {} credentials", provider.name());

    match tokio::time::timeout(CONFIG.llm_timeout(), provider.validate()).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(LlmError::Transient(
                "credential check timed out".to_string(),
            ));
        }
    }

    Ok(Tutor::new(provider, CONFIG.tutor_config()))
}

async fn run_server(host: Option<String>, port: Option<u16>) -> Result<()> {
    let state = match init_tutor().await {
        Ok(tutor) => {
            info!("Tutor initialized with provider {}", tutor.provider_name());
            AppState::new(tutor)
        }
        Err(e) => {
            error!("Failed to initialize tutor: {}", e);
            warn!("Serving without a tutor; content endpoints will return 500");
            AppState::uninitialized()
        }
    };

    let app = create_router(state, &CONFIG.cors_origin);

    let addr = match (host, port) {
        (None, None) => CONFIG.bind_address(),
        (host, port) => format!(
            "{}:{}",
            host.unwrap_or_else(|| CONFIG.host.clone()),
            port.unwrap_or(CONFIG.port)
        ),
    };
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("EduMentor running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_ask(message: String, session: String) -> Result<()> {
    let tutor = init_tutor().await?;
    let reply = tutor.process_message(&session, &message).await?;
    println!("{}", reply);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(CONFIG.tracing_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => run_server(host, port).await,
        None => run_server(None, None).await,
        Some(Commands::Ask { message, session }) => run_ask(message, session).await,
    }
}
