mod config;

use clap::{Parser, Subcommand, ValueEnum};
use config::SitegenConfig;
use sitegen_agent::ProviderBackendFactory;
use sitegen_core::{ApiKey, BusinessContext};
use sitegen_gateway::GatewayServer;
use sitegen_orchestrator::{ExecutionMode, Orchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitegen", about = "sitegen, a multi-agent website configuration generator")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "sitegen.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one orchestration and print the result as JSON
    Generate {
        /// What the site should be
        #[arg(short, long)]
        prompt: String,
        /// JSON file with the business context
        #[arg(long, conflicts_with_all = ["name", "industry"])]
        business: Option<PathBuf>,
        /// Business name (instead of --business)
        #[arg(long, requires = "industry")]
        name: Option<String>,
        /// Business industry (instead of --business)
        #[arg(long, requires = "name")]
        industry: Option<String>,
        /// What the business does (with --name)
        #[arg(long, requires = "name")]
        description: Option<String>,
        /// Who the site speaks to (with --name)
        #[arg(long, requires = "name")]
        audience: Option<String>,
        /// Tone of voice (with --name)
        #[arg(long, requires = "name")]
        tone: Option<String>,
        /// Execution mode (overrides config)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Start the HTTP gateway
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequential,
    Parallel,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Parallel => ExecutionMode::Parallel,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = SitegenConfig::load(&cli.config).await?;

    // The key is read once here and passed explicitly into every run.
    let api_key = std::env::var(&config.api_key_env)
        .map(ApiKey::new)
        .map_err(|_| anyhow::anyhow!("Environment variable {} is not set", config.api_key_env))?;

    let orchestrator_config = config.orchestrator.to_config();
    let backends = Arc::new(ProviderBackendFactory::new(config.model.clone()));
    let orchestrator = Orchestrator::from_backends(backends, orchestrator_config);

    match cli.command {
        Commands::Generate {
            prompt,
            business,
            name,
            industry,
            description,
            audience,
            tone,
            mode,
        } => {
            let business = match (business, name, industry) {
                (Some(path), _, _) => {
                    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
                        anyhow::anyhow!("Failed to read business file {}: {e}", path.display())
                    })?;
                    Some(serde_json::from_str::<BusinessContext>(&raw)?)
                }
                (None, Some(name), Some(industry)) => {
                    let mut ctx = BusinessContext::new(name, industry);
                    if let Some(description) = description {
                        ctx = ctx.with_description(description);
                    }
                    if let Some(audience) = audience {
                        ctx = ctx.with_target_audience(audience);
                    }
                    if let Some(tone) = tone {
                        ctx = ctx.with_tone(tone);
                    }
                    Some(ctx)
                }
                _ => None,
            };
            let mode = mode.map_or(orchestrator.default_mode(), ExecutionMode::from);

            let result = orchestrator
                .run(&prompt, business.as_ref(), mode, &api_key)
                .await;

            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");

            let app = GatewayServer::build(Arc::new(orchestrator), api_key);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!(addr = %addr, provider = ?config.model.provider, "sitegen gateway listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
