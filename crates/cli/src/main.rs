mod config_commands;
mod schema_commands;

use std::{path::PathBuf, sync::Arc};

use {
    clap::{Parser, Subcommand},
    scribe_config::{ScribeConfig, StoreBackend},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "scribe", about = "GraphQL sandbox for a blog document store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (overrides discovery in ./ and ~/.config/scribe/).
    #[arg(long, global = true, env = "SCRIBE_CONFIG")]
    config: Option<PathBuf>,

    // Server arguments (used when no subcommand is provided, or with `serve`)
    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Document store backend: memory or sqlite (overrides config value).
    #[arg(long, global = true)]
    store: Option<StoreBackend>,
    /// SQLite database URL (overrides config value).
    #[arg(long, global = true)]
    database_url: Option<String>,
    /// Do not serve the GraphiQL console on GET /.
    #[arg(long, global = true, default_value_t = false)]
    no_graphiql: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GraphQL server (default when no subcommand is provided).
    Serve,
    /// Print the GraphQL schema as SDL.
    Schema {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Config file (or defaults), then `SCRIBE_*` env, then CLI flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<ScribeConfig> {
    resolve_config_with(cli, |name| std::env::var(name).ok())
}

fn resolve_config_with(
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ScribeConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => scribe_config::load_config(path)?,
        None => scribe_config::discover_and_load(),
    };
    scribe_config::apply_env_overrides_with(&mut config, env)?;
    apply_cli_overrides(cli, &mut config);
    Ok(config)
}

fn apply_cli_overrides(cli: &Cli, config: &mut ScribeConfig) {
    if let Some(ref bind) = cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.no_graphiql {
        config.server.graphiql = false;
    }
    if let Some(backend) = cli.store {
        config.store.backend = backend;
    }
    if let Some(ref url) = cli.database_url {
        config.store.database_url = url.clone();
    }
}

async fn run_server(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli)?;

    let store = scribe_store::open_store(&config.store).await?;
    let schema = scribe_graphql::build_schema(Arc::clone(&store));

    let result =
        scribe_gateway::serve(&config.server, schema, scribe_gateway::shutdown_signal()).await;

    store.close().await;
    info!("document store closed");
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    match &cli.command {
        // Default: start the server when no subcommand is provided
        None | Some(Commands::Serve) => {
            info!(version = env!("CARGO_PKG_VERSION"), "scribe starting");
            run_server(&cli).await
        },
        Some(Commands::Schema { output }) => schema_commands::export(output.as_deref()),
        Some(Commands::Config { action }) => match action {
            config_commands::ConfigAction::Check { verbose } => {
                if !config_commands::check(cli.config.as_deref(), *verbose) {
                    std::process::exit(1);
                }
                Ok(())
            },
            config_commands::ConfigAction::Show => config_commands::show(&resolve_config(&cli)?),
        },
    }
}
