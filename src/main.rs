use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use gym_client::config::{ClientConfig, ConfigError, DEFAULT_STORAGE_PATH, Timeouts};
use gym_client::net::{ApiClient, ApiError};
use gym_client::router::{Access, History, Navigate, RouteTable};
use gym_client::state::session::Session;
use gym_client::state::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gym-client", about = "Gym class-management API client and route checker")]
struct Cli {
    /// Overrides `GYM_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `GYM_API_PREFIX`.
    #[arg(long)]
    api_prefix: Option<String>,

    #[arg(long, env = "GYM_STORAGE_PATH", default_value = DEFAULT_STORAGE_PATH)]
    storage: PathBuf,

    /// Overrides `GYM_REQUEST_TIMEOUT_SECS`.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout_secs: Option<u64>,

    /// Overrides `GYM_CONNECT_TIMEOUT_SECS`.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    connect_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the token, username, and role.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "GYM_PASSWORD")]
        password: String,
    },
    /// Forget the stored credentials.
    Logout,
    /// Show the stored credentials; `--remote` asks `/me` instead.
    Whoami {
        #[arg(long, default_value_t = false)]
        remote: bool,
    },
    Get {
        path: String,
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    Post {
        path: String,
        #[arg(long)]
        data: String,
    },
    Put {
        path: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        path: String,
    },
    /// Run the route guard for a target and print where it lands.
    Navigate {
        target: String,
    },
    /// Print the route table.
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = apply_overrides(ClientConfig::from_env()?, &cli)?;

    let session = Session::new(Arc::new(FileStorage::new(&cli.storage)));
    let history = Arc::new(History::new(RouteTable::standard(), session.clone()));
    let navigator: Arc<dyn Navigate> = history.clone();
    let client = ApiClient::new(config, session.clone(), navigator)?;

    match cli.command {
        Command::Login { username, password } => {
            let creds = client.login(&username, &password).await?;
            print_json(&serde_json::to_value(&creds)?)?;
            println!("home: {}", history.navigate("/login"));
        }
        Command::Logout => {
            println!("{}", client.logout());
        }
        Command::Whoami { remote } => {
            if remote {
                let user: Value = client.fetch("/me", &[]).await?;
                print_json(&user)?;
            } else {
                print_json(&serde_json::to_value(session.credentials())?)?;
            }
        }
        Command::Get { path, params } => {
            let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let body: Value = client.fetch(&path, &params).await?;
            print_json(&body)?;
        }
        Command::Post { path, data } => {
            let payload = serde_json::from_str::<Value>(&data)?;
            let body: Value = client.create(&path, &payload).await?;
            print_json(&body)?;
        }
        Command::Put { path, data } => {
            let payload = serde_json::from_str::<Value>(&data)?;
            let body: Value = client.replace(&path, &payload).await?;
            print_json(&body)?;
        }
        Command::Delete { path } => {
            let body: Value = client.remove(&path).await?;
            print_json(&body)?;
        }
        Command::Navigate { target } => {
            let reached = history.navigate(&target);
            println!("{reached} ({})", history.current_page());
        }
        Command::Routes => print_routes(history.table()),
    }
    Ok(())
}

fn apply_overrides(mut config: ClientConfig, cli: &Cli) -> Result<ClientConfig, ConfigError> {
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(api_prefix) = &cli.api_prefix {
        config = config.with_api_prefix(api_prefix);
    }
    let timeouts = Timeouts {
        request_secs: cli.request_timeout_secs.unwrap_or(config.timeouts.request_secs),
        connect_secs: cli.connect_timeout_secs.unwrap_or(config.timeouts.connect_secs),
    };
    Ok(config.with_timeouts(timeouts))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("invalid param '{raw}': expected key=value"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn print_routes(table: &RouteTable) {
    for route in table.routes() {
        let access = match &route.access {
            Access::Public { guest_only: true } => "public, guest-only".to_owned(),
            Access::Public { guest_only: false } => "public".to_owned(),
            Access::Protected { roles, .. } if roles.is_empty() => "auth".to_owned(),
            Access::Protected { roles, .. } => {
                let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
                format!("auth, {}", names.join("|"))
            }
        };
        let alias = route.alias.unwrap_or("-");
        println!("{:<18} {:<18} {:<16} {access}", route.path, alias, route.page.to_string());
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
