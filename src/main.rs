use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::Result;
use permbridge::catalog::{parse_entity_order_params, QueryParams};
use permbridge::discovery::HostDiscovery;
use permbridge::errors::BridgeError;
use permbridge::permissions::{ConditionsToApply, PermissionCriteria, PermissionIntegrationClient};
use permbridge::settings::Settings;
use permbridge::web;
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "permbridge",
    version,
    about = "Permission condition relay and catalog order parsing"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP relay (default)
    Serve,
    /// Send conditions to a plugin and print its decision
    ApplyConditions {
        #[arg(long)]
        plugin_id: String,
        #[arg(long)]
        resource_ref: String,
        #[arg(long)]
        resource_type: String,
        /// JSON criteria file, or `-` for stdin
        #[arg(long)]
        conditions: PathBuf,
        /// Value for the authorization header, e.g. "Bearer <token>"
        #[arg(long)]
        token: Option<String>,
    },
    /// Parse order items and print the resulting directives
    ParseOrder {
        /// Items such as `+metadata.name` or `-kind`
        #[arg(allow_hyphen_values = true)]
        items: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // load settings
    let settings = Settings::load(&cli.config)?;
    tracing::debug!(?settings, "Loaded configuration");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => web::serve(settings).await?,
        Command::ApplyConditions {
            plugin_id,
            resource_ref,
            resource_type,
            conditions,
            token,
        } => {
            let conditions = ConditionsToApply {
                plugin_id,
                resource_type,
                conditions: read_criteria(&conditions)?,
            };
            let client =
                PermissionIntegrationClient::new(Arc::new(HostDiscovery::from_settings(&settings)));
            let decision = client
                .apply_conditions(&resource_ref, &conditions, token.as_deref())
                .await
                .map_err(BridgeError::from)?;
            println!("{}", serde_json::to_string(&decision).map_err(BridgeError::from)?);
        }
        Command::ParseOrder { items } => {
            let mut params = QueryParams::new();
            if !items.is_empty() {
                params.insert(
                    "order",
                    Value::Array(items.into_iter().map(Value::String).collect()),
                );
            }
            let orders = parse_entity_order_params(&params).map_err(BridgeError::from)?;
            println!("{}", serde_json::to_string(&orders).map_err(BridgeError::from)?);
        }
    }
    Ok(())
}

fn read_criteria(path: &Path) -> Result<PermissionCriteria, BridgeError> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    let criteria = serde_json::from_str(&raw)?;
    Ok(criteria)
}
