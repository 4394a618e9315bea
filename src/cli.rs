//! idoit - CLI for the i-doit JSON-RPC API
//!
//! # Usage
//!
//! ```bash
//! # Connection settings come from flags or IDOIT_* environment variables
//! export IDOIT_URL=https://cmdb.example.com/src/jsonrpc.php
//! export IDOIT_KEY=c1ia5q
//!
//! # Run a console command
//! idoit execute console.search.query --param searchString=SERVER-01
//!
//! # Maintain and query the search index
//! idoit search create-index
//! idoit search query "SERVER-01"
//!
//! # Show client and server metadata
//! idoit info
//! ```
//!
//! Results go to stdout, errors to stderr. With `--json` both are JSON
//! objects carrying an `ok` flag. Exit codes: 0 = success, 1 = error.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use idoit_client::config::{
    ENV_BYPASS_SECURE_CONNECTION, ENV_KEY, ENV_LANGUAGE, ENV_PASSWORD, ENV_PORT,
    ENV_TIMEOUT_SECS, ENV_URL, ENV_USERNAME,
};
use idoit_client::{
    BLACKLIST, ClientConfig, ConfigSummary, Console, Error, HttpTransport, Idoit, Search,
    ServerVersion, console, object_types,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Parser)]
#[command(name = "idoit")]
#[command(version)]
#[command(about = "Command line client for the i-doit CMDB JSON-RPC API")]
#[command(long_about = r#"
idoit talks to the JSON-RPC API of an i-doit CMDB.

It provides:
  - Console command execution (installation-wide commands are blocked)
  - Search index maintenance and free-text search
  - Client and server diagnostics

Connection flags override the environment: IDOIT_URL, IDOIT_KEY,
IDOIT_USERNAME, IDOIT_PASSWORD, IDOIT_LANGUAGE, IDOIT_PORT,
IDOIT_TIMEOUT_SECS and IDOIT_BYPASS_SECURE_CONNECTION.

Designed for automation: use --json for machine-readable output.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Args)]
struct ConnectionArgs {
    /// URL of the JSON-RPC endpoint [env: IDOIT_URL]
    #[arg(long, global = true)]
    url: Option<String>,

    /// API key [env: IDOIT_KEY]
    #[arg(long, global = true)]
    key: Option<String>,

    /// Username for session login [env: IDOIT_USERNAME]
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password for session login [env: IDOIT_PASSWORD]
    #[arg(long, global = true)]
    password: Option<String>,

    /// Language of translated output: en, de [env: IDOIT_LANGUAGE]
    #[arg(long, global = true)]
    language: Option<String>,

    /// Override the port given in the URL [env: IDOIT_PORT]
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Request timeout in seconds [env: IDOIT_TIMEOUT_SECS]
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Skip TLS certificate verification [env: IDOIT_BYPASS_SECURE_CONNECTION]
    #[arg(long, global = true)]
    insecure: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a console command
    Execute {
        /// Command name, e.g. console.search.query
        command: String,

        /// Parameter as key=value; values are parsed as JSON when possible
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Parameters as a JSON object, merged before --param values
        #[arg(long = "params", value_name = "JSON")]
        params_json: Option<String>,
    },

    /// Maintain or query the search index
    Search {
        #[command(subcommand)]
        action: SearchAction,
    },

    /// Show client configuration and server version
    Info,

    /// List commands this client refuses to execute
    Blacklist,

    /// List built-in object type identifiers
    ObjectTypes,
}

#[derive(Subcommand)]
enum SearchAction {
    /// Rebuild the whole search index
    CreateIndex,
    /// Index changes since the last run
    UpdateIndex,
    /// Run a free-text query
    Query {
        /// Search text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only to stderr to keep stdout clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match run_command(&cli).await {
        Ok(output) => {
            if cli.json {
                let mut value = serde_json::to_value(&output)?;
                if let Value::Object(map) = &mut value {
                    map.insert("ok".to_string(), Value::Bool(true));
                }
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_human_readable(&output);
            }
            Ok(())
        }
        Err(e) => {
            let code = e
                .downcast_ref::<Error>()
                .map(Error::code)
                .unwrap_or("execution_failed");
            if cli.json {
                let err = serde_json::json!({
                    "ok": false,
                    "error": {
                        "code": code,
                        "message": format!("{:#}", e),
                    }
                });
                eprintln!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(1);
        }
    }
}

async fn run_command(cli: &Cli) -> Result<Output> {
    match &cli.command {
        Commands::Blacklist => Ok(Output::Blacklist {
            commands: BLACKLIST.iter().map(|s| s.to_string()).collect(),
        }),

        Commands::ObjectTypes => Ok(Output::ObjectTypes {
            identifiers: object_types::ALL.iter().map(|s| s.to_string()).collect(),
        }),

        Commands::Execute {
            command,
            params,
            params_json,
        } => {
            // Policy is checked before login so rejected commands never touch the server.
            let command = console::check(command)?;
            let params = build_params(params_json.as_deref(), params)?;
            let transport = connect(&cli.connection).await?;
            let result = Console::new(&transport)
                .execute(command, params)
                .await
                .with_context(|| format!("Failed to execute {}", command));
            disconnect(&transport).await;
            let envelope = result?;

            Ok(Output::Execute {
                command: command.to_string(),
                output: envelope.lines().map(str::to_string).collect(),
            })
        }

        Commands::Search { action } => {
            let transport = connect(&cli.connection).await?;
            let search = Search::new(&transport);
            let (operation, query, result) = match action {
                SearchAction::CreateIndex => ("create-index", None, search.create_index().await),
                SearchAction::UpdateIndex => ("update-index", None, search.update_index().await),
                SearchAction::Query { text } => {
                    ("query", Some(text.clone()), search.query(text).await)
                }
            };
            disconnect(&transport).await;
            let envelope = result.with_context(|| format!("Search {} failed", operation))?;

            Ok(Output::Search {
                operation: operation.to_string(),
                query,
                output: envelope.lines().map(str::to_string).collect(),
            })
        }

        Commands::Info => {
            let config = build_config(&cli.connection)?;
            let transport = HttpTransport::new(&config)?;

            // Diagnostics must not fail because the server is unreachable.
            let server = match fetch_version(&transport).await {
                Ok(version) => Ok(version),
                Err(e) => {
                    tracing::warn!("Could not fetch server metadata: {}", e);
                    Err(e.to_string())
                }
            };
            disconnect(&transport).await;

            let (server, server_error) = match server {
                Ok(version) => (Some(version), None),
                Err(message) => (None, Some(message)),
            };

            Ok(Output::Info {
                client: ClientInfo {
                    name: idoit_client::CLIENT_NAME.to_string(),
                    version: idoit_client::CLIENT_VERSION.to_string(),
                },
                config: config.summary(),
                server,
                server_error,
            })
        }
    }
}

/// Resolve the connection settings: flags first, then IDOIT_* variables.
fn build_config(args: &ConnectionArgs) -> Result<ClientConfig> {
    let flags = [
        (ENV_URL, args.url.clone()),
        (ENV_KEY, args.key.clone()),
        (ENV_USERNAME, args.username.clone()),
        (ENV_PASSWORD, args.password.clone()),
        (ENV_LANGUAGE, args.language.clone()),
        (ENV_PORT, args.port.map(|p| p.to_string())),
        (ENV_TIMEOUT_SECS, args.timeout.map(|t| t.to_string())),
        (ENV_BYPASS_SECURE_CONNECTION, args.insecure.then(|| "true".to_string())),
    ];
    let overrides: HashMap<&str, String> = flags
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect();

    let config = ClientConfig::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })?;
    Ok(config)
}

async fn connect(args: &ConnectionArgs) -> Result<HttpTransport> {
    let config = build_config(args)?;
    let transport = HttpTransport::new(&config)?;
    transport.login().await.context("Login failed")?;
    Ok(transport)
}

async fn disconnect(transport: &HttpTransport) {
    if let Err(e) = transport.logout().await {
        tracing::warn!("Logout failed: {}", e);
    }
}

async fn fetch_version(transport: &HttpTransport) -> idoit_client::Result<ServerVersion> {
    transport.login().await?;
    Idoit::new(transport).version().await
}

/// Merge `--params` JSON and `--param key=value` pairs into one mapping.
fn build_params(json: Option<&str>, pairs: &[String]) -> Result<Map<String, Value>> {
    let mut params = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw)
            .context("--params is not valid JSON")?
        {
            Value::Object(map) => map,
            _ => bail!("--params must be a JSON object"),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Parameter '{}' must have the form key=value", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Parameter '{}' has an empty key", pair);
        }
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        params.insert(key.to_string(), value);
    }

    Ok(params)
}

#[derive(serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Output {
    Execute {
        command: String,
        output: Vec<String>,
    },
    Search {
        operation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        query: Option<String>,
        output: Vec<String>,
    },
    Info {
        client: ClientInfo,
        config: ConfigSummary,
        server: Option<ServerVersion>,
        #[serde(skip_serializing_if = "Option::is_none")]
        server_error: Option<String>,
    },
    Blacklist {
        commands: Vec<String>,
    },
    ObjectTypes {
        identifiers: Vec<String>,
    },
}

#[derive(serde::Serialize)]
struct ClientInfo {
    name: String,
    version: String,
}

fn print_human_readable(output: &Output) {
    match output {
        Output::Execute { command, output } => {
            println!("Executed {}", command);
            for line in output {
                println!("  {}", line);
            }
        }
        Output::Search {
            operation,
            query,
            output,
        } => {
            match query {
                Some(query) => println!("Search {}: \"{}\"", operation, query),
                None => println!("Search {}", operation),
            }
            for line in output {
                println!("  {}", line);
            }
        }
        Output::Info {
            client,
            config,
            server,
            server_error,
        } => {
            println!("Client: {} {}", client.name, client.version);
            println!("URL: {}", config.url);
            println!("API key: {}", config.api_key);
            if let Some(username) = &config.username {
                println!("Username: {}", username);
            }
            if let Some(language) = &config.language {
                println!("Language: {}", language);
            }
            println!("Bypass secure connection: {}", config.bypass_secure_connection);
            match server {
                Some(version) => {
                    println!(
                        "Server: i-doit {} {}",
                        version.edition.as_deref().unwrap_or(""),
                        version.version
                    );
                    if let Some(login) = &version.login {
                        if let Some(tenant) = &login.tenant {
                            println!("Tenant: {}", tenant);
                        }
                        if let Some(username) = &login.username {
                            println!("Logged in as: {}", username);
                        }
                    }
                }
                None => {
                    println!(
                        "Server: unavailable ({})",
                        server_error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }
        Output::Blacklist { commands } => {
            println!("{} blocked commands:", commands.len());
            for command in commands {
                println!("  {}", command);
            }
        }
        Output::ObjectTypes { identifiers } => {
            for id in identifiers {
                println!("{}", id);
            }
        }
    }
}
