// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Humanitec CLI - Command-line interface for the Humanitec platform API
//!
//! # Environment Variables
//!
//! - `HUMANITEC_TOKEN` - API token
//! - `HUMANITEC_URL` - API base URL (defaults to the public API)
//! - `HUMANITEC_ORG` - Organization used by application commands
//! - `RUST_LOG` - Log filter; overrides the default of `info`, or `debug`
//!   when `--log-bodies` is given

use anyhow::Result;
use clap::{Parser, Subcommand};
use humanitec_client::types::ApplicationCreationRequest;
use humanitec_client::{Client, Config, DEFAULT_API_HOST};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reported as the `app` segment of the Humanitec-User-Agent header
const APP_NAME: &str = concat!("humanitec-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "humanitec", version, about = "CLI for the Humanitec platform API")]
struct Cli {
    /// API token
    #[arg(long, env = "HUMANITEC_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, env = "HUMANITEC_URL", default_value = DEFAULT_API_HOST)]
    url: String,

    /// Organization id, required by application commands
    #[arg(long, env = "HUMANITEC_ORG")]
    org: Option<String>,

    /// Log request and response bodies at debug level
    #[arg(long)]
    log_bodies: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the user that owns the token
    Whoami {
        #[arg(long)]
        raw: bool,
    },
    /// Change the display name of the current user
    SetName { name: String },
    /// List organizations the token has access to
    ListOrgs {
        #[arg(long)]
        raw: bool,
    },
    /// List applications in the organization
    ListApps {
        #[arg(long)]
        raw: bool,
    },
    /// Get application details
    GetApp {
        app: String,
        #[arg(long)]
        raw: bool,
    },
    /// Create an application
    CreateApp {
        id: String,
        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete an application
    DeleteApp { app: String },
    /// List environments of an application
    ListEnvs {
        app: String,
        #[arg(long)]
        raw: bool,
    },
}

fn init_tracing(log_bodies: bool) {
    let default_filter = if log_bodies {
        "info,humanitec_client=debug,humanitec_cli=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Config {
    let config = Config::new(cli.token.clone().unwrap_or_default())
        .with_url(cli.url.clone())
        .with_internal_app(APP_NAME);
    if cli.log_bodies {
        config.with_tracing_loggers()
    } else {
        config
    }
}

fn build_client(cli: &Cli) -> Result<Client> {
    match Client::new(build_config(cli)) {
        Ok(client) => Ok(client),
        Err(e @ humanitec_client::Error::MissingToken) => Err(anyhow::Error::new(e).context(
            "Token required. Set via --token flag or HUMANITEC_TOKEN environment variable",
        )),
        Err(e) => Err(anyhow::Error::new(e).context("Failed to create Humanitec client")),
    }
}

/// Resolve the organization from `--org` or `HUMANITEC_ORG`
fn resolve_org(org: Option<&str>) -> Result<&str> {
    org.filter(|o| !o.is_empty()).ok_or_else(|| {
        anyhow::anyhow!("Organization required. Set via --org flag or HUMANITEC_ORG environment variable")
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_bodies);

    let client = build_client(&cli)?;
    info!(url = %client.baseurl(), "using Humanitec API");

    match cli.command {
        Commands::Whoami { raw } => {
            let user = client.get_current_user().send().await?.into_inner();
            if raw {
                print_json(&user)?;
            } else {
                println!("ID: {}\nName: {}", user.id, user.name);
                if let Some(email) = &user.email {
                    println!("Email: {email}");
                }
            }
        }
        Commands::SetName { name } => {
            let user = client.update_current_user().name(name).send().await?;
            println!("Name changed to {}", user.name);
        }
        Commands::ListOrgs { raw } => {
            let orgs = client.list_organizations().send().await?.into_inner();
            if raw {
                print_json(&orgs)?;
            } else {
                for org in &orgs {
                    println!("{}: {}", org.id, org.name);
                }
            }
        }
        Commands::ListApps { raw } => {
            let org = resolve_org(cli.org.as_deref())?;
            let apps = client.list_applications().org_id(org).send().await?.into_inner();
            if raw {
                print_json(&apps)?;
            } else {
                for app in &apps {
                    println!("{}: {} ({} envs)", app.id, app.name, app.envs.len());
                }
            }
        }
        Commands::GetApp { app, raw } => {
            let org = resolve_org(cli.org.as_deref())?;
            let app = client
                .get_application()
                .org_id(org)
                .app_id(app)
                .send()
                .await?
                .into_inner();
            if raw {
                print_json(&app)?;
            } else {
                println!(
                    "ID: {}\nName: {}\nCreated: {} by {}",
                    app.id, app.name, app.created_at, app.created_by
                );
                for env in &app.envs {
                    println!("  env {}: {} ({})", env.id, env.name, env.env_type);
                }
            }
        }
        Commands::CreateApp { id, name } => {
            let org = resolve_org(cli.org.as_deref())?;
            let mut body = ApplicationCreationRequest::new(id);
            if let Some(name) = name {
                body.name = name;
            }
            let app = client
                .create_application()
                .org_id(org)
                .body(body)
                .send()
                .await?;
            println!("Application {} created", app.id);
        }
        Commands::DeleteApp { app } => {
            let org = resolve_org(cli.org.as_deref())?;
            client
                .delete_application()
                .org_id(org)
                .app_id(&app)
                .send()
                .await?;
            println!("Application {app} deleted");
        }
        Commands::ListEnvs { app, raw } => {
            let org = resolve_org(cli.org.as_deref())?;
            let envs = client
                .list_environments()
                .org_id(org)
                .app_id(app)
                .send()
                .await?
                .into_inner();
            if raw {
                print_json(&envs)?;
            } else {
                for env in &envs {
                    println!("{}: {} ({})", env.id, env.name, env.env_type);
                }
            }
        }
    }

    Ok(())
}
