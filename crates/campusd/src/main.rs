//! campusd - Campus Services Daemon
//!
//! Runs the university and course resource services plus the API gateway
//! in one process, each on its own port.
//!
//! Usage:
//!   campusd [OPTIONS] [config.toml]
//!
//! If no config file is provided, all three servers start with defaults:
//! university on 8081, courses on 8082, gateway on 9999.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use campus_core::models::{Course, University};
use campus_gateway::{gateway_router, GatewayConfig, GatewayState, StaticResolver};
use campus_service::{CourseService, UniversityService};
use campus_store::MemoryStore;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parsed command-line arguments
struct Args {
    /// Daemon config file (TOML)
    config_path: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args { config_path: None };

    for arg in &args {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            a if !a.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(a.to_string());
            }
            _ => {
                tracing::warn!("Unknown argument: {}", arg);
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"campusd - Campus Services Daemon

Usage: campusd [OPTIONS] [config.toml]

Options:
  -h, --help    Print this help message

Examples:
  # Run everything with defaults (8081, 8082, 9999)
  campusd

  # Run with config file
  campusd campusd.toml
"#
    );
}

/// One resource service section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceConfig {
    #[serde(default = "default_true")]
    enabled: bool,
    port: u16,
}

/// Gateway section: the gateway settings plus an enable switch
#[derive(Debug, Clone, Deserialize)]
struct DaemonGatewayConfig {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(flatten)]
    settings: GatewayConfig,
}

impl Default for DaemonGatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: GatewayConfig::default(),
        }
    }
}

/// Endpoint map for the gateway's static resolver
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResolverConfig {
    #[serde(default = "default_endpoints")]
    endpoints: HashMap<String, Vec<String>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct Config {
    #[serde(default = "default_university")]
    university: ServiceConfig,
    #[serde(default = "default_courses")]
    courses: ServiceConfig,
    #[serde(default)]
    gateway: DaemonGatewayConfig,
    #[serde(default)]
    resolver: ResolverConfig,
}

fn default_true() -> bool {
    true
}

fn default_university() -> ServiceConfig {
    ServiceConfig {
        enabled: true,
        port: 8081,
    }
}

fn default_courses() -> ServiceConfig {
    ServiceConfig {
        enabled: true,
        port: 8082,
    }
}

/// Default endpoints point at the in-process services on their default ports
fn default_endpoints() -> HashMap<String, Vec<String>> {
    let mut endpoints = HashMap::new();
    endpoints.insert(
        "university-management".to_string(),
        vec!["127.0.0.1:8081".to_string()],
    );
    endpoints.insert(
        "course-management".to_string(),
        vec!["127.0.0.1:8082".to_string()],
    );
    endpoints
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campusd=info,campus_api=info,campus_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting campusd (Campus Services Daemon)");

    let args = parse_args();
    let config = load_config(args.config_path.as_deref())?;

    let mut servers = Vec::new();

    if config.university.enabled {
        let repo = Arc::new(MemoryStore::<University>::new());
        let service = Arc::new(UniversityService::new(repo));
        let app = campus_api::university_router(service);
        servers.push(tokio::spawn(serve(
            "university-management",
            config.university.port,
            app,
        )));
    }

    if config.courses.enabled {
        let repo = Arc::new(MemoryStore::<Course>::new());
        let service = Arc::new(CourseService::new(repo));
        let app = campus_api::courses_router(service);
        servers.push(tokio::spawn(serve(
            "course-management",
            config.courses.port,
            app,
        )));
    }

    if config.gateway.enabled {
        let settings = &config.gateway.settings;
        let table = settings.route_table()?;
        let resolver = Arc::new(StaticResolver::new(config.resolver.endpoints.clone()));
        let state = GatewayState::new(table, resolver, settings.timeout())?;
        let cors = settings.cors.layer()?;
        let app = gateway_router(state, cors);
        servers.push(tokio::spawn(serve("gateway", settings.port, app)));
    }

    if servers.is_empty() {
        anyhow::bail!("nothing to run: all sections disabled in config");
    }

    for server in servers {
        server.await??;
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            tracing::info!("Loading config from: {}", path);
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => {
            tracing::info!("No config file provided, using defaults");
            toml::from_str("")?
        }
    };
    Ok(config)
}

async fn serve(name: &'static str, port: u16, app: axum::Router) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("{} listening on http://{}", name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
