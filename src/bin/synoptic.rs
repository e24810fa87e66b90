//! Synoptic CLI — platform snapshot aggregation against a REST backend.
//!
//! Usage:
//!   synoptic once [--base-url URL] [--config path]
//!   synoptic watch [--base-url URL] [--config path]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use synoptic::{
    Config, EntityCategory, PlatformSources, RestAgentsSource, RestAssistantsSource, RestClient,
    RestDirectory, RestUsersSource, Snapshot, SynopticApi,
};

#[derive(Parser)]
#[command(
    name = "synoptic",
    version,
    about = "Resilient platform-snapshot aggregation engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one aggregation cycle, print the snapshot, and exit
    Once {
        /// Backend base URL
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,
        /// Path to a JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Keep aggregating on the refresh interval, printing each publication
    Watch {
        /// Backend base URL
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,
        /// Path to a JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<Config, String> {
    match path {
        Some(path) => Config::from_json_file(&path)
            .map_err(|e| format!("cannot load config '{}': {}", path.display(), e)),
        None => Ok(Config::default()),
    }
}

fn build_api(base_url: &str, config: Config) -> SynopticApi {
    let client = RestClient::new(base_url);
    SynopticApi::new(
        PlatformSources {
            users: Arc::new(RestUsersSource::new(client.clone())),
            agents: Arc::new(RestAgentsSource::new(client.clone())),
            assistants: Arc::new(RestAssistantsSource::new(client.clone())),
        },
        Arc::new(RestDirectory::new(client.clone(), "users")),
        vec![
            Arc::new(RestDirectory::new(client.clone(), "profiles")),
            Arc::new(RestDirectory::new(client, "userprofiles")),
        ],
        config,
    )
}

fn print_snapshot(snapshot: &Snapshot) {
    println!(
        "generation {} at {} ({})",
        snapshot.generation,
        snapshot.generated_at.to_rfc3339(),
        if snapshot.enriched {
            "enriched"
        } else {
            "pre-enrichment"
        }
    );
    println!("{:<12}  {:>7}  {:<9}", "CATEGORY", "RECORDS", "ORIGIN");
    println!("{}", "-".repeat(32));
    for category in EntityCategory::ALL {
        println!(
            "{:<12}  {:>7}  {:<9?}",
            category.label(),
            snapshot.record_count(category),
            snapshot.origin_of(category)
        );
    }
}

async fn cmd_once(base_url: &str, config: Config) -> i32 {
    let api = build_api(base_url, config);
    api.run_once().await;

    let state = api.load_state();
    if let Some(advisory) = &state.last_error {
        eprintln!("warning: {}", advisory);
    }
    match state.snapshot {
        Some(snapshot) => {
            print_snapshot(&snapshot);
            0
        }
        None => {
            eprintln!("error: no snapshot published");
            1
        }
    }
}

async fn cmd_watch(base_url: &str, config: Config) -> i32 {
    let api = build_api(base_url, config);
    let mut state_rx = api.subscribe();
    api.start();

    loop {
        if state_rx.changed().await.is_err() {
            return 0;
        }
        let state = state_rx.borrow_and_update().clone();
        if state.is_loading {
            continue;
        }
        if let Some(advisory) = &state.last_error {
            eprintln!("warning: {}", advisory);
        }
        if let Some(snapshot) = &state.snapshot {
            print_snapshot(snapshot);
            println!();
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("synoptic=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Once { base_url, config } => match load_config(config) {
            Ok(config) => cmd_once(&base_url, config).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Watch { base_url, config } => match load_config(config) {
            Ok(config) => cmd_watch(&base_url, config).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
