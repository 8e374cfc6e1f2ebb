// Firewalld D-Bus - Command Line Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! `firewalld-zones`: inspect and edit firewalld's permanent zones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use firewalld_dbus::{Bus, Client, Options, ZoneSettings};

#[derive(Parser)]
#[command(name = "firewalld-zones", version, about = "Manage firewalld permanent zones over D-Bus")]
struct Cli {
    /// Talk to a firewalld instance on the session bus instead of the system bus
    #[arg(long, env = "FIREWALLD_SESSION_BUS")]
    session: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the firewalld version
    Version,
    /// Reload the firewall from its permanent configuration
    Reload,
    /// List zone names
    Zones,
    /// List service names
    Services,
    /// List zone object paths
    Paths,
    /// Print a zone's permanent settings as JSON
    Show { zone: String },
    /// Add a zone
    Add {
        zone: String,
        /// JSON file with the zone settings; missing fields are empty
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Target policy, overriding the one from --settings
        #[arg(long)]
        target: Option<String>,
    },
    /// Remove a zone
    Remove { zone: String },
    /// Add a "test" zone and remove it again, printing the zones in between
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let options = Options {
        bus: if cli.session { Bus::Session } else { Bus::System },
    };

    let client = Client::open_with(&options).context("Failed to connect to firewalld")?;
    let result = run(&client, cli.command);
    client.close().context("Failed to close the D-Bus connection")?;
    result
}

fn run(client: &Client, command: Command) -> Result<()> {
    let config = client.config();

    match command {
        Command::Version => println!("{}", client.version()?),
        Command::Reload => {
            client.reload()?;
            println!("Reloaded");
        }
        Command::Zones => {
            for zone in config.get_zone_names()? {
                println!("{zone}");
            }
        }
        Command::Services => {
            for service in config.get_service_names()? {
                println!("{service}");
            }
        }
        Command::Paths => {
            for path in config.list_zones()? {
                println!("{}", path.as_str());
            }
        }
        Command::Show { zone } => {
            let settings = config
                .get_zone_settings(&zone)
                .with_context(|| format!("Failed to read zone '{zone}'"))?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Add {
            zone,
            settings,
            target,
        } => {
            let mut zone_settings = match settings {
                Some(path) => load_settings(&path)?,
                None => ZoneSettings::with_target("default"),
            };
            if let Some(target) = target {
                zone_settings.target = target;
            }
            config
                .add_zone(&zone, &zone_settings)
                .with_context(|| format!("Failed to add zone '{zone}'"))?;
            println!("Added zone '{zone}'");
        }
        Command::Remove { zone } => {
            config
                .remove_zone(&zone)
                .with_context(|| format!("Failed to remove zone '{zone}'"))?;
            println!("Removed zone '{zone}'");
        }
        Command::Demo => {
            println!("Initial zones: {:?}", config.get_zone_names()?);
            config.add_zone("test", &ZoneSettings::with_target("default"))?;
            println!("Added zone 'test'");
            println!("Updated zones: {:?}", config.get_zone_names()?);
            config.remove_zone("test")?;
            println!("Removed zone 'test'");
        }
    }

    Ok(())
}

fn load_settings(path: &Path) -> Result<ZoneSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
