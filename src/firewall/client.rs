// Firewalld D-Bus - Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Daemon-wide operations on `/org/fedoraproject/FirewallD1`.

use std::sync::Arc;

use tracing::info;

use super::{interfaces, paths, ConfigClient, BUS_NAME};
use crate::error::Result;
use crate::transport::{invoke, BusConnection, Connection, Invoker, Method};

/// Which message bus to connect to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bus {
    #[default]
    System,
    Session,
}

/// Connection options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub bus: Bus,
}

/// Client for the firewalld daemon.
pub struct Client {
    connection: Arc<dyn Connection>,
    main: Arc<dyn Invoker>,
    config: ConfigClient,
}

impl Client {
    /// Connect to firewalld on the system bus.
    pub fn open() -> Result<Self> {
        Self::open_with(&Options::default())
    }

    /// Connect to firewalld on the bus selected by `options`.
    pub fn open_with(options: &Options) -> Result<Self> {
        let connection = match options.bus {
            Bus::System => BusConnection::system()?,
            Bus::Session => BusConnection::session()?,
        };
        info!("Connected to {:?} bus", options.bus);
        Ok(Self::with_connection(Arc::new(connection)))
    }

    /// Build a client on an existing connection.
    pub fn with_connection(connection: Arc<dyn Connection>) -> Self {
        let main = connection.object(BUS_NAME, paths::ROOT);
        let config = ConfigClient::new(connection.clone());
        Self {
            connection,
            main,
            config,
        }
    }

    /// Get the firewalld version.
    pub fn version(&self) -> Result<String> {
        let method = Method::GetProperty {
            interface: interfaces::MAIN,
            property: "version",
        };
        invoke(self.main.as_ref(), &method)?.string(0)
    }

    /// Reload firewalld configuration.
    pub fn reload(&self) -> Result<()> {
        invoke(self.main.as_ref(), &Method::Reload)?;
        info!("Firewalld configuration reloaded");
        Ok(())
    }

    /// The permanent configuration client sharing this connection.
    pub fn config(&self) -> &ConfigClient {
        &self.config
    }

    /// Release the bus connection.
    pub fn close(self) -> Result<()> {
        self.connection.close()
    }
}
