// Firewalld D-Bus - Configuration Client
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Permanent configuration on `/org/fedoraproject/FirewallD1/config`.

use std::sync::Arc;

use tracing::{debug, info};
use zbus::zvariant::OwnedObjectPath;

use super::{paths, BUS_NAME};
use crate::codec;
use crate::error::Result;
use crate::models::ZoneSettings;
use crate::transport::{invoke, Connection, Invoker, Method};

/// Client for `org.fedoraproject.FirewallD1.config`.
///
/// Zone operations taking a name resolve it with `getZoneByName` first and
/// then call the zone's own object. The two calls are not atomic: if the
/// zone changes in between, the second call reports whatever the daemon
/// says about the path.
pub struct ConfigClient {
    connection: Arc<dyn Connection>,
    config: Arc<dyn Invoker>,
}

impl ConfigClient {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        let config = connection.object(BUS_NAME, paths::CONFIG);
        Self { connection, config }
    }

    /// Zone names in the permanent configuration.
    pub fn get_zone_names(&self) -> Result<Vec<String>> {
        invoke(self.config.as_ref(), &Method::GetZoneNames)?.strings(0)
    }

    /// Service names in the permanent configuration.
    pub fn get_service_names(&self) -> Result<Vec<String>> {
        invoke(self.config.as_ref(), &Method::GetServiceNames)?.strings(0)
    }

    /// Object paths of all zones in the permanent configuration.
    pub fn list_zones(&self) -> Result<Vec<OwnedObjectPath>> {
        invoke(self.config.as_ref(), &Method::ListZones)?.paths(0)
    }

    /// Object path of the zone called `name`.
    pub fn get_zone_by_name(&self, name: &str) -> Result<OwnedObjectPath> {
        invoke(
            self.config.as_ref(),
            &Method::GetZoneByName(name.to_string()),
        )?
        .path(0)
    }

    /// Object path of the service called `name`.
    pub fn get_service_by_name(&self, name: &str) -> Result<OwnedObjectPath> {
        invoke(
            self.config.as_ref(),
            &Method::GetServiceByName(name.to_string()),
        )?
        .path(0)
    }

    /// Add a zone to the permanent configuration.
    pub fn add_zone(&self, name: &str, settings: &ZoneSettings) -> Result<()> {
        let method = Method::AddZone {
            name: name.to_string(),
            settings: codec::encode(settings),
        };
        invoke(self.config.as_ref(), &method)?;
        info!("Added zone {}", name);
        Ok(())
    }

    /// Remove the zone called `name` from the permanent configuration.
    pub fn remove_zone(&self, name: &str) -> Result<()> {
        let path = self.get_zone_by_name(name)?;
        self.remove_zone_at(&path)?;
        info!("Removed zone {}", name);
        Ok(())
    }

    /// Remove the zone at `path`.
    pub fn remove_zone_at(&self, path: &OwnedObjectPath) -> Result<()> {
        debug!("Removing zone at {}", path.as_str());
        let zone = self.connection.object(BUS_NAME, path.as_str());
        invoke(zone.as_ref(), &Method::RemoveZone)?;
        Ok(())
    }

    /// Permanent settings of the zone called `name`.
    pub fn get_zone_settings(&self, name: &str) -> Result<ZoneSettings> {
        let path = self.get_zone_by_name(name)?;
        self.zone_settings_at(&path)
    }

    /// Permanent settings of the zone at `path`.
    pub fn zone_settings_at(&self, path: &OwnedObjectPath) -> Result<ZoneSettings> {
        let zone = self.connection.object(BUS_NAME, path.as_str());
        let reply = invoke(zone.as_ref(), &Method::GetZoneSettings)?;
        codec::decode(reply.value(0)?)
    }
}
