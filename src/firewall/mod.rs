// Firewalld D-Bus - Firewall Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Firewalld D-Bus clients and their well-known names.

mod client;
mod config;

pub use client::{Bus, Client, Options};
pub use config::ConfigClient;

/// D-Bus bus name for firewalld.
pub const BUS_NAME: &str = "org.fedoraproject.FirewallD1";

/// D-Bus object paths.
pub mod paths {
    pub const ROOT: &str = "/org/fedoraproject/FirewallD1";
    pub const CONFIG: &str = "/org/fedoraproject/FirewallD1/config";
}

/// D-Bus interface names.
pub mod interfaces {
    /// Main firewalld interface (version property, reload).
    pub const MAIN: &str = "org.fedoraproject.FirewallD1";
    /// Permanent configuration (zone and service enumeration, addZone).
    pub const CONFIG: &str = "org.fedoraproject.FirewallD1.config";
    /// Per-zone permanent configuration objects.
    pub const CONFIG_ZONE: &str = "org.fedoraproject.FirewallD1.config.zone";
    pub const PROPERTIES: &str = "org.freedesktop.DBus.Properties";
}
