// Firewalld D-Bus - Library Root
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Typed client for the firewalld D-Bus API.
//!
//! ```text
//! Client / ConfigClient → transport (Connection, Invoker) → zbus → firewalld
//!                       ← codec (zone settings tuple)     ←
//! ```
//!
//! Every operation is one blocking call (two for zone operations addressed
//! by name). Nothing is cached; firewalld is the only source of truth.

pub mod codec;
pub mod error;
pub mod firewall;
pub mod models;
pub mod transport;

pub use error::{Error, Result};
pub use firewall::{Bus, Client, ConfigClient, Options};
pub use models::{ForwardPort, Port, ZoneSettings};
