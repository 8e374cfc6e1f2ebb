// Firewalld D-Bus - Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Value types for firewalld configuration.

mod port;
mod zone;

pub use port::{ForwardPort, Port};
pub use zone::ZoneSettings;
