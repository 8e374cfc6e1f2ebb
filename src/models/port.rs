// Firewalld D-Bus - Port Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Port and forward-port rules as stored in a zone.

use serde::{Deserialize, Serialize};

/// An allowed port or port range.
///
/// The port is kept as firewalld reports it, e.g. `"22"` or `"1025-65535"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    pub port: String,
    pub protocol: String,
}

impl Port {
    /// Create a new port.
    pub fn new(port: &str, protocol: &str) -> Self {
        Self {
            port: port.to_string(),
            protocol: protocol.to_string(),
        }
    }

    /// Get the `port/protocol` display string.
    pub fn display_string(&self) -> String {
        format!("{}/{}", self.port, self.protocol)
    }
}

/// A port forwarding rule.
///
/// An empty `to_port` keeps the original port; an empty `to_address`
/// forwards locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardPort {
    pub port: String,
    pub protocol: String,
    pub to_port: String,
    pub to_address: String,
}

impl ForwardPort {
    /// Create a new forwarding rule.
    pub fn new(port: &str, protocol: &str, to_port: &str, to_address: &str) -> Self {
        Self {
            port: port.to_string(),
            protocol: protocol.to_string(),
            to_port: to_port.to_string(),
            to_address: to_address.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_keeps_ranges() {
        assert_eq!(Port::new("1025-65535", "udp").display_string(), "1025-65535/udp");
    }

    #[test]
    fn test_partial_json() {
        let fwd: ForwardPort = serde_json::from_str(r#"{"port": "22", "protocol": "tcp"}"#).unwrap();
        assert_eq!(fwd, ForwardPort::new("22", "tcp", "", ""));
    }
}
