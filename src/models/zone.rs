// Firewalld D-Bus - Zone Settings Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Permanent configuration of a firewall zone.

use serde::{Deserialize, Serialize};

use super::{ForwardPort, Port};

/// Permanent settings of one zone, as exchanged with
/// `org.fedoraproject.FirewallD1.config.zone.getSettings` and `config.addZone`.
///
/// The wire tuple carries two more booleans that have no meaning here;
/// the codec writes them as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    pub version: String,
    pub name: String,
    pub description: String,
    /// Default policy: `default`, `ACCEPT`, `DROP` or `%%REJECT%%`.
    pub target: String,
    pub services: Vec<String>,
    pub ports: Vec<Port>,
    pub icmp_blocks: Vec<String>,
    pub masquerade: bool,
    pub forward_ports: Vec<ForwardPort>,
    pub interfaces: Vec<String>,
    pub source_addresses: Vec<String>,
    pub rich_rules: Vec<String>,
    pub protocols: Vec<String>,
    pub source_ports: Vec<Port>,
}

impl ZoneSettings {
    /// Create empty settings with the given target.
    pub fn with_target(target: &str) -> Self {
        Self {
            target: target.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults_missing_fields() {
        let settings: ZoneSettings = serde_json::from_str(
            r#"{"target": "ACCEPT", "ports": [{"port": "8080", "protocol": "tcp"}]}"#,
        )
        .unwrap();

        assert_eq!(settings.target, "ACCEPT");
        assert_eq!(settings.ports, vec![Port::new("8080", "tcp")]);
        assert!(settings.services.is_empty());
        assert!(!settings.masquerade);
    }
}
