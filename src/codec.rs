// Firewalld D-Bus - Zone Settings Codec
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Conversion between [`ZoneSettings`] and the 16-field settings tuple
//! `(sssbsasa(ss)asba(ssss)asasasasa(ss)b)` used by firewalld.
//!
//! Encoding is fully typed. Decoding works on the dynamically typed reply
//! and is lenient for list fields: a missing or misshapen list decodes to
//! an empty one, and a malformed port tuple inside a list is skipped.
//! String and boolean fields are strict and fail the decode.

use serde::{Deserialize, Serialize};
use tracing::warn;
use zbus::zvariant::{Type, Value};

use crate::error::{Error, Result};
use crate::models::{ForwardPort, Port, ZoneSettings};
use crate::transport::{peel, Method};

/// Number of fields in the settings tuple.
pub const SETTINGS_FIELDS: usize = 16;

/// The settings tuple in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ZoneSettingsWire {
    pub version: String,
    pub name: String,
    pub description: String,
    /// Always `false`; firewalld ignores it.
    pub unused: bool,
    pub target: String,
    pub services: Vec<String>,
    pub ports: Vec<(String, String)>,
    pub icmp_blocks: Vec<String>,
    pub masquerade: bool,
    /// `(port, protocol, to_port, to_address)`.
    pub forward_ports: Vec<(String, String, String, String)>,
    pub interfaces: Vec<String>,
    pub source_addresses: Vec<String>,
    pub rich_rules: Vec<String>,
    pub protocols: Vec<String>,
    pub source_ports: Vec<(String, String)>,
    /// Always `false` on encode, never read on decode.
    pub trailing_flag: bool,
}

impl From<&ZoneSettings> for ZoneSettingsWire {
    fn from(settings: &ZoneSettings) -> Self {
        Self {
            version: settings.version.clone(),
            name: settings.name.clone(),
            description: settings.description.clone(),
            unused: false,
            target: settings.target.clone(),
            services: settings.services.clone(),
            ports: encode_ports(&settings.ports),
            icmp_blocks: settings.icmp_blocks.clone(),
            masquerade: settings.masquerade,
            forward_ports: settings
                .forward_ports
                .iter()
                .map(|fwd| {
                    (
                        fwd.port.clone(),
                        fwd.protocol.clone(),
                        fwd.to_port.clone(),
                        fwd.to_address.clone(),
                    )
                })
                .collect(),
            interfaces: settings.interfaces.clone(),
            source_addresses: settings.source_addresses.clone(),
            rich_rules: settings.rich_rules.clone(),
            protocols: settings.protocols.clone(),
            source_ports: encode_ports(&settings.source_ports),
            trailing_flag: false,
        }
    }
}

impl From<ZoneSettingsWire> for Value<'static> {
    fn from(wire: ZoneSettingsWire) -> Self {
        Value::from((
            wire.version,
            wire.name,
            wire.description,
            wire.unused,
            wire.target,
            wire.services,
            wire.ports,
            wire.icmp_blocks,
            wire.masquerade,
            wire.forward_ports,
            wire.interfaces,
            wire.source_addresses,
            wire.rich_rules,
            wire.protocols,
            wire.source_ports,
            wire.trailing_flag,
        ))
    }
}

fn encode_ports(ports: &[Port]) -> Vec<(String, String)> {
    ports
        .iter()
        .map(|p| (p.port.clone(), p.protocol.clone()))
        .collect()
}

/// Encode settings for `config.addZone`.
pub fn encode(settings: &ZoneSettings) -> ZoneSettingsWire {
    ZoneSettingsWire::from(settings)
}

/// Decode a `config.zone.getSettings` reply.
pub fn decode(value: &Value<'_>) -> Result<ZoneSettings> {
    let fields = match peel(value) {
        Value::Structure(structure) => structure.fields(),
        _ => return Err(decode_error("settings are not a structure".to_string())),
    };

    if fields.len() < SETTINGS_FIELDS {
        warn!(
            "Zone settings have {} fields, expected {}",
            fields.len(),
            SETTINGS_FIELDS
        );
    }

    Ok(ZoneSettings {
        version: string_field(fields, 0)?,
        name: string_field(fields, 1)?,
        description: string_field(fields, 2)?,
        target: string_field(fields, 4)?,
        services: list_field(fields, 5),
        ports: ports_field(fields, 6),
        icmp_blocks: list_field(fields, 7),
        masquerade: bool_field(fields, 8)?,
        forward_ports: forward_ports_field(fields, 9),
        interfaces: list_field(fields, 10),
        source_addresses: list_field(fields, 11),
        rich_rules: list_field(fields, 12),
        protocols: list_field(fields, 13),
        source_ports: ports_field(fields, 14),
    })
}

fn decode_error(reason: String) -> Error {
    Error::decode(Method::GetZoneSettings.name(), reason)
}

fn string_field(fields: &[Value<'_>], index: usize) -> Result<String> {
    match fields.get(index).map(peel) {
        Some(Value::Str(s)) => Ok(s.as_str().to_string()),
        _ => Err(decode_error(format!("field {index} is not a string"))),
    }
}

fn bool_field(fields: &[Value<'_>], index: usize) -> Result<bool> {
    match fields.get(index).map(peel) {
        Some(Value::Bool(b)) => Ok(*b),
        _ => Err(decode_error(format!("field {index} is not a boolean"))),
    }
}

fn list_field(fields: &[Value<'_>], index: usize) -> Vec<String> {
    fields.get(index).map(string_list).unwrap_or_default()
}

fn ports_field(fields: &[Value<'_>], index: usize) -> Vec<Port> {
    tuples(fields.get(index))
        .into_iter()
        .filter_map(|tuple| match tuple.as_slice() {
            [port, protocol, ..] => Some(Port::new(port, protocol)),
            _ => {
                warn!("Skipping malformed port tuple {:?} in field {}", tuple, index);
                None
            }
        })
        .collect()
}

fn forward_ports_field(fields: &[Value<'_>], index: usize) -> Vec<ForwardPort> {
    tuples(fields.get(index))
        .into_iter()
        .filter_map(|tuple| match tuple.as_slice() {
            [port, protocol, to_port, to_address, ..] => {
                Some(ForwardPort::new(port, protocol, to_port, to_address))
            }
            _ => {
                warn!("Skipping malformed forward port tuple {:?}", tuple);
                None
            }
        })
        .collect()
}

/// The string members of an array, skipping anything else.
fn string_list(value: &Value<'_>) -> Vec<String> {
    match peel(value) {
        Value::Array(items) => items.iter().filter_map(as_string).collect(),
        _ => Vec::new(),
    }
}

/// Every structure (or string array) in an array as a list of strings.
/// Entries holding anything but strings are malformed and skipped; empty
/// entries are dropped.
fn tuples(value: Option<&Value<'_>>) -> Vec<Vec<String>> {
    let items = match value.map(peel) {
        Some(Value::Array(items)) => items,
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| {
            let members: Option<Vec<String>> = match peel(item) {
                Value::Structure(structure) => structure.fields().iter().map(as_string).collect(),
                Value::Array(members) => members.iter().map(as_string).collect(),
                _ => None,
            };
            if members.is_none() {
                warn!("Skipping tuple with non-string members: {:?}", item);
            }
            members
        })
        .filter(|tuple| !tuple.is_empty())
        .collect()
}

fn as_string(value: &Value<'_>) -> Option<String> {
    match peel(value) {
        Value::Str(s) => Some(s.as_str().to_string()),
        _ => None,
    }
}
