// Firewalld D-Bus - Transport
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! The narrow seam between the firewalld clients and the message bus.
//!
//! A [`Connection`] hands out [`Invoker`]s bound to one object path, and an
//! invoker performs one [`Method`] call. The zbus binding lives in
//! [`bus`]; tests swap in the scripted bus from `fake`.

mod bus;
#[cfg(test)]
pub(crate) mod fake;

use std::sync::Arc;

use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::codec::ZoneSettingsWire;
use crate::error::{Error, Result};
use crate::firewall::interfaces;

pub use bus::{BusConnection, BusObject};

/// A live connection to a message bus.
pub trait Connection: Send + Sync {
    /// Release the connection.
    fn close(&self) -> Result<()>;

    /// Bind an invoker to `path` on the service owning `destination`.
    fn object(&self, destination: &str, path: &str) -> Arc<dyn Invoker>;
}

/// Something a remote method can be invoked on.
pub trait Invoker: Send + Sync {
    /// Call `method` and return its output arguments in order.
    ///
    /// Methods without a reply body yield an empty vector.
    fn call(&self, method: &Method) -> Result<Vec<OwnedValue>>;
}

/// Every remote method the clients use, with its typed input arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// `org.freedesktop.DBus.Properties.Get(interface, property)`.
    GetProperty {
        interface: &'static str,
        property: &'static str,
    },
    Reload,
    GetZoneNames,
    GetServiceNames,
    ListZones,
    GetZoneByName(String),
    GetServiceByName(String),
    AddZone {
        name: String,
        settings: ZoneSettingsWire,
    },
    /// `config.zone.remove()` on a per-zone object.
    RemoveZone,
    /// `config.zone.getSettings()` on a per-zone object.
    GetZoneSettings,
}

impl Method {
    /// D-Bus interface the member belongs to.
    pub fn interface(&self) -> &'static str {
        match self {
            Method::GetProperty { .. } => interfaces::PROPERTIES,
            Method::Reload => interfaces::MAIN,
            Method::GetZoneNames
            | Method::GetServiceNames
            | Method::ListZones
            | Method::GetZoneByName(_)
            | Method::GetServiceByName(_)
            | Method::AddZone { .. } => interfaces::CONFIG,
            Method::RemoveZone | Method::GetZoneSettings => interfaces::CONFIG_ZONE,
        }
    }

    /// D-Bus member name.
    pub fn member(&self) -> &'static str {
        match self {
            Method::GetProperty { .. } => "Get",
            Method::Reload => "reload",
            Method::GetZoneNames => "getZoneNames",
            Method::GetServiceNames => "getServiceNames",
            Method::ListZones => "listZones",
            Method::GetZoneByName(_) => "getZoneByName",
            Method::GetServiceByName(_) => "getServiceByName",
            Method::AddZone { .. } => "addZone",
            Method::RemoveZone => "remove",
            Method::GetZoneSettings => "getSettings",
        }
    }

    /// Fully qualified name, e.g. `org.fedoraproject.FirewallD1.config.getZoneNames`.
    pub fn name(&self) -> String {
        format!("{}.{}", self.interface(), self.member())
    }

    /// Whether the method returns a body worth reading.
    pub fn has_reply(&self) -> bool {
        !matches!(self, Method::Reload | Method::RemoveZone)
    }

    /// Whether the single output argument is itself a structure.
    pub fn returns_struct(&self) -> bool {
        matches!(self, Method::GetZoneSettings)
    }
}

/// Output arguments of one call, with typed accessors.
#[derive(Debug)]
pub struct Reply {
    method: String,
    values: Vec<OwnedValue>,
}

impl Reply {
    pub fn new(method: &Method, values: Vec<OwnedValue>) -> Self {
        Self {
            method: method.name(),
            values,
        }
    }

    /// The raw output argument at `index`, with variant wrappers removed.
    pub fn value(&self, index: usize) -> Result<&Value<'static>> {
        self.values
            .get(index)
            .map(|v| peel(&**v))
            .ok_or_else(|| self.error(format!("missing output argument {index}")))
    }

    pub fn string(&self, index: usize) -> Result<String> {
        match self.value(index)? {
            Value::Str(s) => Ok(s.as_str().to_string()),
            _ => Err(self.error(format!("output argument {index} is not a string"))),
        }
    }

    pub fn strings(&self, index: usize) -> Result<Vec<String>> {
        match self.value(index)? {
            Value::Array(items) => items
                .iter()
                .map(|item| match peel(item) {
                    Value::Str(s) => Ok(s.as_str().to_string()),
                    _ => Err(self.error(format!("output argument {index} holds a non-string"))),
                })
                .collect(),
            _ => Err(self.error(format!("output argument {index} is not an array"))),
        }
    }

    pub fn path(&self, index: usize) -> Result<OwnedObjectPath> {
        object_path(self.value(index)?)
            .ok_or_else(|| self.error(format!("output argument {index} is not an object path")))
    }

    pub fn paths(&self, index: usize) -> Result<Vec<OwnedObjectPath>> {
        match self.value(index)? {
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    object_path(item).ok_or_else(|| {
                        self.error(format!("output argument {index} holds a non-path"))
                    })
                })
                .collect(),
            _ => Err(self.error(format!("output argument {index} is not an array"))),
        }
    }

    fn error(&self, reason: String) -> Error {
        Error::decode(self.method.as_str(), reason)
    }
}

/// Call `method` on `invoker` and wrap the output arguments.
pub(crate) fn invoke(invoker: &dyn Invoker, method: &Method) -> Result<Reply> {
    tracing::debug!("Calling {}", method.member());
    let values = invoker.call(method)?;
    Ok(Reply::new(method, values))
}

/// Strip any number of `v` variant wrappers.
pub(crate) fn peel<'v, 'a>(value: &'v Value<'a>) -> &'v Value<'a> {
    match value {
        Value::Value(inner) => peel(inner),
        other => other,
    }
}

// Some daemons (and older firewalld builds) send paths as plain strings.
fn object_path(value: &Value<'_>) -> Option<OwnedObjectPath> {
    match peel(value) {
        Value::ObjectPath(path) => OwnedObjectPath::try_from(path.as_str()).ok(),
        Value::Str(s) => OwnedObjectPath::try_from(s.as_str()).ok(),
        _ => None,
    }
}
