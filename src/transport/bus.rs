// Firewalld D-Bus - zbus Binding
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! [`Connection`] and [`Invoker`] over a blocking zbus connection.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use zbus::zvariant::{DynamicType, OwnedValue, Structure, Value};
use zbus::Message;

use super::{Connection, Invoker, Method};
use crate::error::{Error, Result};

/// A blocking connection to the system or session bus.
pub struct BusConnection {
    connection: zbus::blocking::Connection,
}

impl BusConnection {
    /// Connect to the system bus.
    pub fn system() -> Result<Self> {
        info!("Connecting to the system D-Bus...");
        let connection = zbus::blocking::Connection::system().map_err(Error::Connection)?;
        Ok(Self { connection })
    }

    /// Connect to the session bus.
    pub fn session() -> Result<Self> {
        info!("Connecting to the session D-Bus...");
        let connection = zbus::blocking::Connection::session().map_err(Error::Connection)?;
        Ok(Self { connection })
    }
}

impl Connection for BusConnection {
    // Closing shuts down the socket shared by every clone, so invokers
    // handed out earlier fail from here on.
    fn close(&self) -> Result<()> {
        debug!(
            "Closing D-Bus connection {:?}",
            self.connection.unique_name().map(|name| name.to_string())
        );
        self.connection.clone().close().map_err(Error::Connection)
    }

    fn object(&self, destination: &str, path: &str) -> Arc<dyn Invoker> {
        Arc::new(BusObject {
            connection: self.connection.clone(),
            destination: destination.to_string(),
            path: path.to_string(),
        })
    }
}

/// One remote object on a [`BusConnection`].
pub struct BusObject {
    connection: zbus::blocking::Connection,
    destination: String,
    path: String,
}

impl BusObject {
    fn send<B>(&self, method: &Method, body: &B) -> zbus::Result<Message>
    where
        B: Serialize + DynamicType,
    {
        self.connection.call_method(
            Some(self.destination.as_str()),
            self.path.as_str(),
            Some(method.interface()),
            method.member(),
            body,
        )
    }
}

impl Invoker for BusObject {
    fn call(&self, method: &Method) -> Result<Vec<OwnedValue>> {
        let message = match method {
            Method::GetProperty { interface, property } => {
                self.send(method, &(*interface, *property))
            }
            Method::GetZoneByName(name) | Method::GetServiceByName(name) => {
                self.send(method, &(name.as_str(),))
            }
            Method::AddZone { name, settings } => self.send(method, &(name.as_str(), settings)),
            Method::Reload
            | Method::GetZoneNames
            | Method::GetServiceNames
            | Method::ListZones
            | Method::RemoveZone
            | Method::GetZoneSettings => self.send(method, &()),
        }
        .map_err(|e| Error::remote(method.name(), e))?;

        reply_values(method, &message)
    }
}

/// Split a reply body into its output arguments.
pub(crate) fn reply_values(method: &Method, message: &Message) -> Result<Vec<OwnedValue>> {
    if !method.has_reply() {
        return Ok(Vec::new());
    }

    let decode_error = |e: zbus::Error| Error::decode(method.name(), e.to_string());

    // zbus reads the body as one structure. A body made of a single struct
    // argument comes back as that struct rather than wrapped in another.
    let body = message.body();
    let reply: Structure<'_> = body.deserialize().map_err(decode_error)?;

    if method.returns_struct() {
        let value = Value::Structure(reply)
            .try_to_owned()
            .map_err(|e| decode_error(e.into()))?;
        return Ok(vec![value]);
    }

    reply
        .fields()
        .iter()
        .map(|field| field.try_to_owned().map_err(|e| decode_error(e.into())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::models::{ForwardPort, Port, ZoneSettings};
    use crate::transport::Reply;
    use pretty_assertions::assert_eq;
    use zbus::zvariant::ObjectPath;

    const ZONE_0: &str = "/org/fedoraproject/FirewallD1/config/zone/0";

    fn reply_to<B>(method: &Method, body: &B) -> Message
    where
        B: Serialize + DynamicType,
    {
        let call = Message::method(ZONE_0, method.member())
            .unwrap()
            .build(&())
            .unwrap();
        Message::method_reply(&call).unwrap().build(body).unwrap()
    }

    fn reply(method: &Method, message: &Message) -> Reply {
        Reply::new(method, reply_values(method, message).unwrap())
    }

    #[test]
    fn test_variant_reply() {
        let method = Method::GetProperty {
            interface: "org.fedoraproject.FirewallD1",
            property: "version",
        };
        let message = reply_to(&method, &(Value::from("0.8.6"),));

        assert_eq!(reply(&method, &message).string(0).unwrap(), "0.8.6");
    }

    #[test]
    fn test_string_array_reply() {
        let method = Method::GetZoneNames;
        let message = reply_to(&method, &(vec!["FedoraServer", "dmz", "drop"],));

        assert_eq!(
            reply(&method, &message).strings(0).unwrap(),
            vec!["FedoraServer", "dmz", "drop"]
        );
    }

    #[test]
    fn test_object_path_reply() {
        let method = Method::GetZoneByName("public".to_string());
        let message = reply_to(&method, &(ObjectPath::try_from(ZONE_0).unwrap(),));

        assert_eq!(reply(&method, &message).path(0).unwrap().as_str(), ZONE_0);
    }

    #[test]
    fn test_settings_reply_is_one_argument() {
        let mut settings = ZoneSettings::with_target("default");
        settings.name = "work".to_string();
        settings.ports = vec![Port::new("1025-65535", "udp"), Port::new("1025-65535", "tcp")];
        settings.forward_ports = vec![ForwardPort::new("22", "tcp", "22", "192.0.2.55")];
        settings.source_ports = vec![Port::new("53", "udp")];

        let method = Method::GetZoneSettings;
        let message = reply_to(&method, &(codec::encode(&settings),));

        let values = reply_values(&method, &message).unwrap();
        assert_eq!(values.len(), 1);

        let reply = Reply::new(&method, values);
        assert_eq!(codec::decode(reply.value(0).unwrap()).unwrap(), settings);
    }

    #[test]
    fn test_no_reply_methods_skip_body() {
        let method = Method::RemoveZone;
        let message = reply_to(&method, &());

        assert!(reply_values(&method, &message).unwrap().is_empty());
    }
}
