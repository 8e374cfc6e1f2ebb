// Firewalld D-Bus - Scripted Bus
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! In-memory [`Connection`] for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use zbus::zvariant::{OwnedValue, Value};

use super::{Connection, Invoker, Method};
use crate::error::{Error, Result};

type Handler = Box<dyn Fn(&Method) -> Result<Vec<OwnedValue>> + Send + Sync>;

/// Convert anything zvariant understands into an owned reply slot.
pub(crate) fn owned<'a>(value: impl Into<Value<'a>>) -> OwnedValue {
    let value: Value<'a> = value.into();
    value.try_to_owned().unwrap()
}

/// A bus whose objects answer from scripted handlers.
#[derive(Default)]
pub(crate) struct FakeBus {
    objects: Mutex<HashMap<String, Arc<FakeObject>>>,
    lookups: Mutex<Vec<(String, String)>>,
    close_error: Mutex<Option<String>>,
    closes: Mutex<usize>,
}

impl FakeBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The object at `path`, created on first use.
    pub fn object_at(&self, path: &str) -> Arc<FakeObject> {
        self.objects
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .clone()
    }

    /// Every `(destination, path)` passed to [`Connection::object`].
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn fail_close(&self, message: &str) {
        *self.close_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn closes(&self) -> usize {
        *self.closes.lock().unwrap()
    }
}

impl Connection for FakeBus {
    fn close(&self) -> Result<()> {
        *self.closes.lock().unwrap() += 1;
        match self.close_error.lock().unwrap().clone() {
            Some(message) => Err(Error::Connection(zbus::Error::Failure(message))),
            None => Ok(()),
        }
    }

    fn object(&self, destination: &str, path: &str) -> Arc<dyn Invoker> {
        self.lookups
            .lock()
            .unwrap()
            .push((destination.to_string(), path.to_string()));
        self.object_at(path)
    }
}

/// A remote object recording its calls.
#[derive(Default)]
pub(crate) struct FakeObject {
    handlers: Mutex<HashMap<&'static str, Handler>>,
    calls: Mutex<Vec<Method>>,
}

impl FakeObject {
    /// Answer calls to `member` with `handler`.
    pub fn on<F>(&self, member: &'static str, handler: F)
    where
        F: Fn(&Method) -> Result<Vec<OwnedValue>> + Send + Sync + 'static,
    {
        self.handlers.lock().unwrap().insert(member, Box::new(handler));
    }

    /// Fail calls to `member` the way a daemon exception would.
    pub fn fail(&self, member: &'static str, message: &str) {
        let message = message.to_string();
        self.on(member, move |method| {
            Err(Error::remote(method.name(), zbus::Error::Failure(message.clone())))
        });
    }

    pub fn calls(&self) -> Vec<Method> {
        self.calls.lock().unwrap().clone()
    }
}

impl Invoker for FakeObject {
    fn call(&self, method: &Method) -> Result<Vec<OwnedValue>> {
        self.calls.lock().unwrap().push(method.clone());
        match self.handlers.lock().unwrap().get(method.member()) {
            Some(handler) => handler(method),
            None => Err(Error::remote(
                method.name(),
                zbus::Error::Failure(format!("UNKNOWN_METHOD: {}", method.member())),
            )),
        }
    }
}
