// Firewalld D-Bus - Errors
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Error type shared by every client operation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the firewalld clients.
///
/// Daemon faults and transport failures are reported the same way
/// (`RemoteCall`), since zbus does not let us tell a dropped socket from
/// an exception raised by firewalld in every case.
#[derive(Debug, Error)]
pub enum Error {
    /// The message bus could not be reached, or the connection could not be released.
    #[error("Failed to connect to the D-Bus message bus: {0}")]
    Connection(#[source] zbus::Error),

    /// A remote method call failed, either in the daemon or in transit.
    #[error("D-Bus call {method} failed: {source}")]
    RemoteCall {
        method: String,
        #[source]
        source: zbus::Error,
    },

    /// The reply did not have the shape the method promises.
    #[error("Unexpected reply to {method}: {reason}")]
    Decode { method: String, reason: String },
}

impl Error {
    pub(crate) fn remote(method: impl Into<String>, source: zbus::Error) -> Self {
        Error::RemoteCall {
            method: method.into(),
            source,
        }
    }

    pub(crate) fn decode(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Decode {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// The firewalld error code carried by a daemon fault, if any.
    ///
    /// firewalld prefixes its exception messages with an upper-case code,
    /// e.g. `INVALID_ZONE: foo` or `NAME_CONFLICT: new_zone(): 'test'`.
    pub fn firewalld_code(&self) -> Option<&str> {
        let message = match self {
            Error::RemoteCall { source, .. } => match source {
                zbus::Error::MethodError(_, Some(message), _) => message.as_str(),
                zbus::Error::Failure(message) => message.as_str(),
                _ => return None,
            },
            _ => return None,
        };

        let code = message.split(':').next()?.trim();
        let is_code = !code.is_empty()
            && code.chars().all(|c| c.is_ascii_uppercase() || c == '_');
        is_code.then_some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firewalld_code_from_failure() {
        let err = Error::remote(
            "org.fedoraproject.FirewallD1.config.getZoneByName",
            zbus::Error::Failure("INVALID_ZONE: nope".to_string()),
        );
        assert_eq!(err.firewalld_code(), Some("INVALID_ZONE"));
    }

    #[test]
    fn test_firewalld_code_absent_for_plain_messages() {
        let err = Error::remote(
            "org.fedoraproject.FirewallD1.reload",
            zbus::Error::Failure("connection reset by peer".to_string()),
        );
        assert_eq!(err.firewalld_code(), None);

        let err = Error::decode("org.fedoraproject.FirewallD1.config.listZones", "INVALID: x");
        assert_eq!(err.firewalld_code(), None);
    }

    #[test]
    fn test_display_names_method() {
        let err = Error::remote(
            "org.fedoraproject.FirewallD1.reload",
            zbus::Error::Failure("boom".to_string()),
        );
        let text = err.to_string();
        assert!(text.contains("org.fedoraproject.FirewallD1.reload"));
        assert!(text.contains("boom"));
    }
}
