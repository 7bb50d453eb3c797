//! Deployment environment classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Portal served from this machine or the local network.
    Local,
    /// Hosted deployment.
    Cloud,
}

impl Environment {
    /// Classify the host the portal is served from.
    ///
    /// Local means `localhost`, loopback (`127.*`) or a private IPv4 range
    /// (`10.*`, `172.16.*`..`172.31.*`, `192.168.*`).
    #[must_use]
    pub fn classify(host: &str) -> Self {
        if host == "localhost" || host.starts_with("127.") {
            return Self::Local;
        }
        match host.parse::<Ipv4Addr>() {
            Ok(ip) if ip.is_private() => Self::Local,
            _ => Self::Cloud,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Cloud => f.write_str("cloud"),
        }
    }
}

/// Resolved API location handed to the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub environment: Environment,
}
