//! Engine configuration (§6, §10.3): where the KSK lives, the zone's own
//! SOA fields, the auto-answered NS set, and one behavioural flag governing
//! NXDOMAIN-with-DO handling.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to a PKCS#8 PEM-encoded EC private key (§6); startup fails if it
    /// cannot be read or parsed as an EC key.
    pub dnssec_key_path: String,

    /// SOA MNAME (§3): the zone's primary nameserver.
    pub primary_nameserver: String,

    /// SOA RNAME (§3): the zone administrator's mailbox, `.`-separated.
    pub admin_mailbox: String,

    /// Nameservers answered at every zone apex regardless of what's stored
    /// (§4.5, §11).
    #[serde(default)]
    pub auto_nameservers: Vec<String>,

    /// Whether a DNSSEC-signed NXDOMAIN is rewritten to NOERROR with an
    /// NSEC/RRSIG pair proving non-existence (§9). Default `true`; set
    /// `false` for a standards-strict reply.
    #[serde(default = "default_true")]
    pub nxdomain_synthesizes_noerror: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dnssec_key_path: "dnssec-key.pem".to_string(),
            primary_nameserver: "ns1.example.com.".to_string(),
            admin_mailbox: "admin.example.com.".to_string(),
            auto_nameservers: vec!["ns1.example.com.".to_string()],
            nxdomain_synthesizes_noerror: true,
        }
    }
}

impl Config {
    /// Load from a TOML file (§10.3); missing fields fall back to `Default`.
    pub fn load(path: &str) -> Result<Config, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(format!("reading {path}: {e}")))?;
        toml::from_str(&text).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }
}
