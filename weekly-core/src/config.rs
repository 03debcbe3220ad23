//! Configuration: expected sheets and the server registry

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyConfig {
    /// Upper bound a connector may spend establishing a connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Sheets to ingest, in reporting order
    #[serde(default = "default_sheets")]
    pub sheets: Vec<SheetSpec>,
    /// Selectable servers; the first one is the default selection
    #[serde(default = "default_servers")]
    pub servers: Vec<ServerEntry>,
}

/// A sheet to ingest and how many leading columns to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    pub expected_columns: usize,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>, expected_columns: usize) -> Self {
        Self {
            name: name.into(),
            expected_columns,
        }
    }
}

/// A server label and the connection target it resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub label: String,
    pub target: String,
}

/// A resolved server choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionTarget {
    pub label: String,
    pub target: String,
}

impl WeeklyConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: WeeklyConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the spec of a configured sheet
    pub fn sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Resolve a server label to its connection target
    pub fn resolve_server(&self, label: &str) -> Option<ConnectionTarget> {
        self.servers
            .iter()
            .find(|s| s.label == label)
            .map(|s| ConnectionTarget {
                label: s.label.clone(),
                target: s.target.clone(),
            })
    }

    pub fn server_labels(&self) -> Vec<&str> {
        self.servers.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn default_server(&self) -> Option<&str> {
        self.servers.first().map(|s| s.label.as_str())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.sheets.is_empty() {
            anyhow::bail!("Configuration error: at least one sheet is required");
        }
        if self.servers.is_empty() {
            anyhow::bail!("Configuration error: at least one server is required");
        }

        let mut names = HashSet::new();
        for sheet in &self.sheets {
            if sheet.expected_columns == 0 {
                anyhow::bail!(
                    "Configuration error: sheet '{}' must keep at least one column",
                    sheet.name
                );
            }
            if !names.insert(sheet.name.as_str()) {
                anyhow::bail!("Configuration error: duplicate sheet '{}'", sheet.name);
            }
        }

        let mut labels = HashSet::new();
        for server in &self.servers {
            if server.target.trim().is_empty() {
                anyhow::bail!(
                    "Configuration error: server '{}' has an empty target",
                    server.label
                );
            }
            if !labels.insert(server.label.as_str()) {
                anyhow::bail!("Configuration error: duplicate server '{}'", server.label);
            }
        }

        Ok(())
    }
}

impl Default for WeeklyConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            sheets: default_sheets(),
            servers: default_servers(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_sheets() -> Vec<SheetSpec> {
    vec![
        SheetSpec::new("COREXT", 8),
        SheetSpec::new("Transco By Source", 8),
        SheetSpec::new("Transco By Ref", 6),
        SheetSpec::new("Missing Data", 4),
    ]
}

fn default_servers() -> Vec<ServerEntry> {
    [
        ("EUROPE", "wlypasdev000078LITES_GLORYV4EU_ASS"),
        ("ASIA", "wlypasdev000078LITES_GLORYV4AS_INT"),
        ("NY", "wlypasdev000078LITES_GLORYV4NA_INT"),
    ]
    .into_iter()
    .map(|(label, target)| ServerEntry {
        label: label.to_string(),
        target: target.to_string(),
    })
    .collect()
}
