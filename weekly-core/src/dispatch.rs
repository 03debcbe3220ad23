//! Credential validation, connection and per-sheet dispatch

use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::config::{ConnectionTarget, WeeklyConfig};
use crate::error::{DispatchError, ValidationError};
use crate::handlers::HandlerRegistry;
use crate::reader::WorkbookData;

/// Character used to mask passwords in logs
pub const MASK_CHAR: char = '*';

/// Operator input from the login form
#[derive(Clone, Default)]
pub struct Credentials {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &mask_password(&self.password))
            .finish()
    }
}

/// Replace every character of a password with [`MASK_CHAR`]
pub fn mask_password(password: &str) -> String {
    std::iter::repeat(MASK_CHAR)
        .take(password.chars().count())
        .collect()
}

/// Check the inputs and resolve the chosen server
///
/// Checks run in a fixed order and the first failure is returned: data loaded,
/// data non-empty, credentials non-blank, server known.
pub fn submit(
    credentials: &Credentials,
    data: Option<&WorkbookData>,
    config: &WeeklyConfig,
) -> Result<ConnectionTarget, ValidationError> {
    let data = data.ok_or(ValidationError::NoDataLoaded)?;
    if data.is_empty() {
        return Err(ValidationError::EmptyData);
    }
    if credentials.username.trim().is_empty() || credentials.password.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    config
        .resolve_server(&credentials.server)
        .ok_or_else(|| ValidationError::UnknownServer(credentials.server.clone()))
}

/// Everything a connector needs to open a connection
#[derive(Clone)]
pub struct ConnectRequest<'a> {
    pub target: &'a ConnectionTarget,
    pub username: &'a str,
    pub password: &'a str,
    /// Time budget for establishing the connection
    pub timeout: Duration,
}

/// An open backend connection
pub trait Connection {
    fn close(&mut self);
}

/// Opens connections to a backend
pub trait Connector {
    fn connect(
        &self,
        request: &ConnectRequest<'_>,
    ) -> Result<Box<dyn Connection>, DispatchError>;
}

/// Connector that only logs the connection parameters
#[derive(Debug, Default)]
pub struct PlaceholderConnector;

struct PlaceholderConnection {
    target: String,
}

impl Connection for PlaceholderConnection {
    fn close(&mut self) {
        info!("Connection to {} closed", self.target);
    }
}

impl Connector for PlaceholderConnector {
    fn connect(
        &self,
        request: &ConnectRequest<'_>,
    ) -> Result<Box<dyn Connection>, DispatchError> {
        info!("Connecting to {}", request.target.label);
        info!("DATABASE: {}", request.target.target);
        info!("UID: {}", request.username);
        info!("PWD: {}", mask_password(request.password));
        Ok(Box::new(PlaceholderConnection {
            target: request.target.target.clone(),
        }))
    }
}

/// Per-sheet line of a processing report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetReport {
    pub name: String,
    /// Records handed to the handler
    pub rows: usize,
    /// Count returned by the handler
    pub handled: usize,
}

/// Result of one processing pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub target: ConnectionTarget,
    pub sheets: Vec<SheetReport>,
    /// Sheets without a registered handler
    pub unrecognized: Vec<String>,
    /// Total input rows on success, error text otherwise
    pub outcome: Result<usize, String>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn total(&self) -> Option<usize> {
        self.outcome.as_ref().ok().copied()
    }
}

/// Runs the handlers of a session against a connection
pub struct Dispatcher<'a> {
    handlers: &'a HandlerRegistry,
    connector: &'a dyn Connector,
    timeout: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        handlers: &'a HandlerRegistry,
        connector: &'a dyn Connector,
        timeout: Duration,
    ) -> Self {
        Self {
            handlers,
            connector,
            timeout,
        }
    }

    /// Connect, route each sheet to its handler and sum the input rows
    ///
    /// Never fails: faults end up in [`Report::outcome`]. The completion step
    /// runs whether the pass succeeded or not.
    pub fn run(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
        data: &WorkbookData,
    ) -> Report {
        let mut report = Report {
            target: target.clone(),
            sheets: Vec::new(),
            unrecognized: Vec::new(),
            outcome: Ok(0),
        };

        let mut guard = CompletionGuard { connection: None };
        let result = self.process(target, credentials, data, &mut guard, &mut report);
        drop(guard);

        report.outcome = result.map_err(|e| {
            warn!("Processing failed: {}", e);
            e.to_string()
        });
        report
    }

    fn process(
        &self,
        target: &ConnectionTarget,
        credentials: &Credentials,
        data: &WorkbookData,
        guard: &mut CompletionGuard,
        report: &mut Report,
    ) -> Result<usize, DispatchError> {
        let request = ConnectRequest {
            target,
            username: credentials.username.trim(),
            password: credentials.password.trim(),
            timeout: self.timeout,
        };
        guard.connection = Some(self.connector.connect(&request)?);

        let mut total = 0;
        for (sheet_name, rows) in data.iter() {
            info!("Processing sheet: {} ({} rows)", sheet_name, rows.len());

            let Some(handler) = self.handlers.get(sheet_name) else {
                warn!("Unrecognized sheet: {}", sheet_name);
                report.unrecognized.push(sheet_name.to_string());
                continue;
            };

            let handled = handler
                .process(rows)
                .map_err(|source| DispatchError::Handler {
                    sheet: sheet_name.to_string(),
                    source,
                })?;

            report.sheets.push(SheetReport {
                name: sheet_name.to_string(),
                rows: rows.len(),
                handled,
            });
            total += rows.len();
        }

        Ok(total)
    }
}

/// Closes the connection and logs completion when the pass ends
struct CompletionGuard {
    connection: Option<Box<dyn Connection>>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
        info!("Processing finished");
    }
}
