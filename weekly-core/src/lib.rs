//! weekly-core: spreadsheet ingestion and per-sheet dispatch for weekly settings
//!
//! A [`Session`] loads the expected sheets of a workbook into row records,
//! validates the operator's server choice and credentials, then routes every
//! sheet to its registered handler.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod reader;
pub mod status;

use log::warn;
use std::path::Path;

pub use config::{ConnectionTarget, SheetSpec, WeeklyConfig};
pub use dispatch::{Connector, Credentials, Dispatcher, PlaceholderConnector, Report};
pub use error::{DispatchError, IngestError, ValidationError};
pub use handlers::{HandlerRegistry, SheetHandler};
pub use reader::{CellValue, IngestOutcome, RowRecord, WorkbookData};
pub use status::Status;

/// State of one operator session: loaded data plus the last status
pub struct Session {
    config: WeeklyConfig,
    handlers: HandlerRegistry,
    connector: Box<dyn Connector>,
    data: Option<WorkbookData>,
    status: Status,
}

impl Session {
    /// Create a session with the built-in handlers and the placeholder connector
    pub fn new(config: WeeklyConfig) -> Self {
        Self::with_parts(
            config,
            HandlerRegistry::default(),
            Box::new(PlaceholderConnector),
        )
    }

    pub fn with_parts(
        config: WeeklyConfig,
        handlers: HandlerRegistry,
        connector: Box<dyn Connector>,
    ) -> Self {
        Self {
            config,
            handlers,
            connector,
            data: None,
            status: Status::Idle,
        }
    }

    /// Handle the result of the file picker; `None` means the selection was cancelled
    pub fn select_file<P: AsRef<Path>>(&mut self, path: Option<P>) -> &Status {
        self.status = Status::Selecting;
        match path {
            Some(path) => self.load(path),
            None => {
                self.status = Status::NoFileSelected;
                &self.status
            }
        }
    }

    /// Load a workbook, replacing any previously loaded data
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> &Status {
        self.data = Some(WorkbookData::new());

        self.status = match reader::load_workbook(path, &self.config.sheets) {
            Ok(outcome) => {
                let status = Status::loaded(&outcome);
                self.data = Some(outcome.data);
                status
            }
            Err(IngestError::NoExpectedSheets { file_name, .. }) => {
                Status::NoExpectedSheets { file_name }
            }
            Err(IngestError::Unreadable(detail)) => {
                warn!("Error while loading: {}", detail);
                self.data = None;
                Status::ReadError(detail)
            }
        };
        &self.status
    }

    /// Validate the credentials and run every sheet through its handler
    ///
    /// Returns the report when a processing pass took place; validation
    /// failures only update the status.
    pub fn connect(&mut self, credentials: &Credentials) -> Option<Report> {
        let target = match dispatch::submit(credentials, self.data.as_ref(), &self.config) {
            Ok(target) => target,
            Err(err) => {
                warn!("Connection refused: {}", err);
                self.status = Status::Invalid(err);
                return None;
            }
        };
        let data = self.data.as_ref()?;

        self.status = Status::Connecting {
            server: target.label.clone(),
        };
        let dispatcher = Dispatcher::new(
            &self.handlers,
            &*self.connector,
            self.config.connect_timeout(),
        );
        let report = dispatcher.run(&target, credentials, data);

        self.status = match &report.outcome {
            Ok(total) => Status::Completed { total: *total },
            Err(detail) => Status::Failed(detail.clone()),
        };
        Some(report)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Loaded data; `None` until a load succeeds or after a failed one
    pub fn data(&self) -> Option<&WorkbookData> {
        self.data.as_ref()
    }

    pub fn config(&self) -> &WeeklyConfig {
        &self.config
    }

    pub fn server_labels(&self) -> Vec<&str> {
        self.config.server_labels()
    }

    pub fn default_server(&self) -> Option<&str> {
        self.config.default_server()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(WeeklyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert!(session.data().is_none());
        assert_eq!(session.status(), &Status::Idle);
        assert_eq!(session.default_server(), Some("EUROPE"));
    }

    #[test]
    fn test_cancelled_selection_keeps_state() {
        let mut session = Session::default();
        let status = session.select_file(None::<&Path>).clone();
        assert_eq!(status, Status::NoFileSelected);
        assert!(session.data().is_none());
    }

    #[test]
    fn test_connect_without_data() {
        let mut session = Session::default();
        let report = session.connect(&Credentials::new("EUROPE", "", ""));
        assert!(report.is_none());
        assert_eq!(
            session.status(),
            &Status::Invalid(ValidationError::NoDataLoaded)
        );
    }

    #[test]
    fn test_unreadable_file_clears_data() {
        let mut session = Session::default();
        let status = session.load("/nonexistent/weekly.xlsx").clone();
        assert!(matches!(status, Status::ReadError(_)));
        assert!(status.to_string().starts_with("Erreur lors de la lecture du fichier: "));
        assert!(session.data().is_none());
    }
}
