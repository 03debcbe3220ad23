//! Error types for ingestion, validation and dispatch

use thiserror::Error;

/// Failure to turn a file into workbook data
#[derive(Debug, Error)]
pub enum IngestError {
    /// File missing, corrupt or in a format the reader cannot open
    #[error("{0}")]
    Unreadable(String),

    /// None of the configured sheets exist in the file
    #[error("no expected sheet found in '{file_name}'")]
    NoExpectedSheets {
        file_name: String,
        missing: Vec<String>,
    },
}

/// Input check failures, in the order they are tested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Veuillez d'abord sélectionner et charger un fichier!")]
    NoDataLoaded,

    #[error("Aucune donnée valide trouvée dans le fichier!")]
    EmptyData,

    #[error("Le nom d'utilisateur et le mot de passe sont requis.")]
    MissingCredentials,

    #[error("Erreur: Serveur '{0}' non trouvé.")]
    UnknownServer(String),
}

/// Faults raised while connecting or running the sheet handlers
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Connection(String),

    #[error("sheet '{sheet}': {source}")]
    Handler {
        sheet: String,
        #[source]
        source: anyhow::Error,
    },
}
