//! Operator-facing status messages

use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;
use crate::reader::IngestOutcome;

/// Text shown in the status area after each action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Status {
    Idle,
    Selecting,
    NoFileSelected,
    Loaded {
        file_name: String,
        processed: Vec<String>,
        missing: Vec<String>,
        skipped: Vec<String>,
    },
    NoExpectedSheets {
        file_name: String,
    },
    ReadError(String),
    #[serde(serialize_with = "serialize_display")]
    Invalid(ValidationError),
    Connecting {
        server: String,
    },
    Completed {
        total: usize,
    },
    Failed(String),
}

impl Status {
    pub fn loaded(outcome: &IngestOutcome) -> Self {
        Status::Loaded {
            file_name: outcome.file_name.clone(),
            processed: outcome.processed.clone(),
            missing: outcome.missing.clone(),
            skipped: outcome.skipped.clone(),
        }
    }

    /// Whether the status reports a problem the operator must fix
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::ReadError(_)
                | Status::Invalid(_)
                | Status::Failed(_)
                | Status::NoExpectedSheets { .. }
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Veuillez sélectionner un fichier à traiter."),
            Status::Selecting => write!(f, "Sélection du fichier en cours..."),
            Status::NoFileSelected => write!(f, "Aucun fichier sélectionné."),
            Status::Loaded {
                file_name,
                processed,
                missing,
                skipped,
            } => {
                writeln!(f, "Fichier '{}' chargé.", file_name)?;
                write!(f, "Feuilles traitées: {}", processed.join(", "))?;
                if !missing.is_empty() {
                    write!(f, "\nFeuilles manquantes: {}", missing.join(", "))?;
                }
                if !skipped.is_empty() {
                    write!(f, "\nFeuilles ignorées: {}", skipped.join(", "))?;
                }
                Ok(())
            }
            Status::NoExpectedSheets { file_name } => {
                write!(f, "Aucune feuille requise trouvée dans '{}'", file_name)
            }
            Status::ReadError(detail) => {
                write!(f, "Erreur lors de la lecture du fichier: {}", detail)
            }
            Status::Invalid(err) => write!(f, "{}", err),
            Status::Connecting { server } => write!(f, "Connexion à {}...", server),
            Status::Completed { total } => {
                write!(f, "Traitement terminé! {} lignes traitées.", total)
            }
            Status::Failed(detail) => write!(f, "Erreur de connexion: {}", detail),
        }
    }
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: fmt::Display,
{
    serializer.collect_str(value)
}
