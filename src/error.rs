use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Language;

/// Coarse classification used for logging and for picking the user-facing message.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ErrorKind {
    InputInvalid,
    UpstreamFailure,
    MalformedResponse,
    StorageUnavailable,
}

/// All errors surfaced to the user by the vision engine.
///
/// None of them is fatal: every variant leaves the engine in a state from which
/// the user can retry (file still selected, history intact).
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum VisionError {
    /// Unreadable or undecodable chart image
    #[error("invalid chart image: {0}")]
    InputInvalid(String),

    /// Network, auth, quota or timeout while talking to the model
    #[error("vision model request failed: {0}")]
    UpstreamFailure(String),

    /// The model answered with something that is not an AnalysisResult
    #[error("vision model returned a malformed analysis: {0}")]
    MalformedResponse(String),

    /// Local store read/write failed; the session continues in memory
    #[error("local storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl VisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VisionError::InputInvalid(_) => ErrorKind::InputInvalid,
            VisionError::UpstreamFailure(_) => ErrorKind::UpstreamFailure,
            VisionError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            VisionError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
        }
    }

    /// Message for the single error slot of the UI.
    ///
    /// Upstream failures carry the service message; malformed responses never
    /// show the raw payload (it is only logged).
    pub fn user_message(&self, lang: Language) -> String {
        let fr = lang == Language::Fr;
        match self {
            VisionError::InputInvalid(detail) => {
                if fr {
                    format!("Image illisible ({}). Sélectionnez un autre fichier.", detail)
                } else {
                    format!("Could not read this image ({}). Select another file.", detail)
                }
            }
            VisionError::UpstreamFailure(detail) => {
                if fr {
                    format!("Le moteur d'analyse ne répond pas : {}", detail)
                } else {
                    format!("The analysis engine did not respond: {}", detail)
                }
            }
            VisionError::MalformedResponse(_) => {
                if fr {
                    String::from("Le moteur a renvoyé une analyse invalide. Veuillez réessayer.")
                } else {
                    String::from("The engine returned an invalid analysis. Please try again.")
                }
            }
            VisionError::StorageUnavailable(_) => {
                if fr {
                    String::from(
                        "Stockage local indisponible : l'historique ne sera conservé que pour cette session.",
                    )
                } else {
                    String::from(
                        "Local storage unavailable: history is kept for this session only.",
                    )
                }
            }
        }
    }
}
