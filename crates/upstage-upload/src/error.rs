//! Error types for upstage-upload.
//!
//! Every phase-scoped variant carries the phase it failed in, so apply,
//! transfer, and commit failures read apart without stack inspection.

use thiserror::Error;
use upstage_sign::SignError;

use crate::data::UploadPhase;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("incomplete upload grant: missing {0}")]
    IncompleteGrant(&'static str),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("signing failed: {0}")]
    Sign(#[from] SignError),

    #[error("{phase} request failed: {message}")]
    Transport {
        phase:   UploadPhase,
        message: String,
    },

    #[error("{phase} rejected with HTTP {status}: {body}")]
    Rejected {
        phase:  UploadPhase,
        status: u16,
        body:   String,
    },

    #[error("{phase} refused by service ({code}): {message}")]
    Remote {
        phase:   UploadPhase,
        code:    String,
        message: String,
    },

    #[error("{phase} response could not be decoded: {source}")]
    Decode {
        phase:  UploadPhase,
        #[source]
        source: serde_json::Error,
    },

    #[error("{phase} response missing required field {field}")]
    Contract {
        phase: UploadPhase,
        field: &'static str,
    },
}

impl UploadError {
    /// Phase the pipeline failed in, for failures scoped to one.
    pub fn phase(&self) -> Option<UploadPhase> {
        match self {
            UploadError::Transport { phase, .. }
            | UploadError::Rejected { phase, .. }
            | UploadError::Remote { phase, .. }
            | UploadError::Decode { phase, .. }
            | UploadError::Contract { phase, .. } => Some(*phase),
            UploadError::IncompleteGrant(_)
            | UploadError::ClientBuild(_)
            | UploadError::Sign(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
