//! Error type for the client facade.

use std::time::Duration;

use thiserror::Error;
use upstage_poll::FailReason;
use upstage_upload::UploadError;

use crate::collab::CollabError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("upload token acquisition failed: {0}")]
    Token(#[source] CollabError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("job submission failed: {0}")]
    Submit(#[source] CollabError),

    #[error("generation failed after {attempts} attempts: {reason}")]
    JobFailed { reason: FailReason, attempts: u32 },

    #[error("generation timed out after {attempts} attempts ({elapsed:?})")]
    TimedOut { attempts: u32, elapsed: Duration },

    #[error("generation still incomplete after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("generation cancelled")]
    Cancelled,

    #[error("completed job carried no snapshot")]
    MissingResult,
}

pub type Result<T> = std::result::Result<T, ClientError>;
