use std::io;
use std::sync::Arc;

use crate::loader::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The tokenizer failed to initialize; nothing was annotated.
    #[error("tokenizer unavailable: {0}")]
    TokenizerUnavailable(Arc<LoadError>),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid preferences: {0}")]
    Json(#[from] serde_json::Error),

    #[error("annotation worker is not running")]
    WorkerGone,
}

impl From<Arc<LoadError>> for EngineError {
    fn from(e: Arc<LoadError>) -> Self {
        EngineError::TokenizerUnavailable(e)
    }
}
