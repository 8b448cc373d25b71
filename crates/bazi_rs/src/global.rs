//! Process-wide engine for the convenience functions.

use std::sync::OnceLock;

use bazi_search::{BaziEngine, EngineConfig};

use crate::error::RequestError;

static ENGINE: OnceLock<BaziEngine> = OnceLock::new();

/// Build the global engine from `config`. Fails if already initialized.
pub fn init(config: EngineConfig) -> Result<(), RequestError> {
    let engine = BaziEngine::new(config)?;
    ENGINE
        .set(engine)
        .map_err(|_| RequestError::AlreadyInitialized)
}

/// True once `init()` has succeeded.
pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}

pub(crate) fn engine() -> Result<&'static BaziEngine, RequestError> {
    ENGINE.get().ok_or(RequestError::NotInitialized)
}
