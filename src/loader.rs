//! Lazy, single-flight tokenizer initialization.
//!
//! `TokenizerCell` moves through `Uninitialized → Loading → Ready | Failed`.
//! The first caller runs the loader outside the lock; callers that arrive
//! while a load is in flight block on that same flight and receive its
//! outcome. `Ready` is write-once. After `Failed`, the next caller starts a
//! fresh flight, so retrying is up to the caller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use ruby_core::dict::DictError;
use ruby_core::tokenizer::LatticeTokenizer;
use ruby_core::Tokenizer;
use tracing::{info, warn};

pub type SharedTokenizer = Arc<dyn Tokenizer>;

/// Outcome of one initialization flight, shared by every waiter.
pub type LoadOutcome = Result<SharedTokenizer, Arc<LoadError>>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictError),

    #[error("tokenizer loader panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Source(String),
}

/// Something that can produce a ready tokenizer, typically slowly.
pub trait TokenizerSource: Send + Sync {
    fn load(&self) -> Result<SharedTokenizer, LoadError>;
}

/// Loads a `LatticeTokenizer` from a compiled dictionary and optional
/// connection matrix.
#[derive(Debug, Clone)]
pub struct DictionaryFiles {
    pub dict: PathBuf,
    pub conn: Option<PathBuf>,
}

impl DictionaryFiles {
    pub fn new(dict: impl Into<PathBuf>, conn: Option<PathBuf>) -> Self {
        Self {
            dict: dict.into(),
            conn,
        }
    }
}

impl TokenizerSource for DictionaryFiles {
    fn load(&self) -> Result<SharedTokenizer, LoadError> {
        let tokenizer = LatticeTokenizer::open(&self.dict, self.conn.as_deref())?;
        Ok(Arc::new(tokenizer))
    }
}

/// Observable initialization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

#[derive(Default)]
struct Flight {
    outcome: Mutex<Option<LoadOutcome>>,
    done: Condvar,
}

impl Flight {
    fn wait(&self) -> LoadOutcome {
        let guard = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        let guard = self
            .done
            .wait_while(guard, |outcome| outcome.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(outcome) => outcome.clone(),
            None => Err(Arc::new(LoadError::Source(
                "initialization finished without a result".to_string(),
            ))),
        }
    }

    fn complete(&self, outcome: LoadOutcome) {
        let mut guard = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(outcome);
        self.done.notify_all();
    }
}

enum CellState {
    Uninitialized,
    Loading(Arc<Flight>),
    Ready(SharedTokenizer),
    Failed(Arc<LoadError>),
}

/// Write-once tokenizer slot with single-flight initialization.
pub struct TokenizerCell {
    state: Mutex<CellState>,
    flights: AtomicUsize,
}

impl Default for TokenizerCell {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerCell {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CellState::Uninitialized),
            flights: AtomicUsize::new(0),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CellState> {
        // No user code runs while the lock is held, so a poisoned lock still
        // holds a consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> LoadState {
        match &*self.lock_state() {
            CellState::Uninitialized => LoadState::Uninitialized,
            CellState::Loading(_) => LoadState::Loading,
            CellState::Ready(_) => LoadState::Ready,
            CellState::Failed(_) => LoadState::Failed,
        }
    }

    /// The tokenizer, if initialization has already succeeded.
    pub fn get(&self) -> Option<SharedTokenizer> {
        match &*self.lock_state() {
            CellState::Ready(tokenizer) => Some(Arc::clone(tokenizer)),
            _ => None,
        }
    }

    /// Number of loads started so far.
    pub fn flights(&self) -> usize {
        self.flights.load(Ordering::SeqCst)
    }

    /// Return the tokenizer, running `load` only if no load has succeeded and
    /// none is in flight.
    pub fn get_or_init<F>(&self, load: F) -> LoadOutcome
    where
        F: FnOnce() -> Result<SharedTokenizer, LoadError>,
    {
        let mut state = self.lock_state();
        if let CellState::Ready(tokenizer) = &*state {
            return Ok(Arc::clone(tokenizer));
        }
        if let CellState::Loading(flight) = &*state {
            let flight = Arc::clone(flight);
            drop(state);
            return flight.wait();
        }
        let flight = Arc::new(Flight::default());
        *state = CellState::Loading(Arc::clone(&flight));
        drop(state);

        let attempt = self.flights.fetch_add(1, Ordering::SeqCst) + 1;
        info!(attempt, "tokenizer load started");
        let outcome: LoadOutcome = match panic::catch_unwind(AssertUnwindSafe(load)) {
            Ok(Ok(tokenizer)) => Ok(tokenizer),
            Ok(Err(e)) => Err(Arc::new(e)),
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                Err(Arc::new(LoadError::Panicked(msg)))
            }
        };

        *self.lock_state() = match &outcome {
            Ok(tokenizer) => {
                info!(attempt, "tokenizer ready");
                CellState::Ready(Arc::clone(tokenizer))
            }
            Err(e) => {
                warn!(attempt, error = %e, "tokenizer load failed");
                CellState::Failed(Arc::clone(e))
            }
        };
        flight.complete(outcome.clone());
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
