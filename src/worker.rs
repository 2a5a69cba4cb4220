use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::{Annotation, FuriganaEngine};
use crate::error::EngineError;
use crate::messages::{Request, Response, SkipReason};
use crate::prefs::PrefsStore;

struct Envelope {
    request: Request,
    generation: u64,
}

/// Background thread answering typed [`Request`]s.
///
/// Annotate requests are superseded by newer ones: each submit bumps a
/// generation counter and the worker drops annotate work (before and after
/// running it) whose generation is no longer current. Preference requests
/// are always answered, in order.
pub struct AnnotationWorker {
    tx: mpsc::Sender<Envelope>,
    rx: Mutex<mpsc::Receiver<Response>>,
    generation: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl AnnotationWorker {
    pub fn spawn(engine: Arc<FuriganaEngine>, prefs: PrefsStore) -> Result<Self, EngineError> {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<Envelope>();
        let (result_tx, result_rx) = mpsc::channel::<Response>();

        let gen = Arc::clone(&generation);
        let handle = thread::Builder::new()
            .name("furigana-worker".into())
            .spawn(move || run(work_rx, result_tx, gen, engine, prefs))?;

        Ok(Self {
            tx: work_tx,
            rx: Mutex::new(result_rx),
            generation,
            handle: Some(handle),
        })
    }

    pub fn submit(&self, request: Request) -> Result<(), EngineError> {
        let generation = match request {
            Request::Annotate { .. } => self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            _ => self.generation.load(Ordering::SeqCst),
        };
        self.tx
            .send(Envelope {
                request,
                generation,
            })
            .map_err(|_| EngineError::WorkerGone)
    }

    /// Drop any annotate request still queued or running.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn try_recv(&self) -> Option<Response> {
        let rx = self.rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Response> {
        let rx = self.rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }

    /// Stop the thread and wait for it. Queued requests ahead of the
    /// shutdown are still handled.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let _ = self.tx.send(Envelope {
            request: Request::Shutdown,
            generation: 0,
        });
        if handle.join().is_err() {
            warn!("annotation worker panicked");
        }
    }
}

impl Drop for AnnotationWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(
    rx: mpsc::Receiver<Envelope>,
    tx: mpsc::Sender<Response>,
    gen: Arc<AtomicU64>,
    engine: Arc<FuriganaEngine>,
    mut prefs: PrefsStore,
) {
    let is_stale = |generation: u64| generation != gen.load(Ordering::SeqCst);

    while let Ok(Envelope {
        request,
        generation,
    }) = rx.recv()
    {
        let response = match request {
            Request::Shutdown => break,
            Request::GetEnabled => Response::Enabled {
                enabled: prefs.enabled(),
            },
            Request::SetEnabled { enabled } => match prefs.set_enabled(enabled) {
                Ok(()) => Response::Enabled {
                    enabled: prefs.enabled(),
                },
                Err(e) => {
                    warn!(error = %e, "failed to save preferences");
                    Response::PrefsFailed {
                        enabled: prefs.enabled(),
                        error: e.to_string(),
                    }
                }
            },
            Request::Annotate { id, text } => {
                if is_stale(generation) {
                    debug!(id, "dropping superseded request");
                    continue;
                }
                let response = annotate(&engine, &prefs, id, &text);
                if is_stale(generation) {
                    debug!(id, "dropping superseded result");
                    continue;
                }
                response
            }
        };
        if tx.send(response).is_err() {
            break;
        }
    }
    debug!("annotation worker stopped");
}

fn annotate(engine: &FuriganaEngine, prefs: &PrefsStore, id: u64, text: &str) -> Response {
    if !prefs.enabled() {
        return Response::Skipped {
            id,
            reason: SkipReason::Disabled,
        };
    }
    match engine.annotate_text(text) {
        Ok(Annotation::Markup(markup)) => Response::Annotated { id, markup },
        Ok(Annotation::NoKanji) => Response::Skipped {
            id,
            reason: SkipReason::NoKanji,
        },
        Err(e) => {
            warn!(id, error = %e, "annotation failed");
            Response::Failed {
                id,
                error: e.to_string(),
            }
        }
    }
}
