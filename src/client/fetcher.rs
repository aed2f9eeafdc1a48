//! Autocompletado con debounce.
//!
//! Cada pulsación reinicia una ventana de 100 ms; solo la última entrada de
//! la ventana se envía (debounce "trailing"). Cada pulsación incrementa
//! además un contador de generación: una respuesta cuya generación ya no es
//! la actual se descarta sin tocar el estado, de modo que una petición lenta
//! nunca pisa el resultado de una entrada más reciente.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::api::SuggestionSource;
use crate::client::scheduler::{schedule, TaskHandle};
use crate::models::Suggestion;
use crate::normalize::normalize;

pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// Lo que la vista observa: sugerencias actuales e indicador de carga.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    pub suggestions: Vec<Suggestion>,
    pub loading: bool,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    pending: Option<TaskHandle>,
    closed: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    state: watch::Sender<SuggestionState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a poisoned lock only means a panicking observer; the data is still plain
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_current(inner: &Inner, generation: u64) -> bool {
        !inner.closed && inner.generation == generation
    }

    fn begin(&self, generation: u64) -> bool {
        let inner = self.lock();
        if !Self::is_current(&inner, generation) {
            return false;
        }
        self.state.send_modify(|s| s.loading = true);
        true
    }

    fn publish(&self, generation: u64, suggestions: Vec<Suggestion>) {
        let inner = self.lock();
        if !Self::is_current(&inner, generation) {
            debug!(generation, current = inner.generation, "discarding stale suggestions");
            return;
        }
        self.state.send_replace(SuggestionState { suggestions, loading: false });
    }

    fn finish(&self, generation: u64) {
        let inner = self.lock();
        if Self::is_current(&inner, generation) {
            self.state.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
        }
    }
}

// Clears the loading flag on every exit path of a dispatch, abort included.
struct LoadingGuard {
    shared: Arc<Shared>,
    generation: u64,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.shared.finish(self.generation);
    }
}

pub struct SuggestionFetcher {
    source: Arc<dyn SuggestionSource>,
    delay: Duration,
    shared: Arc<Shared>,
}

impl SuggestionFetcher {
    pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
        Self::with_delay(source, DEBOUNCE)
    }

    pub fn with_delay(source: Arc<dyn SuggestionSource>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SuggestionState::default());
        SuggestionFetcher {
            source,
            delay,
            shared: Arc::new(Shared { inner: Mutex::new(Inner::default()), state }),
        }
    }

    /// Registra una pulsación. Entrada vacía (o solo espacios) limpia las
    /// sugerencias de inmediato, sin red y sin esperar la ventana.
    /// Requiere un runtime de tokio activo.
    pub fn on_input(&self, raw: &str) {
        let mut inner = self.shared.lock();
        if inner.closed {
            return;
        }
        inner.generation += 1;
        let generation = inner.generation;
        let previous = inner.pending.take();

        if raw.trim().is_empty() {
            self.shared.state.send_replace(SuggestionState::default());
        } else {
            let shared = Arc::clone(&self.shared);
            let source = Arc::clone(&self.source);
            let raw = raw.to_string();
            inner.pending = Some(schedule(self.delay, move || dispatch(shared, source, generation, raw)));
        }
        drop(inner);

        // cancel outside the lock: an aborted dispatch takes it again on drop
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// Equivalent to an empty keystroke.
    pub fn clear(&self) {
        self.on_input("");
    }

    pub fn snapshot(&self) -> SuggestionState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.shared.state.subscribe()
    }

    /// Desmontaje de la vista: cancela el debounce pendiente, deja
    /// `loading` en falso y cualquier respuesta posterior se ignora.
    /// Idempotente.
    pub fn shutdown(&self) {
        let mut inner = self.shared.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.generation += 1;
        let pending = inner.pending.take();
        // last state change: no dispatch will clear loading after this
        self.shared
            .state
            .send_if_modified(|s| std::mem::replace(&mut s.loading, false));
        drop(inner);

        if let Some(pending) = pending {
            pending.cancel();
        }
        debug!("suggestion fetcher shut down");
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }
}

impl Drop for SuggestionFetcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn dispatch(shared: Arc<Shared>, source: Arc<dyn SuggestionSource>, generation: u64, raw: String) {
    if !shared.begin(generation) {
        return;
    }
    let _loading = LoadingGuard { shared: Arc::clone(&shared), generation };

    let query = normalize(&raw);
    debug!(%query, generation, "requesting suggestions");
    let suggestions = match source.suggestions(&query).await {
        Ok(list) => list,
        Err(e) => {
            warn!(%query, error = %e, "suggestion request failed");
            Vec::new()
        }
    };
    shared.publish(generation, suggestions);
}
