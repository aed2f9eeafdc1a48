//! Tareas diferidas cancelables.
//!
//! `schedule(delay, f)` lanza `f` tras `delay` en el runtime de tokio y
//! devuelve un `TaskHandle`; `cancel()` aborta la espera y, si ya empezó,
//! el trabajo en curso.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

#[derive(Debug)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Must be called from inside a tokio runtime.
pub fn schedule<F, Fut>(delay: Duration, task: F) -> TaskHandle
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task().await;
    });
    TaskHandle { abort: handle.abort_handle() }
}
