//! Thread-safe handle around one [`ClipController`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use crate::intents::{Intent, MediaSignal};
use crate::outputs::ClipOutputs;
use crate::snapshot::ClipSnapshot;
use crate::ClipController;

/// Cloneable handle; every call takes the single lock guarding both the
/// session and the reveal state.
#[derive(Clone)]
pub struct SharedClip {
    inner: Arc<Mutex<ClipController>>,
}

impl SharedClip {
    pub fn new(controller: ClipController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    // Poisoned locks are recovered; the controller is consistent between calls.
    fn lock(&self) -> MutexGuard<'_, ClipController> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut ClipController) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn dispatch(&self, intent: Intent) -> Result<()> {
        self.lock().dispatch(intent)
    }

    pub fn signal(&self, signal: MediaSignal) -> Result<()> {
        self.lock().signal(signal)
    }

    /// Advance by `dt` seconds and return a copy of the produced outputs.
    pub fn update(&self, dt: f32) -> ClipOutputs {
        self.lock().update(dt).clone()
    }

    pub fn snapshot(&self) -> ClipSnapshot {
        self.lock().snapshot()
    }
}
