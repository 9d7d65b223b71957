//! User-facing notifications (toasts).
//!
//! Every notice is also logged, so the CLI can simply print the queue
//! while library users drain it themselves. Long-lived callers should call
//! [`Notifications::drain`] after each action; past [`MAX_NOTICES`] the
//! oldest undrained notices are dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Undrained notices kept before the oldest are dropped.
pub const MAX_NOTICES: usize = 64;

/// Shared notification queue. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.push(Level::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.push(Level::Error, message);
    }

    fn push(&self, level: Level, message: String) {
        let mut queue = self.lock();
        if queue.len() == MAX_NOTICES {
            queue.pop_front();
        }
        queue.push_back(Notice { level, message });
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        self.lock().drain(..).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Notice>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}
