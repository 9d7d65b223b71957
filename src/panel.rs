//! Dashboard CRUD panels.
//!
//! A [`Panel`] owns one collection's list plus its busy flags. Every method
//! takes `&self`; state lives behind a mutex that is never held across an
//! await, so a UI can read the flags while a call is in flight and a second
//! trigger of the same action is refused instead of racing. Deletes are
//! tracked per id: different rows may be deleted at once, the same row may not.

use crate::api::{resources, ApiClient, ApiError, Media, Resource, Services};
use crate::config::Config;
use crate::forms::{CreateForm, MediaForm, ServiceForm};
use crate::notify::Notifications;
use crate::record::Record;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;

/// Resources the dashboard can create.
pub trait Creatable: Resource {
    type Form: CreateForm + Send;

    fn file_limit(config: &Config) -> u64;
}

impl Creatable for Services {
    type Form = ServiceForm;

    fn file_limit(config: &Config) -> u64 {
        config.file_limit_bytes()
    }
}

impl Creatable for Media {
    type Form = MediaForm;

    fn file_limit(config: &Config) -> u64 {
        config.media_limit_bytes()
    }
}

#[derive(Debug, Default)]
struct PanelState {
    items: Vec<Record>,
    loading: bool,
    adding: bool,
    deleting: HashSet<String>,
    pending_delete: Option<Record>,
}

pub struct Panel<R: Resource> {
    client: ApiClient,
    config: Arc<Config>,
    notices: Notifications,
    state: Mutex<PanelState>,
    progress: Arc<watch::Sender<u8>>,
    _resource: PhantomData<fn() -> R>,
}

/// Clears a busy flag when dropped, including when the owning future is cancelled.
struct BusyGuard<'a> {
    state: &'a Mutex<PanelState>,
    release: Option<Box<dyn FnOnce(&mut PanelState) + Send + 'a>>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&mut lock(self.state));
        }
    }
}

fn lock(state: &Mutex<PanelState>) -> MutexGuard<'_, PanelState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

impl<R: Resource> Panel<R> {
    pub fn new(client: ApiClient, config: Arc<Config>, notices: Notifications) -> Self {
        let (progress, _) = watch::channel(0u8);
        Self {
            client,
            config,
            notices,
            state: Mutex::new(PanelState::default()),
            progress: Arc::new(progress),
            _resource: PhantomData,
        }
    }

    pub fn items(&self) -> Vec<Record> {
        lock(&self.state).items.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).items.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<Record> {
        lock(&self.state)
            .items
            .iter()
            .find(|r| r.id().as_deref() == Some(id))
            .cloned()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn is_adding(&self) -> bool {
        lock(&self.state).adding
    }

    /// Whether a delete call for `id` is in flight.
    pub fn is_deleting(&self, id: &str) -> bool {
        lock(&self.state).deleting.contains(id)
    }

    /// Ids whose delete calls are in flight, sorted.
    pub fn deleting_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = lock(&self.state).deleting.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Record awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<Record> {
        lock(&self.state).pending_delete.clone()
    }

    /// Upload progress of the current create, 0..=100.
    pub fn upload_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    /// Drop everything held for the signed-out user.
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        state.items.clear();
        state.pending_delete = None;
    }

    fn mark<'a>(
        &'a self,
        set: impl FnOnce(&mut PanelState) -> bool,
        release: impl FnOnce(&mut PanelState) + Send + 'a,
    ) -> Option<BusyGuard<'a>> {
        if set(&mut lock(&self.state)) {
            Some(BusyGuard {
                state: &self.state,
                release: Some(Box::new(release)),
            })
        } else {
            None
        }
    }

    /// Reload the list. On failure the previous list is kept.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let _busy = self
            .mark(
                |s| !std::mem::replace(&mut s.loading, true),
                |s| s.loading = false,
            )
            .ok_or(ApiError::Busy("Refresh"))?;

        match resources::list::<R>(&self.client).await {
            Ok(items) => {
                let count = items.len();
                lock(&self.state).items = items;
                Ok(count)
            }
            Err(e) => {
                self.notices.error(e.user_message(R::MESSAGES.load_failed));
                Err(e)
            }
        }
    }

    /// Open the delete confirmation for `id`.
    ///
    /// Returns `false` when the id is unknown or its delete is already running.
    pub fn request_delete(&self, id: &str) -> bool {
        let record = match self.find(id) {
            Some(record) => record,
            None => return false,
        };

        let mut state = lock(&self.state);
        if state.deleting.contains(id) {
            return false;
        }
        state.pending_delete = Some(record);
        true
    }

    pub fn cancel_delete(&self) {
        lock(&self.state).pending_delete = None;
    }

    /// Delete the record awaiting confirmation.
    ///
    /// The confirmation closes only on success; a failed delete can be
    /// confirmed again.
    pub async fn confirm_delete(&self) -> Result<(), ApiError> {
        let id = match self.pending_delete().and_then(|r| r.id()) {
            Some(id) => id,
            None => {
                self.cancel_delete();
                return Ok(());
            }
        };
        self.delete(&id).await
    }

    /// Delete `id`, locking that id until the call completes.
    ///
    /// Other ids stay deletable meanwhile. A second delete of the same id is
    /// refused with [`ApiError::Busy`] and an error notice.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let owned = id.to_string();
        let _busy = match self.mark(|s| s.deleting.insert(id.to_string()), move |s| {
            s.deleting.remove(&owned);
        }) {
            Some(guard) => guard,
            None => {
                let err = ApiError::Busy("Delete");
                self.notices.error(err.to_string());
                return Err(err);
            }
        };

        match resources::delete::<R>(&self.client, id).await {
            Ok(()) => {
                let mut state = lock(&self.state);
                state.items.retain(|r| r.id().as_deref() != Some(id));
                state.pending_delete = None;
                drop(state);
                self.notices.success(R::MESSAGES.deleted);
                Ok(())
            }
            Err(e) => {
                self.notices.error(e.user_message(R::MESSAGES.delete_failed));
                Err(e)
            }
        }
    }
}

impl<R: Creatable> Panel<R> {
    /// Validate and submit `form`.
    ///
    /// On success the new record is prepended (or the list re-fetched when the
    /// server returned none) and the form is cleared. On failure the form is
    /// left as it was.
    pub async fn create(&self, form: &mut R::Form) -> Result<(), ApiError> {
        if let Err(e) = form.validate(R::file_limit(&self.config)) {
            self.notices.error(e.user_message(R::MESSAGES.create_failed));
            return Err(e);
        }

        let _busy = self
            .mark(
                |s| !std::mem::replace(&mut s.adding, true),
                |s| s.adding = false,
            )
            .ok_or(ApiError::Busy("Upload"))?;

        self.progress.send_replace(0);
        let result = match form.to_multipart(Arc::clone(&self.progress)) {
            Ok(multipart) => resources::create::<R>(&self.client, multipart).await,
            Err(e) => Err(e),
        };

        let created = match result {
            Ok(created) => created,
            Err(e) => {
                self.progress.send_replace(0);
                self.notices.error(e.user_message(R::MESSAGES.create_failed));
                return Err(e);
            }
        };

        self.notices
            .success(created.message.unwrap_or_else(|| R::MESSAGES.created.to_string()));
        form.clear();
        self.progress.send_replace(0);

        match created.record {
            Some(record) => lock(&self.state).items.insert(0, record),
            None => {
                debug!("Create response carried no {}, re-fetching", R::LABEL);
                drop(_busy);
                // A failed re-fetch is already reported; the create itself succeeded.
                let _ = self.refresh().await;
            }
        }
        Ok(())
    }
}
