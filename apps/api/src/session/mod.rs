//! Editing sessions.
//!
//! A [`Session`] bundles one document store, the style selection, the wizard
//! and the most recent preview. Every mutation re-renders the preview before it
//! returns, so readers always see a preview that matches the document.

pub mod handlers;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, UnknownName};
use crate::models::style::{StyleSelection, StyleUpdate};
use crate::render::{render_preview, Preview};
use crate::store::ResumeStore;
use crate::wizard::{Transition, Wizard, WizardView};

// ────────────────────────────────────────────────────────────────────────────
// Export flag
// ────────────────────────────────────────────────────────────────────────────

/// Held while a PDF export for one session is in flight. Dropping it clears
/// the flag, whether the export succeeded, failed or panicked.
#[derive(Debug)]
pub struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl ExportGuard {
    /// Returns `None` when another export already holds the flag.
    pub fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard { flag: flag.clone() })
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    store: ResumeStore,
    style: StyleSelection,
    wizard: Wizard,
    preview: Preview,
    exporting: Arc<AtomicBool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: u64,
    pub document: ResumeDocument,
    pub style: StyleSelection,
    pub wizard: WizardView,
    pub exporting: bool,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        let store = ResumeStore::new();
        let style = StyleSelection::default();
        let preview = render_preview(store.document(), &style, store.revision());
        let now = Utc::now();
        Session {
            id,
            created_at: now,
            updated_at: now,
            wizard: Wizard::new(style.template),
            store,
            style,
            preview,
            exporting: Arc::new(AtomicBool::new(false)),
        }
    }

    #[cfg(test)]
    pub fn document(&self) -> &ResumeDocument {
        self.store.document()
    }

    pub fn style(&self) -> &StyleSelection {
        &self.style
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Runs a store mutation and re-renders when the document changed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut ResumeStore) -> R) -> R {
        let before = self.store.revision();
        let result = f(&mut self.store);
        if self.store.revision() != before {
            self.refresh();
        }
        result
    }

    /// Applies a partial style update. A template change also recomputes the
    /// wizard steps; document data is never touched.
    pub fn update_style(&mut self, update: StyleUpdate) -> Result<(), UnknownName> {
        let mut next = self.style;
        update.apply(&mut next)?;
        if next.template != self.style.template {
            info!(session = %self.id, from = %self.style.template, to = %next.template, "template switched");
            self.wizard.set_template(next.template);
        }
        self.style = next;
        self.refresh();
        Ok(())
    }

    pub fn wizard_next(&mut self) -> Transition {
        self.wizard.next(self.store.document())
    }

    pub fn wizard_back(&mut self) -> Transition {
        self.wizard.back()
    }

    pub fn wizard_jump(&mut self, step: usize) -> Transition {
        self.wizard.jump_to(step)
    }

    pub fn wizard_finish(&mut self) -> Transition {
        self.wizard.finish(self.store.document())
    }

    /// Claims the export flag. `None` while another export is running.
    pub fn begin_export(&self) -> Option<ExportGuard> {
        ExportGuard::acquire(&self.exporting)
    }

    /// Owned copy of everything the exporter needs.
    pub fn snapshot(&self) -> (ResumeDocument, StyleSelection) {
        (self.store.document().clone(), self.style)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            revision: self.store.revision(),
            document: self.store.document().clone(),
            style: self.style,
            wizard: self.wizard.view(),
            exporting: self.exporting.load(Ordering::Acquire),
        }
    }

    fn refresh(&mut self) {
        self.preview = render_preview(self.store.document(), &self.style, self.store.revision());
        self.updated_at = Utc::now();
        debug!(session = %self.id, revision = self.store.revision(), "preview refreshed");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session registry
// ────────────────────────────────────────────────────────────────────────────

/// All open sessions. Cloning shares the same map.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        SessionStore {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    pub async fn create(&self) -> Result<SessionView, AppError> {
        let mut sessions = self.inner.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::Capacity(format!(
                "At most {} editing sessions can be open at once",
                self.max_sessions
            )));
        }
        let id = Uuid::new_v4();
        let session = Session::new(id);
        let view = session.view();
        sessions.insert(id, session);
        info!(session = %id, open = sessions.len(), "session created");
        Ok(view)
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Result<R, AppError> {
        let sessions = self.inner.read().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        Ok(f(session))
    }

    pub async fn write<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        sessions.remove(&id).ok_or_else(|| not_found(id))?;
        info!(session = %id, open = sessions.len(), "session closed");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
