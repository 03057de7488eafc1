//! NoteBoard — the visible note list and the form actions that change it.
//!
//! Every store round trip returns a `Result`; the board decides what happens
//! to a failure through its [`ErrorPolicy`] instead of letting it reach the
//! page. A save reloads the list only after the store accepted the note.

use crate::note_client::{NoteClient, TransportError};
use crate::render::{ViewState, render};
use notes_types::{Note, NoteKey, ServerNote, ValidationError};
use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumString};
use tokio::task::JoinHandle;

/// What to do with a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ErrorDisposition {
    /// Write to the error log only
    #[default]
    Log,
    /// Log, and show a notice on the next rendered page
    Surface,
    /// Drop silently
    Ignore,
}

/// Dispositions for the write path (save, delete) and the read path (list, open)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub write: ErrorDisposition,
    pub read: ErrorDisposition,
}

#[derive(Debug, Clone, Copy)]
enum ErrorPath {
    Write,
    Read,
}

impl ErrorPath {
    fn label(self) -> &'static str {
        match self {
            Self::Write => "Error saving note",
            Self::Read => "Error fetching notes",
        }
    }
}

/// How a spawned save ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored, and the reload rendered this many notes
    Reloaded(usize),
    /// Stored, but the reload failed; the list is empty
    ReloadFailed,
    /// The store rejected or never received the note; no reload ran
    SaveFailed,
    /// The task panicked or was cancelled
    Aborted,
}

/// Handle on a save running in the background
pub struct SaveHandle {
    task: JoinHandle<SaveOutcome>,
}

impl SaveHandle {
    /// Wait for the save and its reload. Failures were already reported
    /// through the board's policy.
    pub async fn finished(self) -> SaveOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Save task did not complete: {}", e);
                SaveOutcome::Aborted
            }
        }
    }
}

#[derive(Clone)]
pub struct NoteBoard {
    client: Arc<NoteClient>,
    view: Arc<RwLock<ViewState>>,
    notices: Arc<Mutex<Vec<String>>>,
    policy: ErrorPolicy,
}

impl NoteBoard {
    pub fn new(client: NoteClient, policy: ErrorPolicy) -> Self {
        Self {
            client: Arc::new(client),
            view: Arc::new(RwLock::new(ViewState::default())),
            notices: Arc::new(Mutex::new(Vec::new())),
            policy,
        }
    }

    /// Snapshot of the visible list
    pub fn view(&self) -> ViewState {
        self.view.read().clone()
    }

    /// Drain notices queued by the `surface` disposition
    pub fn take_notices(&self) -> Vec<String> {
        std::mem::take(&mut *self.notices.lock())
    }

    /// Reload the list from the store.
    ///
    /// The list is cleared when this is called, before the returned future
    /// is polled. It is repopulated only if the fetch succeeds, so a failed
    /// reload leaves it empty. Concurrent reloads are not ordered: the last
    /// one to finish wins.
    pub fn load_notes(&self) -> impl Future<Output = Result<usize, TransportError>> + Send + use<> {
        self.view.write().clear();
        let board = self.clone();

        async move {
            match board.client.list_all().await {
                Ok(notes) => {
                    let view = render(&notes);
                    let count = view.len();
                    *board.view.write() = view;
                    Ok(count)
                }
                Err(e) => {
                    board.report(ErrorPath::Read, &e);
                    Err(e)
                }
            }
        }
    }

    /// Validate the form values and, if both are present, store the note in
    /// the background and reload the list once it is stored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn save_note(&self, title: &str, content: &str) -> Result<SaveHandle, ValidationError> {
        let note = Note::from_form(title, content)?;
        let board = self.clone();

        let task = tokio::spawn(async move {
            match board.client.create(&note).await {
                Ok(reply) => {
                    log::info!("Note saved successfully: {}", reply);
                    match board.load_notes().await {
                        Ok(count) => SaveOutcome::Reloaded(count),
                        Err(_) => SaveOutcome::ReloadFailed,
                    }
                }
                Err(e) => {
                    board.report(ErrorPath::Write, &e);
                    SaveOutcome::SaveFailed
                }
            }
        });

        Ok(SaveHandle { task })
    }

    /// Delete a note, then reload the list. Returns whether the store had it.
    pub async fn delete_note(&self, key: &NoteKey) -> Result<bool, TransportError> {
        let found = match self.client.delete(key).await {
            Ok(found) => found,
            Err(e) => {
                self.report(ErrorPath::Write, &e);
                return Err(e);
            }
        };

        if !found {
            log::warn!("Note {} ({}) was already gone", key.name, key.created_at);
        }

        self.load_notes().await?;
        Ok(found)
    }

    /// Fetch a single note for display
    pub async fn open_note(&self, key: &NoteKey) -> Result<Option<ServerNote>, TransportError> {
        self.client.get(key).await.inspect_err(|e| self.report(ErrorPath::Read, e))
    }

    fn report(&self, path: ErrorPath, err: &TransportError) {
        let disposition = match path {
            ErrorPath::Write => self.policy.write,
            ErrorPath::Read => self.policy.read,
        };

        match disposition {
            ErrorDisposition::Ignore => {}
            ErrorDisposition::Log => log::error!("{}: {}", path.label(), err),
            ErrorDisposition::Surface => {
                log::error!("{}: {}", path.label(), err);
                self.notices.lock().push(format!("{}: {}", path.label(), err));
            }
        }
    }
}
