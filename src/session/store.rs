//! Sled-backed session persistence.
//!
//! Layout: `document/<kind>` holds UTF-8 text, `ui/translation` holds the
//! translation cache as JSON.

use super::{DocumentKind, Session, UiTranslation};
use crate::error::StorageError;
use std::path::Path;
use tracing::debug;

const TRANSLATION_KEY: &str = "ui/translation";

fn document_key(kind: DocumentKind) -> String {
    format!("document/{}", kind.as_str())
}

pub struct SessionStore {
    db: sled::Db,
}

impl SessionStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Throwaway store for tests and dry runs.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    pub fn load(&self) -> Result<Session, StorageError> {
        let mut session = Session::new();

        for kind in DocumentKind::ALL {
            let key = document_key(kind);
            if let Some(bytes) = self.db.get(key.as_bytes())? {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| StorageError::Corrupt {
                    key: key.clone(),
                    message: e.to_string(),
                })?;
                session.store(kind, text);
            }
        }

        if let Some(bytes) = self.db.get(TRANSLATION_KEY)? {
            let translation: UiTranslation =
                serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
                    key: TRANSLATION_KEY.to_string(),
                    message: e.to_string(),
                })?;
            session.set_translation(translation);
        }

        debug!(documents = session.documents().count(), "Session loaded");
        Ok(session)
    }

    /// Persist the whole session, removing entries it no longer holds.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        for kind in DocumentKind::ALL {
            let key = document_key(kind);
            match session.documents().find(|(k, _)| *k == kind) {
                Some((_, text)) => {
                    self.db.insert(key.as_bytes(), text.as_bytes())?;
                }
                None => {
                    self.db.remove(key.as_bytes())?;
                }
            }
        }

        match session.translation() {
            Some(translation) => {
                let bytes = serde_json::to_vec(translation).map_err(|e| StorageError::Corrupt {
                    key: TRANSLATION_KEY.to_string(),
                    message: e.to_string(),
                })?;
                self.db.insert(TRANSLATION_KEY, bytes)?;
            }
            None => {
                self.db.remove(TRANSLATION_KEY)?;
            }
        }

        self.db.flush()?;
        Ok(())
    }
}
