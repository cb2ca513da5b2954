//! Session context
//!
//! The most recent generated documents and the UI translation cache. A `Session`
//! is an ordinary value handed to each kitchen action; [`SessionStore`] keeps it
//! between CLI invocations.

use crate::ui_text::UiText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

mod store;

pub use store::SessionStore;

/// Kinds of generated text kept in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentKind {
    Recipe,
    FoodPairing,
    ShoppingList,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Recipe,
        DocumentKind::FoodPairing,
        DocumentKind::ShoppingList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Recipe => "recipe",
            DocumentKind::FoodPairing => "food_pairing",
            DocumentKind::ShoppingList => "shopping_list",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translated UI labels for one target language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTranslation {
    pub language: String,
    /// Keyed by [`UiText::key`]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    documents: BTreeMap<DocumentKind, String>,
    translation: Option<UiTranslation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest document of this kind; blank text counts as absent.
    pub fn document(&self, kind: DocumentKind) -> Option<&str> {
        self.documents
            .get(&kind)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// Replace the document wholesale.
    pub fn store(&mut self, kind: DocumentKind, text: impl Into<String>) {
        self.documents.insert(kind, text.into());
    }

    pub fn clear(&mut self, kind: DocumentKind) -> Option<String> {
        self.documents.remove(&kind)
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocumentKind, &str)> {
        self.documents.iter().map(|(kind, text)| (*kind, text.as_str()))
    }

    pub fn translation(&self) -> Option<&UiTranslation> {
        self.translation.as_ref()
    }

    pub fn set_translation(&mut self, translation: UiTranslation) {
        self.translation = Some(translation);
    }

    pub fn clear_translation(&mut self) {
        self.translation = None;
    }

    /// Translated label when cached, English default otherwise.
    pub fn label(&self, text: UiText) -> &str {
        self.translation
            .as_ref()
            .and_then(|t| t.labels.get(text.key()))
            .map(String::as_str)
            .unwrap_or_else(|| text.default_text())
    }
}
