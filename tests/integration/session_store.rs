//! Session persistence across store handles, as between CLI invocations.

use flavour_fusion::session::{DocumentKind, Session, SessionStore, UiTranslation};
use flavour_fusion::ui_text::UiText;
use tempfile::TempDir;

#[test]
fn test_empty_store_loads_empty_session() {
    let temp = TempDir::new().unwrap();
    let store = SessionStore::open(&temp.path().join("session")).unwrap();
    assert_eq!(store.load().unwrap(), Session::new());
}

#[test]
fn test_documents_and_translation_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("session");

    {
        let store = SessionStore::open(&path).unwrap();
        let mut session = store.load().unwrap();
        session.store(DocumentKind::Recipe, "Whisk eggs.\nFry gently.");
        session.store(DocumentKind::ShoppingList, "Eggs\nButter");
        let mut translation = UiTranslation {
            language: "Italian".to_string(),
            ..Default::default()
        };
        translation
            .labels
            .insert(UiText::ShoppingList.key().to_string(), "Lista della spesa".to_string());
        session.set_translation(translation);
        store.save(&session).unwrap();
    }

    let store = SessionStore::open(&path).unwrap();
    let session = store.load().unwrap();
    assert_eq!(
        session.document(DocumentKind::Recipe),
        Some("Whisk eggs.\nFry gently.")
    );
    assert_eq!(
        session.document(DocumentKind::ShoppingList),
        Some("Eggs\nButter")
    );
    assert_eq!(session.label(UiText::ShoppingList), "Lista della spesa");
}

#[test]
fn test_cleared_translation_is_removed() {
    let store = SessionStore::temporary().unwrap();
    let mut session = Session::new();
    session.set_translation(UiTranslation {
        language: "Dutch".to_string(),
        ..Default::default()
    });
    store.save(&session).unwrap();

    session.clear_translation();
    store.save(&session).unwrap();
    assert_eq!(store.load().unwrap().translation(), None);
}
