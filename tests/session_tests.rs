//! Integration tests for session persistence and share fragments.

use codepad::document::{DocumentState, FileType, Theme};
use codepad::session::{self, SessionStore};

#[test]
fn save_then_fresh_load_reproduces_state() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("session.json");

    let doc = DocumentState::new(
        "## notes\n\nsome *markdown*\n".into(),
        FileType::Markdown,
        Theme::Light,
    );
    SessionStore::at(&path).save(&doc).expect("save session");

    // A fresh store over the same file simulates a fresh launch
    let reloaded = SessionStore::at(&path).load().expect("load session");
    assert_eq!(reloaded.content, doc.content);
    assert_eq!(reloaded.file_type, doc.file_type);
    assert_eq!(reloaded.theme, doc.theme);
}

#[test]
fn share_round_trip_preserves_content_and_type() {
    let doc = DocumentState::new(
        "{\"unicode\": \"héllo ✓\"}".into(),
        FileType::Json,
        Theme::Dark,
    );

    let fragment = session::encode_fragment(&doc);
    let decoded = session::decode_fragment(&fragment).expect("decode fragment");

    assert_eq!(decoded.content, doc.content);
    assert_eq!(decoded.file_type, FileType::Json);
}

#[test]
fn corrupted_fragment_falls_back_to_store_without_panicking() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SessionStore::at(dir.path().join("session.json"));

    let saved = DocumentState::new("stored content".into(), FileType::Css, Theme::Light);
    store.save(&saved).expect("save session");

    // Truncate a real fragment so it no longer decodes
    let mut fragment = session::encode_fragment(&saved);
    fragment.truncate(fragment.len() / 2);
    fragment.push_str("!!!");

    let doc = session::load_initial(Some(&fragment), &store);
    assert_eq!(doc.content, "stored content");
    assert_eq!(doc.file_type, FileType::Css);
}

#[test]
fn precedence_is_fragment_then_store_then_sample() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SessionStore::at(dir.path().join("session.json"));

    // Nothing saved, no fragment: sample
    assert_eq!(session::load_initial(None, &store), DocumentState::sample());

    // Store only
    let saved = DocumentState::new("from store".into(), FileType::Plain, Theme::Dark);
    store.save(&saved).expect("save session");
    assert_eq!(session::load_initial(None, &store).content, "from store");

    // Fragment wins over store
    let shared = DocumentState::new("from fragment".into(), FileType::Html, Theme::Dark);
    let fragment = session::encode_fragment(&shared);
    assert_eq!(
        session::load_initial(Some(&fragment), &store).content,
        "from fragment"
    );
}

#[test]
fn saving_overwrites_previous_session() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = SessionStore::at(dir.path().join("session.json"));

    store
        .save(&DocumentState::new("one".into(), FileType::Html, Theme::Dark))
        .expect("first save");
    store
        .save(&DocumentState::new("two".into(), FileType::Css, Theme::Light))
        .expect("second save");

    let loaded = store.load().expect("load session");
    assert_eq!(loaded.content, "two");
    assert_eq!(loaded.file_type, FileType::Css);
    assert_eq!(loaded.theme, Theme::Light);
}
