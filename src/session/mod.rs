//! Session persistence and sharing
//!
//! One durable JSON entry holding the open document, plus a base64 URL
//! fragment codec for shareable links. Load precedence: share fragment
//! (when given and decodable), then the stored session, then the built-in
//! sample. Decode failures fall through to the next source.

pub mod share;
pub mod store;

pub use share::{decode_fragment, encode_fragment};
pub use store::SessionStore;

use crate::document::DocumentState;

/// Resolve the initial document from the available sources.
///
/// A fragment that fails to decode is logged and skipped, never fatal.
pub fn load_initial(fragment: Option<&str>, store: &SessionStore) -> DocumentState {
    if let Some(fragment) = fragment {
        match decode_fragment(fragment) {
            Ok(shared) => {
                // Theme is not part of the share payload; keep the stored one
                let theme = store
                    .load()
                    .map(|doc| doc.theme)
                    .unwrap_or_default();
                return DocumentState::new(shared.content, shared.file_type, theme);
            }
            Err(err) => {
                log::debug!("share fragment undecodable, falling back: {}", err);
            }
        }
    }

    match store.load() {
        Some(doc) => doc,
        None => DocumentState::sample(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FileType, Theme};

    fn temp_store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SessionStore::at(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn test_load_initial_prefers_fragment() {
        let (_dir, store) = temp_store();
        store
            .save(&DocumentState::new(
                "stored".into(),
                FileType::Css,
                Theme::Light,
            ))
            .expect("save session");

        let shared = DocumentState::new("shared".into(), FileType::Markdown, Theme::Dark);
        let fragment = encode_fragment(&shared);

        let doc = load_initial(Some(&fragment), &store);
        assert_eq!(doc.content, "shared");
        assert_eq!(doc.file_type, FileType::Markdown);
        // Theme comes from the store, not the fragment
        assert_eq!(doc.theme, Theme::Light);
    }

    #[test]
    fn test_corrupt_fragment_falls_back_to_store() {
        let (_dir, store) = temp_store();
        store
            .save(&DocumentState::new(
                "stored".into(),
                FileType::Json,
                Theme::Dark,
            ))
            .expect("save session");

        let doc = load_initial(Some("#!!not-base64!!"), &store);
        assert_eq!(doc.content, "stored");
        assert_eq!(doc.file_type, FileType::Json);
    }

    #[test]
    fn test_empty_store_yields_sample() {
        let (_dir, store) = temp_store();
        let doc = load_initial(None, &store);
        assert_eq!(doc, DocumentState::sample());
    }
}
