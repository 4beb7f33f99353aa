//! Debounced preview watch loop
//!
//! Watches the edited file and rewrites the preview surface after a quiet
//! period. The debounce has a single pending slot: an edit arriving during
//! the quiet period cancels and reschedules the render instead of stacking
//! timers. The first render happens immediately, before any edit.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::analysis::{self, Severity};
use crate::document::{DocumentState, FileType, Theme};
use crate::html;
use crate::render;
use crate::session::SessionStore;

/// What one watch session operates on.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// The file being edited.
    pub file: PathBuf,
    /// Declared content type of the file.
    pub file_type: FileType,
    /// Theme carried into the saved session.
    pub theme: Theme,
    /// Preview surface: fully rewritten on each render.
    pub out: PathBuf,
    /// Quiet period after the last edit.
    pub debounce: Duration,
}

/// Watch the file and re-render until the watcher channel closes.
pub async fn watch(opts: WatchOptions, store: SessionStore) -> Result<()> {
    // Immediate first render
    if let Err(err) = render_once(&opts, &store) {
        log::error!("initial render failed: {:#}", err);
    }

    let (tx, mut rx) = mpsc::unbounded_channel();

    let target = opts.file.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                    event.kind
                {
                    if event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == target.file_name())
                    {
                        let _ = tx.send(());
                    }
                }
            }
            Err(err) => {
                log::error!("file watcher error: {}", err);
            }
        },
        notify::Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    // Watch the parent directory: editors commonly replace the file on save,
    // which unregisters a watch on the file itself.
    let watch_dir = opts
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    watcher
        .watch(watch_dir, RecursiveMode::NonRecursive)?;

    log::info!(
        "watching {} -> {} ({} ms debounce)",
        opts.file.display(),
        opts.out.display(),
        opts.debounce.as_millis()
    );

    while rx.recv().await.is_some() {
        // Quiet period: every further edit cancels and reschedules
        loop {
            tokio::select! {
                _ = tokio::time::sleep(opts.debounce) => break,
                more = rx.recv() => {
                    if more.is_none() {
                        return Ok(());
                    }
                }
            }
        }

        if let Err(err) = render_once(&opts, &store) {
            // The file may be mid-save; the next event will retry
            log::error!("render failed: {:#}", err);
        }
    }

    Ok(())
}

/// One render cycle: read, render, write the preview, analyze, save session.
pub fn render_once(opts: &WatchOptions, store: &SessionStore) -> Result<()> {
    let content = fs::read_to_string(&opts.file)
        .with_context(|| format!("Failed to read {}", opts.file.display()))?;

    let markup = render::render(&content, opts.file_type);
    fs::write(&opts.out, &markup)
        .with_context(|| format!("Failed to write preview {}", opts.out.display()))?;

    let report = analysis::analyze(&html::parse(&content));
    for finding in report.iter() {
        match finding.severity {
            Severity::Error => log::error!("{}", finding.message),
            Severity::Warning => log::warn!("{}", finding.message),
            Severity::Info => log::info!("{}", finding.message),
        }
    }

    // Opportunistic save; losing it only costs the next launch's restore
    let doc = DocumentState::new(content, opts.file_type, opts.theme);
    if let Err(err) = store.save(&doc) {
        log::warn!("session save failed: {:#}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_once_writes_preview_and_session() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let file = dir.path().join("doc.md");
        fs::write(&file, "# Hi\n").expect("write source");

        let opts = WatchOptions {
            file: file.clone(),
            file_type: FileType::Markdown,
            theme: Theme::Dark,
            out: dir.path().join("preview.html"),
            debounce: Duration::from_millis(10),
        };
        let store = SessionStore::at(dir.path().join("session.json"));

        render_once(&opts, &store).expect("render once");

        let preview = fs::read_to_string(&opts.out).expect("read preview");
        assert!(preview.contains("<h1>Hi</h1>"));

        let saved = store.load().expect("load session");
        assert_eq!(saved.content, "# Hi\n");
        assert_eq!(saved.file_type, FileType::Markdown);
    }

    #[test]
    fn test_render_once_missing_file_is_err() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let opts = WatchOptions {
            file: dir.path().join("absent.html"),
            file_type: FileType::Html,
            theme: Theme::Dark,
            out: dir.path().join("preview.html"),
            debounce: Duration::from_millis(10),
        };
        let store = SessionStore::at(dir.path().join("session.json"));

        assert!(render_once(&opts, &store).is_err());
    }
}
