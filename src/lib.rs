//! codepad
//!
//! Engine for a file-backed code playground: a watched source file is
//! rendered into a live HTML preview, heuristically analyzed for SEO and
//! resource issues, and optionally rewritten by a remote AI endpoint.
//!
//! This library provides:
//! - Preview rendering per declared file type
//! - Light HTML scanning and advisory analysis
//! - AI-assisted content generation
//! - Session persistence and shareable URL fragments

pub mod analysis;
pub mod assist;
pub mod config;
pub mod document;
pub mod html;
pub mod render;
pub mod session;
pub mod watch;

// Re-exports for clean public API
pub use analysis::{analyze, AnalysisReport, Finding, Severity};
pub use assist::{AssistClient, AssistError};
pub use config::Config;
pub use document::{DocumentState, FileType, Theme};
pub use render::render;
pub use session::{decode_fragment, encode_fragment, SessionStore};
