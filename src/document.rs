//! Document model
//!
//! The playground edits exactly one document at a time. Its whole state is
//! three fields: the text, the declared file type, and the color theme.
//! Everything else (preview markup, findings) is derived per render and
//! never cached across cycles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared content type of the document.
///
/// This is a user-selected tag, not a detected language; rendering picks the
/// most permissive technique for the tag and performs no real compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Html,
    Css,
    Javascript,
    Markdown,
    Json,
    Plain,
}

impl FileType {
    /// Guess a file type from a path extension. This only seeds the
    /// selector; the declared type always wins.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(FileType::Html),
            "css" => Some(FileType::Css),
            "js" | "mjs" => Some(FileType::Javascript),
            "md" | "markdown" => Some(FileType::Markdown),
            "json" => Some(FileType::Json),
            "txt" => Some(FileType::Plain),
            _ => None,
        }
    }

    /// File extension used when exporting the document.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Html => "html",
            FileType::Css => "css",
            FileType::Javascript => "js",
            FileType::Markdown => "md",
            FileType::Json => "json",
            FileType::Plain => "txt",
        }
    }
}

impl Default for FileType {
    fn default() -> Self {
        FileType::Html
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Html => "html",
            FileType::Css => "css",
            FileType::Javascript => "javascript",
            FileType::Markdown => "markdown",
            FileType::Json => "json",
            FileType::Plain => "plain",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(FileType::Html),
            "css" => Ok(FileType::Css),
            "javascript" | "js" => Ok(FileType::Javascript),
            "markdown" | "md" => Ok(FileType::Markdown),
            "json" => Ok(FileType::Json),
            "plain" | "text" | "txt" => Ok(FileType::Plain),
            other => Err(format!("Unknown file type '{}'", other)),
        }
    }
}

/// Editor color theme. Persisted with the session; nothing in the render
/// pipeline depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}'", other)),
        }
    }
}

/// The currently open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    pub content: String,
    pub file_type: FileType,
    pub theme: Theme,
}

impl DocumentState {
    pub fn new(content: String, file_type: FileType, theme: Theme) -> Self {
        Self {
            content,
            file_type,
            theme,
        }
    }

    /// The built-in sample document shown on first launch.
    pub fn sample() -> Self {
        Self {
            content: SAMPLE_HTML.to_string(),
            file_type: FileType::Html,
            theme: Theme::default(),
        }
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::sample()
    }
}

/// Sample HTML page loaded when no saved session or share fragment exists.
pub const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sample Page</title>
    <style>
        body { font-family: sans-serif; line-height: 1.6; padding: 20px; }
        h1 { color: #333; }
    </style>
</head>
<body>
    <h1>Welcome to the Playground</h1>
    <p>This is a sample HTML document.</p>
    <ul>
        <li>Edit the file on the left.</li>
        <li>See the live preview on the right.</li>
    </ul>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_str() {
        assert_eq!("html".parse::<FileType>(), Ok(FileType::Html));
        assert_eq!("JS".parse::<FileType>(), Ok(FileType::Javascript));
        assert_eq!("md".parse::<FileType>(), Ok(FileType::Markdown));
        assert!("python".parse::<FileType>().is_err());
    }

    #[test]
    fn test_file_type_extension() {
        assert_eq!(FileType::Javascript.extension(), "js");
        assert_eq!(FileType::Plain.extension(), "txt");
    }

    #[test]
    fn test_sample_document_is_html() {
        let doc = DocumentState::sample();
        assert_eq!(doc.file_type, FileType::Html);
        assert!(doc.content.contains("<title>Sample Page</title>"));
    }
}
