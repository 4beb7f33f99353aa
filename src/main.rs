use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use codepad::analysis::{self, Severity};
use codepad::assist::AssistClient;
use codepad::config::{Config, GlobalArgs};
use codepad::document::{DocumentState, FileType, Theme, SAMPLE_HTML};
use codepad::html;
use codepad::render;
use codepad::session::{self, SessionStore};
use codepad::watch::{self, WatchOptions};

#[derive(Debug, Parser)]
#[command(name = "codepad")]
#[command(about = "File-backed code playground: live preview, analysis, AI assist")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Watch a file and keep the preview surface up to date
    Watch {
        /// File being edited
        file: PathBuf,

        /// Declared content type (defaults to the file extension, else html)
        #[arg(long)]
        file_type: Option<FileType>,

        /// Color theme carried in the saved session
        #[arg(long, default_value = "dark")]
        theme: Theme,

        /// Preview output file, fully rewritten on each render
        #[arg(long, default_value = "preview.html")]
        out: PathBuf,
    },

    /// Render a one-off preview
    Render {
        /// Source file; omitted means restore the last session
        file: Option<PathBuf>,

        #[arg(long)]
        file_type: Option<FileType>,

        /// Share fragment to render instead of a file or session
        #[arg(long)]
        fragment: Option<String>,

        /// Write here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Analyze a document and print advisory findings
    Analyze {
        file: Option<PathBuf>,

        #[arg(long)]
        fragment: Option<String>,
    },

    /// Rewrite a file using the remote AI endpoint
    Assist {
        /// Natural-language instruction for the model
        instruction: String,

        /// File whose content is sent along and replaced on success
        file: PathBuf,
    },

    /// Encode or decode shareable URL fragments
    #[command(subcommand)]
    Share(ShareCommand),

    /// Write the document to a file named by its type's extension
    Export {
        file: Option<PathBuf>,

        #[arg(long)]
        file_type: Option<FileType>,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print the built-in sample document
    Sample,
}

#[derive(Debug, Subcommand)]
enum ShareCommand {
    /// Print the fragment for a document
    Encode {
        file: Option<PathBuf>,

        #[arg(long)]
        file_type: Option<FileType>,
    },

    /// Decode a fragment and print its content
    Decode { fragment: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.global)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let store = session_store(&config)?;

    match cli.command {
        Command::Watch {
            file,
            file_type,
            theme,
            out,
        } => {
            let file_type = file_type
                .or_else(|| type_from_path(&file))
                .unwrap_or_default();
            let opts = WatchOptions {
                file,
                file_type,
                theme,
                out,
                debounce: config.debounce,
            };
            watch::watch(opts, store).await
        }

        Command::Render {
            file,
            file_type,
            fragment,
            out,
        } => {
            let doc = resolve_document(file.as_deref(), file_type, fragment.as_deref(), &store)?;
            let markup = render::render(&doc.content, doc.file_type);
            match out {
                Some(path) => fs::write(&path, markup)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{}", markup),
            }
            Ok(())
        }

        Command::Analyze { file, fragment } => {
            let doc = resolve_document(file.as_deref(), None, fragment.as_deref(), &store)?;
            let report = analysis::analyze(&html::parse(&doc.content));

            println!("SEO analysis:");
            for finding in &report.seo {
                println!("  {} {}", severity_badge(finding.severity), finding.message);
            }
            if report.seo.is_empty() {
                println!("  (no findings)");
            }

            println!("Performance:");
            for finding in &report.performance {
                println!("  {} {}", severity_badge(finding.severity), finding.message);
            }
            Ok(())
        }

        Command::Assist { instruction, file } => {
            if instruction.trim().is_empty() {
                bail!("Please enter a prompt for the AI.");
            }

            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let client = AssistClient::new(config.endpoint.clone(), config.api_key.clone())?;
            match client.generate(&instruction, &content).await {
                Ok(replacement) => {
                    fs::write(&file, &replacement)
                        .with_context(|| format!("Failed to write {}", file.display()))?;

                    let file_type = type_from_path(&file).unwrap_or_default();
                    let doc = DocumentState::new(replacement, file_type, Theme::default());
                    if let Err(err) = store.save(&doc) {
                        log::warn!("session save failed: {:#}", err);
                    }

                    log::info!("assist applied to {}", file.display());
                    Ok(())
                }
                Err(err) => {
                    // The file is left untouched; surface exactly one alert
                    log::error!("AI generation error: {}", err);
                    bail!("Failed to generate code: {}", err);
                }
            }
        }

        Command::Share(ShareCommand::Encode { file, file_type }) => {
            let doc = resolve_document(file.as_deref(), file_type, None, &store)?;
            println!("#{}", session::encode_fragment(&doc));
            Ok(())
        }

        Command::Share(ShareCommand::Decode { fragment }) => {
            let shared = session::decode_fragment(&fragment)?;
            eprintln!("file type: {}", shared.file_type);
            print!("{}", shared.content);
            Ok(())
        }

        Command::Export {
            file,
            file_type,
            out_dir,
        } => {
            let doc = resolve_document(file.as_deref(), file_type, None, &store)?;
            let path = out_dir.join(format!("document.{}", doc.file_type.extension()));
            fs::write(&path, &doc.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
            Ok(())
        }

        Command::Sample => {
            print!("{}", SAMPLE_HTML);
            Ok(())
        }
    }
}

fn session_store(config: &Config) -> Result<SessionStore> {
    match &config.session_file {
        Some(path) => Ok(SessionStore::at(path)),
        None => SessionStore::default_location(),
    }
}

fn type_from_path(path: &Path) -> Option<FileType> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(FileType::from_extension)
}

/// Resolve the document to operate on: an explicit file wins, otherwise the
/// fragment/session/sample precedence chain.
fn resolve_document(
    file: Option<&Path>,
    file_type: Option<FileType>,
    fragment: Option<&str>,
    store: &SessionStore,
) -> Result<DocumentState> {
    if let Some(file) = file {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_type = file_type
            .or_else(|| type_from_path(file))
            .unwrap_or_default();
        return Ok(DocumentState::new(content, file_type, Theme::default()));
    }

    let mut doc = session::load_initial(fragment, store);
    if let Some(file_type) = file_type {
        doc.file_type = file_type;
    }
    Ok(doc)
}

fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[error]",
        Severity::Warning => "[warning]",
        Severity::Info => "[info]",
    }
}
