//! Heuristic analyzer
//!
//! Advisory SEO and resource checks over the scanned document tree. Two
//! independent passes, each with a fixed rule order and no short-circuiting;
//! every run re-evaluates all rules against a fresh parse. Findings are
//! transient and carry no positions, just a severity and a message.

use crate::html::DocumentTree;

/// External script/stylesheet count above which a bundling hint is emitted.
const BUNDLING_THRESHOLD: usize = 2;

/// Severity of an advisory finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single advisory message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// Result of one analysis run: the structural/SEO findings and the
/// resource/performance findings, each in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub seo: Vec<Finding>,
    pub performance: Vec<Finding>,
}

impl AnalysisReport {
    /// All findings, SEO first, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.seo.iter().chain(self.performance.iter())
    }
}

/// Run both analysis passes against a parsed document.
pub fn analyze(tree: &DocumentTree) -> AnalysisReport {
    AnalysisReport {
        seo: run_seo_pass(tree),
        performance: run_performance_pass(tree),
    }
}

/// Structural/SEO pass. Rule order is fixed: title, meta description, H1,
/// then one warning per image lacking alt text.
fn run_seo_pass(tree: &DocumentTree) -> Vec<Finding> {
    let mut findings = Vec::new();

    if tree.title().is_none_or(|t| t.trim().is_empty()) {
        findings.push(Finding::error("Missing title tag."));
    }

    let has_description = tree
        .elements_named("meta")
        .any(|e| e.attr("name").is_some_and(|n| n.eq_ignore_ascii_case("description")));
    if !has_description {
        findings.push(Finding::warning("Missing meta description."));
    }

    if !tree.has_element("h1") {
        findings.push(Finding::warning("Missing H1 tag."));
    }

    for _ in tree.elements_named("img").filter(|e| !e.has_attr("alt")) {
        findings.push(Finding::warning("Image missing alt attribute."));
    }

    findings
}

/// Resource/performance pass: bundling hints for external scripts and
/// stylesheets, then the unconditional element count.
fn run_performance_pass(tree: &DocumentTree) -> Vec<Finding> {
    let mut findings = Vec::new();

    let scripts = tree.count_matching(|e| e.name == "script" && e.has_attr("src"));
    if scripts > BUNDLING_THRESHOLD {
        findings.push(Finding::info(format!(
            "{} external scripts. Consider bundling.",
            scripts
        )));
    }

    let stylesheets = tree.count_matching(|e| {
        e.name == "link" && e.attr("rel").is_some_and(|r| r.eq_ignore_ascii_case("stylesheet"))
    });
    if stylesheets > BUNDLING_THRESHOLD {
        findings.push(Finding::info(format!(
            "{} external stylesheets. Consider bundling.",
            stylesheets
        )));
    }

    findings.push(Finding::info(format!(
        "Total elements: {}",
        tree.element_count()
    )));

    findings
}
