//! Diagnostics collection for control flow graph construction.
//!
//! The builder is total over any well-formed translation unit: constructs it does
//! not model and statements that can never execute are reported here instead of
//! aborting the traversal. Only structural errors such as a `break` outside of a
//! loop are fatal (see [`crate::Error`]).
//!
//! The [`Diagnostics`] container uses `boxcar::Vec` for lock-free append
//! operations, so a single container can be shared by builders running on
//! several threads.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Thread-safe container for diagnostic entries
//! - [`Diagnostic`] - Individual diagnostic entry with severity and context
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning)
//! - [`DiagnosticCategory`] - Category of the diagnostic source
//!
//! # Usage Examples
//!
//! ```rust
//! use c_lang_ssa::diagnostics::{DiagnosticCategory, Diagnostics};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.warning(DiagnosticCategory::Traversal, "Unknown node FuncCall");
//!
//! for entry in diagnostics.iter() {
//!     println!("{entry}");
//! }
//! assert_eq!(diagnostics.warning_count(), 1);
//! ```

use std::fmt::{self, Write};

use strum::Display;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    ///
    /// Used for unreachable statements following a `return`, `break` or `continue`.
    Info,

    /// A construct the builder does not model.
    ///
    /// The node is kept verbatim in an opaque block and traversal continues.
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
        }
    }
}

/// Category indicating the source of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DiagnosticCategory {
    /// Issues found while dispatching AST nodes, e.g. node kinds without a handler.
    Traversal,

    /// Statements that no control flow path reaches.
    Reachability,
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Human-readable description of the issue.
    pub message: String,

    /// Optional AST node kind the diagnostic refers to.
    pub node: Option<&'static str>,

    /// Optional name of the function being built when the issue was found.
    pub function: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the diagnostic source
    /// * `message` - Human-readable description
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            node: None,
            function: None,
        }
    }

    /// Adds the AST node kind to the diagnostic.
    #[must_use]
    pub fn with_node(mut self, node: &'static str) -> Self {
        self.node = Some(node);
        self
    }

    /// Adds the enclosing function name to the diagnostic.
    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;

        if let Some(node) = self.node {
            write!(f, " (node: {node})")?;
        }

        if let Some(function) = &self.function {
            write!(f, " (in: {function})")?;
        }

        Ok(())
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds an informational diagnostic.
    ///
    /// # Arguments
    ///
    /// * `category` - Category of the diagnostic
    /// * `message` - Description of the observation
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Adds a warning diagnostic.
    ///
    /// # Arguments
    ///
    /// * `category` - Category of the diagnostic
    /// * `message` - Description of the issue
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
        ));
    }

    /// Adds a diagnostic entry directly.
    ///
    /// Use this for diagnostics that carry a node kind or function name.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count_severity(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Warning)
    }

    /// Returns the number of info-level diagnostics.
    pub fn info_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Info)
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} warning(s), {} info(s)",
            self.warning_count(),
            self.info_count()
        );

        for diag in self.iter() {
            let _ = writeln!(output, "  {diag}");
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
