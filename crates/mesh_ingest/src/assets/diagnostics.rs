//! Non-fatal parse diagnostics
//!
//! The OBJ and MTL parsers never abort on recoverable input problems. Each
//! one is recorded here and echoed through `log::warn!`, so callers can
//! either inspect the list or just read the log.

use std::fmt;

/// Which OBJ vertex table a face index points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// `v` table
    Position,
    /// `vt` table
    Texcoord,
    /// `vn` table
    Normal,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexKind::Position => "position",
            IndexKind::Texcoord => "texcoord",
            IndexKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// A recoverable problem found while parsing. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Keyword outside the recognized directive set; the line was skipped
    UnknownDirective {
        /// Source line
        line: usize,
        /// Raw keyword as written
        keyword: String,
    },
    /// A numeric field failed to parse or was missing; NaN was stored in its place
    MalformedNumber {
        /// Source line
        line: usize,
        /// Directive the field belongs to
        keyword: String,
        /// Offending text (empty when the field was missing)
        token: String,
    },
    /// A face index did not resolve to an existing table entry
    IndexOutOfRange {
        /// Source line
        line: usize,
        /// Table the index points into
        kind: IndexKind,
        /// Index as written in the face token
        index: String,
    },
    /// A face with fewer than three vertices; nothing was emitted
    DegenerateFace {
        /// Source line
        line: usize,
        /// Number of face-vertex tokens on the line
        vertex_count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownDirective { line, keyword } => {
                write!(f, "line {line}: unhandled keyword '{keyword}'")
            }
            Diagnostic::MalformedNumber { line, keyword, token } if token.is_empty() => {
                write!(f, "line {line}: {keyword} is missing a numeric field, using NaN")
            }
            Diagnostic::MalformedNumber { line, keyword, token } => {
                write!(f, "line {line}: {keyword} has non-numeric field '{token}', using NaN")
            }
            Diagnostic::IndexOutOfRange { line, kind, index } => {
                write!(f, "line {line}: {kind} index '{index}' does not resolve to an entry")
            }
            Diagnostic::DegenerateFace { line, vertex_count } => {
                write!(f, "line {line}: face has {vertex_count} vertices, need at least 3")
            }
        }
    }
}

/// Collects diagnostics for one parse call
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it as a warning
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Parse a float field, reporting and substituting NaN on failure
    pub fn parse_f32(&mut self, token: Option<&str>, line: usize, keyword: &str) -> f32 {
        match token.map(str::parse::<f32>) {
            Some(Ok(value)) => value,
            _ => {
                self.report(Diagnostic::MalformedNumber {
                    line,
                    keyword: keyword.to_string(),
                    token: token.unwrap_or_default().to_string(),
                });
                f32::NAN
            }
        }
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the sink, returning the diagnostics in report order
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
