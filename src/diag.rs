//! Diagnostic sink threaded through rendering.
//!
//! Rendering code records warnings here instead of logging directly; the
//! driver flushes each page's sink in page order, which keeps log output
//! deterministic even when pages render in parallel.

use crate::model::Entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A link to a hidden entity was rendered as plain text.
    HiddenReference {
        kind: &'static str,
        name: String,
        namespace: String,
        from: String,
    },
}

impl Diagnostic {
    pub fn hidden_reference(target: &Entity, from: &Entity) -> Self {
        let header = target.header();
        Diagnostic::HiddenReference {
            kind: target.kind().as_str(),
            name: header.display_name().to_owned(),
            namespace: header.namespace_path.to_string(),
            from: from.header().qualified_name(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::HiddenReference {
                kind,
                name,
                namespace,
                from,
            } => write!(
                f,
                "reference to hidden {kind} `{name}` in namespace `{namespace}` from `{from}`"
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop entries recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Emit every entry as a warning, in recording order.
    pub fn flush(&mut self) {
        for diagnostic in self.entries.drain(..) {
            tracing::warn!("{diagnostic}");
        }
    }
}
