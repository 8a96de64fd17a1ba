//! Append-only output log and the renderer seam it draws through.
//!
//! Invariant: entries are only ever appended or cleared wholesale; every
//! mutation is forwarded to the injected [`LogRenderer`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Success,
    Error,
}

impl OutputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    pub text: String,
    pub kind: OutputKind,
}

impl OutputEntry {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: OutputKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: OutputKind::Error,
        }
    }
}

/// Rendering target for log mutations (terminal, GUI widget, test capture).
pub trait LogRenderer: Send {
    fn append(&mut self, entry: &OutputEntry);
    fn clear(&mut self);
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl LogRenderer for NullRenderer {
    fn append(&mut self, _entry: &OutputEntry) {}

    fn clear(&mut self) {}
}

pub struct OutputLog {
    entries: Vec<OutputEntry>,
    renderer: Box<dyn LogRenderer>,
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::new(Box::new(NullRenderer))
    }
}

impl std::fmt::Debug for OutputLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputLog")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl OutputLog {
    pub fn new(renderer: Box<dyn LogRenderer>) -> Self {
        Self {
            entries: Vec::new(),
            renderer,
        }
    }

    pub fn append(&mut self, entry: OutputEntry) {
        self.renderer.append(&entry);
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.renderer.clear();
    }

    /// Entries in insertion order; the newest is last.
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
