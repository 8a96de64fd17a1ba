//! Built-in example programs that can pre-fill the editor.

use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const ARITHMETIC: &str = "// Arithmetic operations\n2 + 3 * 4;\n10 - 5 / 2;\n(15 + 5) * 2;";

pub const VARIABLES: &str =
    "// Variable assignments\nx = 5;\ny = 10;\nprint x + y;\nz = (x + y) * 2;\nprint z;";

pub const EXPRESSIONS: &str =
    "// Complex expressions\na = 15;\nb = 3;\nprint (a + b) * (a - b);\nprint a * b + b * b;";

static BUILTIN: LazyLock<ExampleSet> = LazyLock::new(|| {
    ExampleSet::from_entries([
        ("arithmetic", ARITHMETIC),
        ("variables", VARIABLES),
        ("expressions", EXPRESSIONS),
    ])
});

/// Read-only mapping from example name to source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSet {
    entries: BTreeMap<&'static str, &'static str>,
}

impl ExampleSet {
    /// The process-wide set of built-in examples.
    pub fn builtin() -> &'static ExampleSet {
        &BUILTIN
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name).copied()
    }

    /// Example names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
