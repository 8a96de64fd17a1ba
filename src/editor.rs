//! Editor session and the line-oriented editor widget behind it.

use crate::text::{expand_tabs, wrap_to_width};

/// Interface for editor widgets hosted by an [`EditorSession`].
pub trait EditorWidget: Send {
    /// Get the current text content.
    fn get_text(&self) -> String;

    /// Replace the text content wholesale.
    fn set_text(&mut self, text: &str);

    /// Render the content for display at `width` columns (optional).
    fn render(&mut self, _width: usize) -> Vec<String> {
        self.get_text().split('\n').map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub line_numbers: bool,
    pub line_wrapping: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            line_numbers: true,
            line_wrapping: true,
        }
    }
}

/// Plain-text editor widget that keeps the buffer as a single string.
///
/// Rendering is cached until the next mutation or width change.
#[derive(Debug, Default)]
pub struct LineEditor {
    text: String,
    options: EditorOptions,
    cached: Option<(usize, Vec<String>)>,
}

impl LineEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            text: String::new(),
            options,
            cached: None,
        }
    }

    pub fn options(&self) -> EditorOptions {
        self.options
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    pub fn is_dirty(&self) -> bool {
        self.cached.is_none()
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    fn render_uncached(&self, width: usize) -> Vec<String> {
        let line_count = self.line_count();
        let gutter_width = if self.options.line_numbers {
            line_count.to_string().len()
        } else {
            0
        };
        // "NN │ " prefix: digits, space, bar, space.
        let gutter_cols = if self.options.line_numbers {
            gutter_width + 3
        } else {
            0
        };
        let body_width = if self.options.line_wrapping {
            width.saturating_sub(gutter_cols)
        } else {
            0
        };

        let mut rows = Vec::with_capacity(line_count);
        for (index, line) in self.text.split('\n').enumerate() {
            let expanded = expand_tabs(line);
            for (row_index, row) in wrap_to_width(&expanded, body_width).into_iter().enumerate() {
                if !self.options.line_numbers {
                    rows.push(row);
                    continue;
                }

                let gutter = if row_index == 0 {
                    format!("{:>gutter_width$}", index + 1)
                } else {
                    " ".repeat(gutter_width)
                };
                rows.push(format!("{gutter} │ {row}"));
            }
        }
        rows
    }
}

impl EditorWidget for LineEditor {
    fn get_text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.invalidate();
    }

    fn render(&mut self, width: usize) -> Vec<String> {
        if let Some((cached_width, rows)) = &self.cached {
            if *cached_width == width {
                return rows.clone();
            }
        }

        let rows = self.render_uncached(width);
        self.cached = Some((width, rows.clone()));
        rows
    }
}

/// Owns one editor widget and the source text it holds.
pub struct EditorSession {
    widget: Box<dyn EditorWidget>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Box::new(LineEditor::new(EditorOptions::default())))
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("text", &self.widget.get_text())
            .finish()
    }
}

impl EditorSession {
    pub fn new(widget: Box<dyn EditorWidget>) -> Self {
        Self { widget }
    }

    pub fn get_text(&self) -> String {
        self.widget.get_text()
    }

    pub fn set_text(&mut self, text: &str) {
        tracing::trace!(bytes = text.len(), "editor buffer replaced");
        self.widget.set_text(text);
    }

    /// Appends one line to the end of the buffer.
    pub fn append_line(&mut self, line: &str) {
        let mut text = self.widget.get_text();
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
        self.widget.set_text(&text);
    }

    pub fn is_empty(&self) -> bool {
        self.widget.get_text().is_empty()
    }

    /// Renders the buffer listing, trimming trailing padding.
    pub fn render(&mut self, width: usize) -> Vec<String> {
        self.widget
            .render(width)
            .into_iter()
            .map(|row| row.trim_end().to_string())
            .collect()
    }
}
