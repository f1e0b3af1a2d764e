use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Text being typed into the stepper's field, with a caret and selection.
///
/// Offsets are byte indices that always sit on grapheme boundaries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Where the selection started; equals `caret` when nothing is selected.
    anchor: usize,
    caret: usize,
}

/// find prev/next grapheme boundaries around a byte index
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the caret at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            anchor: end,
            caret: end,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Range<usize> {
        self.anchor.min(self.caret)..self.anchor.max(self.caret)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.caret
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.selection()]
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Self::with_text(text);
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.caret = self.text.len();
    }

    /// Replace the selection (or insert at the caret) with `text`.
    pub fn insert_text(&mut self, text: &str) {
        let range = self.selection();
        self.text.replace_range(range.clone(), text);
        let pos = range.start + text.len();
        self.anchor = pos;
        self.caret = pos;
    }

    pub fn delete_backward(&mut self) {
        if self.has_selection() {
            self.insert_text("");
            return;
        }
        let pos = self.caret;
        if pos > 0 {
            let prev = prev_grapheme_boundary(&self.text, pos);
            self.text.replace_range(prev..pos, "");
            self.anchor = prev;
            self.caret = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.has_selection() {
            self.insert_text("");
            return;
        }
        let pos = self.caret;
        if pos < self.text.len() {
            let next = next_grapheme_boundary(&self.text, pos);
            self.text.replace_range(pos..next, "");
        }
    }

    /// Move the caret by `delta` graphemes, optionally growing the selection.
    pub fn move_cursor(&mut self, delta: isize, extend_selection: bool) {
        let step = if delta < 0 {
            prev_grapheme_boundary
        } else {
            next_grapheme_boundary
        };
        let mut pos = self.caret;
        for _ in 0..delta.unsigned_abs() {
            let next = step(&self.text, pos);
            // stuck at either end
            if next == pos {
                break;
            }
            pos = next;
        }
        self.caret = pos;
        if !extend_selection {
            self.anchor = pos;
        }
    }
}
