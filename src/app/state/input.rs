use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use tui_textarea::{CursorMove, TextArea};

/// One-line query field backed by [`TextArea`].
///
/// `TextArea` is neither `Clone` nor `PartialEq`, which state snapshots
/// need, so those are implemented here over the visible text and cursor.
pub struct QueryField<'a> {
    area: TextArea<'a>,
}

impl<'a> QueryField<'a> {
    pub fn new(placeholder: &str) -> Self {
        let mut area = TextArea::default();
        area.set_placeholder_text(placeholder);
        area.set_cursor_line_style(Style::default());
        Self { area }
    }

    /// Field content, untrimmed.
    pub fn text(&self) -> String {
        self.area.lines().join("")
    }

    /// Cursor column in chars.
    pub fn cursor_col(&self) -> usize {
        self.area.cursor().1
    }

    /// Applies one key. Returns whether the text changed.
    ///
    /// Keys that would open a second line are swallowed.
    pub fn edit(&mut self, key: KeyEvent) -> bool {
        if breaks_line(&key) {
            return false;
        }
        let before = self.text();
        self.area.input(key);
        self.text() != before
    }

    pub fn set_text(&mut self, text: &str) {
        let placeholder = self.area.placeholder_text().to_string();
        *self = Self::new(&placeholder);
        self.area.insert_str(text);
    }
}

fn breaks_line(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => true,
        KeyCode::Char('m' | 'j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl Clone for QueryField<'_> {
    fn clone(&self) -> Self {
        let mut copy = Self::new(self.area.placeholder_text());
        copy.area.insert_str(self.text());
        let (row, col) = self.area.cursor();
        copy.area.move_cursor(CursorMove::Jump(row as u16, col as u16));
        copy
    }
}

impl std::fmt::Debug for QueryField<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryField")
            .field("text", &self.text())
            .field("cursor", &self.area.cursor())
            .finish()
    }
}

impl PartialEq for QueryField<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text() && self.area.cursor() == other.area.cursor()
    }
}

impl Widget for &QueryField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.area, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_reports_changes() {
        let mut field = QueryField::new("Search");
        assert!(field.edit(key(KeyCode::Char('a'))));
        assert!(!field.edit(key(KeyCode::Left)));
        assert!(field.edit(key(KeyCode::Char('b'))));
        assert_eq!(field.text(), "ba");
        assert_eq!(field.cursor_col(), 1);
    }

    #[test]
    fn test_stays_single_line() {
        let mut field = QueryField::new("Search");
        field.set_text("acme");
        assert!(!field.edit(key(KeyCode::Enter)));
        assert!(!field.edit(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL)));
        assert_eq!(field.text(), "acme");
    }

    #[test]
    fn test_clone_keeps_text_and_cursor() {
        let mut field = QueryField::new("Search");
        field.set_text("acme");
        field.edit(key(KeyCode::Left));
        assert_eq!(field.clone(), field);
    }
}
