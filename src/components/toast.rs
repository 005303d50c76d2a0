use crate::app::state::{Toast, ToastKind};
use crate::theme::Theme;

use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};

const MAX_WIDTH: u16 = 48;

/// Toasts stacked in the top-right corner, newest at the bottom.
pub struct ToastStack<'a> {
    pub toasts: &'a [Toast],
    pub theme: &'a Theme,
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = self.toasts.len().min(area.height as usize);
        let skip = self.toasts.len() - visible;
        for (row, toast) in self.toasts.iter().skip(skip).enumerate() {
            let style = match toast.kind {
                ToastKind::Info => self.theme.toast,
                ToastKind::Error => self.theme.toast_error,
            };
            let text = format!(" {} ", toast.message);
            let span = Span::styled(text, style);
            let width = (span.width() as u16).min(MAX_WIDTH).min(area.width);
            let x = area.right().saturating_sub(width + 1).max(area.x);
            buf.set_span(x, area.y + row as u16, &span, width);
        }
    }
}
