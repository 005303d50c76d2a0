mod groups;
mod types;

use crate::app::state::AppState;
use crate::theme::Theme;
pub use types::FooterItem;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;
        let easy = state.preferences.easy_mode;

        let mut spans = vec![Span::styled(
            format!("  {}  ", state.preferences.density.label().to_uppercase()),
            theme.header_stats,
        )];
        spans.push(Span::raw(" "));

        let available_width = area.width.saturating_sub(4) as usize; // Margin
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for group in groups::get_groups(state) {
            let Some(first) = group.items.first() else {
                continue;
            };
            let describe = |item: &FooterItem| if easy { item.label } else { item.desc };
            if current_width + first.key.len() + describe(first).len() + 4 > available_width {
                break;
            }

            // Group names are labelled in Easy Mode, or when there is room
            if easy || area.width > 100 {
                let label = Span::styled(format!("{}: ", group.name), theme.dimmed);
                current_width += label.width();
                spans.push(label);
            }

            for item in &group.items {
                let key_str = format!(" {} ", item.key);
                let desc_str = format!(" {} ", describe(item));
                let item_width = key_str.len() + desc_str.len();
                if current_width + item_width + 1 > available_width {
                    break;
                }

                let (key_style, val_style) = if item.highlighted {
                    (theme.list_selected, theme.list_selected)
                } else {
                    (theme.footer_segment_key, theme.footer_segment_val)
                };
                spans.push(Span::styled(key_str, key_style));
                spans.push(Span::styled(desc_str, val_style));
                spans.push(Span::raw(" "));
                current_width += item_width + 1;
            }
            spans.push(Span::raw("  "));
            current_width += 2;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    Footer {
                        state,
                        theme: &state.theme,
                    },
                    f.area(),
                );
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_easy_mode_uses_long_labels() {
        let mut state = AppState::default();
        assert!(rendered(&state).contains(" theme "));

        state.preferences = state.preferences.with_easy_mode(true);
        let line = rendered(&state);
        assert!(line.contains("switch light/dark"));
        assert!(line.contains("GO: "));
    }

    #[test]
    fn test_palette_hints_replace_shortcuts() {
        let state = AppState {
            palette: Some(crate::app::state::PaletteSession::default()),
            ..AppState::default()
        };
        let line = rendered(&state);
        assert!(line.contains("Enter"));
        assert!(!line.contains("reload"));
    }
}
