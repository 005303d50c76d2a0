use crate::app::state::{
    palette::{UNAVAILABLE_HINT, UNAVAILABLE_TITLE},
    PaletteSession,
};
use crate::app::ui::{palette_layout, palette_lines, palette_scroll, PaletteLine};
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::draw_drop_shadow;

/// The search palette, centered over `area`.
pub struct PaletteModal<'a> {
    pub session: &'a PaletteSession<'a>,
    pub theme: &'a Theme,
}

impl Widget for PaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = palette_layout(area);
        let modal_area = layout.area;
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let title = if self.session.is_loading() {
            " SEARCHING… "
        } else {
            " SEARCH "
        };
        Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, self.theme.header_logo),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus)
            .render(modal_area, buf);

        // Query
        if layout.input.width > 3 {
            buf.set_string(
                layout.input.x,
                layout.input.y,
                format!(" {} ", glyphs::SEARCH),
                self.theme.footer_segment_key,
            );
            let field = Rect {
                x: layout.input.x + 3,
                width: layout.input.width - 3,
                ..layout.input
            };
            Widget::render(&self.session.input, field, buf);
        }

        // Separator
        let separator = "─".repeat(layout.separator.width as usize);
        buf.set_string(
            layout.separator.x,
            layout.separator.y,
            separator,
            self.theme.border_focus,
        );

        // Results
        let results = layout.results;
        let lines = palette_lines(self.session);
        let offset = palette_scroll(&lines, self.session.selected_index, results.height);
        for (row, line) in lines
            .iter()
            .skip(offset)
            .take(results.height as usize)
            .enumerate()
        {
            let y = results.y + row as u16;
            let rendered = self.line(line, results.width);
            buf.set_line(results.x, y, &rendered, results.width);
        }
    }
}

impl PaletteModal<'_> {
    fn line(&self, line: &PaletteLine<'_>, width: u16) -> Line<'static> {
        let theme = self.theme;
        match line {
            PaletteLine::Group(label) => {
                Line::from(Span::styled(format!(" {}", label.to_uppercase()), theme.group_label))
            }
            PaletteLine::Item { flat_index, item } => {
                let selected = *flat_index == self.session.selected_index;
                let (style, prefix) = if selected {
                    (theme.list_selected, format!(" {} ", glyphs::SELECTED))
                } else {
                    (theme.list_item, "   ".to_string())
                };
                let mut spans = vec![
                    Span::styled(prefix, style),
                    Span::styled(item.title.clone(), style),
                ];
                let used = 3 + item.title.chars().count();
                let subtitle = format!("  {}", item.subtitle);
                let pad = (width as usize).saturating_sub(used + subtitle.chars().count());
                spans.push(Span::styled(" ".repeat(pad), style));
                spans.push(Span::styled(subtitle, theme.list_subtitle.patch(style)));
                Line::from(spans)
            }
            PaletteLine::Skeleton => Line::from(Span::styled(
                format!("   {}", glyphs::SKELETON.repeat((width as usize).saturating_sub(6))),
                theme.skeleton,
            )),
            PaletteLine::Unavailable => Line::from(vec![
                Span::styled(format!("   {UNAVAILABLE_TITLE}  "), theme.unavailable),
                Span::styled(UNAVAILABLE_HINT, theme.list_subtitle),
            ]),
            PaletteLine::NoResults => {
                Line::from(Span::styled("   No results", theme.dimmed))
            }
        }
    }
}
