use crate::app::persistence::Density;
use crate::app::ui::BoardRegion;
use crate::board::LaneBoard;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

/// One lane board laid out as columns of cards.
pub struct BoardView<'a> {
    pub board: &'a LaneBoard,
    pub region: &'a BoardRegion,
    pub theme: &'a Theme,
    pub density: Density,
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let dragging = self.board.dragged_card().is_some();

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!(" {} ", self.board.config().name.to_uppercase()), theme.board_title),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if dragging {
                theme.border_focus
            } else {
                theme.border
            });
        block.render(area, buf);

        for lane_region in &self.region.lanes {
            let hovered = lane_region.lane.is_some_and(|l| self.board.is_hovered(l));
            let (title, count) = match lane_region.lane.and_then(|l| self.board.lanes().get(l)) {
                Some(lane) => (lane.title(), lane.cards.len()),
                None => ("unsorted".to_string(), self.board.loose_cards().count()),
            };

            let mut lane_block = Block::default()
                .title(Line::from(vec![
                    Span::styled(format!(" {title} "), theme.lane_title),
                    Span::styled(format!("{count} "), theme.dimmed),
                ]))
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(if hovered { theme.lane_hover } else { theme.border });
            if lane_region.hidden_above > 0 {
                lane_block = lane_block.title(
                    Line::from(Span::styled(format!(" ↑{} ", lane_region.hidden_above), theme.dimmed))
                        .right_aligned(),
                );
            }
            if lane_region.hidden_below > 0 {
                lane_block = lane_block.title_bottom(Span::styled(
                    format!(" +{} more ", lane_region.hidden_below),
                    theme.dimmed,
                ));
            }
            if hovered {
                lane_block = lane_block.style(theme.lane_hover);
            }
            lane_block.render(lane_region.area, buf);

            for (card_index, rect) in &lane_region.cards {
                let Some(card) = self.board.cards().get(*card_index) else {
                    continue;
                };
                let is_dragged = self.board.dragged_card() == Some(*card_index);
                let (style, marker) = if is_dragged {
                    (theme.card_dragging, glyphs::DRAG)
                } else {
                    (theme.card, glyphs::CARD)
                };

                buf.set_style(*rect, style);
                let title = Line::from(vec![
                    Span::styled(marker, theme.border_focus.patch(style)),
                    Span::styled(format!(" {}", card.title), style),
                ]);
                buf.set_line(rect.x, rect.y, &title, rect.width);

                if self.density == Density::Calm && rect.height > 1 {
                    let meta = match &card.id {
                        Some(id) => format!("  #{id}"),
                        None => "  not movable".to_string(),
                    };
                    buf.set_string(rect.x, rect.y + 1, meta, theme.card_meta);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AppState, PageView};
    use crate::app::ui::board_regions;
    use crate::domain::page::PageBuilder;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_renders_lanes_and_cards() {
        let mut b = PageBuilder::new("/");
        b.open("section", &[("data-board", "scheduler")]);
        b.open("div", &[("data-service-stage", "awaiting_parts")]);
        b.leaf("article", &[("data-service-id", "9")], "Boiler check");
        b.close();
        b.close();
        let mut state = AppState::default();
        state.page = Some(PageView::build(b.finish(), &state.board_configs));

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                let regions = board_regions(&state, f.area());
                let page = state.page.as_ref().unwrap();
                f.render_widget(
                    BoardView {
                        board: &page.boards[0],
                        region: &regions[0],
                        theme: &state.theme,
                        density: Density::Calm,
                    },
                    regions[0].area,
                );
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("SCHEDULER"));
        assert!(text.contains("awaiting parts"));
        assert!(text.contains("Boiler check"));
        assert!(text.contains("#9"));
    }

    #[test]
    fn test_overflowing_lane_shows_more_marker() {
        let mut b = PageBuilder::new("/");
        b.open("section", &[("data-board", "tasks")]);
        b.open("div", &[("data-task-lane", "todo")]);
        for id in 1..=8 {
            let id = id.to_string();
            b.leaf("article", &[("data-task-id", id.as_str())], &format!("Task {id}"));
        }
        b.close();
        b.close();
        let mut state = AppState::default();
        state.page = Some(PageView::build(b.finish(), &state.board_configs));

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| {
                let regions = board_regions(&state, f.area());
                let page = state.page.as_ref().unwrap();
                f.render_widget(
                    BoardView {
                        board: &page.boards[0],
                        region: &regions[0],
                        theme: &state.theme,
                        density: Density::Calm,
                    },
                    regions[0].area,
                );
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Task 1"));
        assert!(!text.contains("Task 8"));
        assert!(text.contains("more"));
    }
}
