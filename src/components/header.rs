use crate::app::state::{AppState, PageStatus};
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        // Segment background colors for separator transitions
        let logo_bg = theme.header_logo.bg.unwrap_or(Color::Reset);
        let tenant_bg = theme.header_tenant.bg.unwrap_or(Color::Reset);
        let location_bg = theme.header_location.bg.unwrap_or(Color::Reset);
        let stats_bg = theme.header_stats.bg.unwrap_or(Color::Reset);
        let base_bg = theme.header.bg.unwrap_or(Color::Reset);

        let tenant = if state.tenant_id.is_empty() {
            " no tenant ".to_string()
        } else {
            format!(" tenant {} ", state.tenant_id)
        };

        let title = state
            .page
            .as_ref()
            .map(|p| p.document.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(state.location.as_str());

        let status = match &state.page_status {
            PageStatus::Loading => " loading… ".to_string(),
            PageStatus::Ready => {
                let boards = state.page.as_ref().map_or(0, |p| p.boards.len());
                format!(" {boards} boards ")
            }
            PageStatus::Failed(_) => " load failed ".to_string(),
        };
        let status_style = if matches!(state.page_status, PageStatus::Failed(_)) {
            theme.status_error
        } else {
            theme.header_stats
        };

        let spans = vec![
            Span::styled(format!(" {} OPSDECK ", glyphs::LOGO), theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(logo_bg).bg(tenant_bg)),
            Span::styled(tenant, theme.header_tenant),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(tenant_bg).bg(location_bg)),
            Span::styled(format!(" {title} "), theme.header_location),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(location_bg).bg(stats_bg)),
            Span::styled(status, status_style),
            Span::styled(glyphs::SEP_RIGHT, Style::default().fg(stats_bg).bg(base_bg)),
            Span::styled(" ".repeat(area.width as usize), theme.header),
        ];

        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);
    }
}
