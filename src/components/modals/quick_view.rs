use crate::app::state::QuickViewState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Client side panel.
pub struct QuickViewPanel<'a> {
    pub state: &'a QuickViewState,
    pub theme: &'a Theme,
    pub easy_mode: bool,
}

impl Widget for QuickViewPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Clear.render(area, buf);

        let theme = self.theme;
        let mut hint = vec![
            Span::raw(" "),
            Span::styled("o", theme.footer_segment_key),
            Span::raw(" client "),
            Span::styled("p", theme.footer_segment_key),
            Span::raw(" projects "),
            Span::styled("x", theme.footer_segment_key),
            Span::raw(" close "),
        ];
        if self.easy_mode {
            hint.push(Span::styled("click outside to close ", theme.dimmed));
        }
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.state.title.clone(), theme.panel_title),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(hint))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focus)
            .style(theme.base);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

impl QuickViewPanel<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        let theme = self.theme;
        let state = self.state;
        let mut lines = Vec::new();

        if !state.meta.is_empty() {
            lines.push(Line::from(Span::styled(state.meta.clone(), theme.panel_meta)));
        }
        lines.push(Line::from(state.details_text().to_string()));
        lines.push(Line::from(""));

        lines.push(heading("Contacts", theme));
        if state.contacts.is_empty() {
            lines.push(subtle("No contact records yet. Add from CRM.", theme));
        } else {
            lines.extend(state.contacts.iter().map(|c| Line::from(format!("  {c}"))));
        }

        if state.loading {
            lines.push(Line::from(""));
            lines.push(subtle("Loading…", theme));
            return lines;
        }

        let data = state.data.clone().unwrap_or_default();
        let mut reach = Vec::new();
        if let Some(phone) = data.phone.as_deref().filter(|p| !p.is_empty()) {
            reach.push(Span::styled(format!(" Call {phone} "), theme.chip));
            reach.push(Span::raw(" "));
        }
        if let Some(email) = data.email.as_deref().filter(|e| !e.is_empty()) {
            reach.push(Span::styled(format!(" Email {email} "), theme.chip));
        }
        if reach.is_empty() {
            lines.push(subtle("Add contact info", theme));
        } else {
            lines.push(Line::from(reach));
        }
        lines.push(Line::from(""));

        lines.push(heading("Quick actions", theme));
        if data.has_tracked_actions() {
            lines.push(chip_row("Approvals pending", data.approvals, theme.chip_due));
            lines.push(chip_row("Blocked runs", data.blocked, theme.chip_blocked));
            lines.push(chip_row("Due tasks", data.due, theme.chip_risk));
        } else {
            lines.push(subtle("No tracked actions yet.", theme));
        }

        if let Some(score) = data.risk_score {
            lines.push(Line::from(""));
            lines.push(heading("Client health", theme));
            let level = data.risk_level.clone().unwrap_or_else(|| "—".to_string());
            lines.push(subtle(
                &format!("Risk: {level} ({score}) · MRR: {}", data.mrr_label()),
                theme,
            ));
        }
        if let Some(drivers) = data.drivers.as_ref().filter(|d| !d.is_empty()) {
            lines.extend(drivers.iter().map(|d| Line::from(format!("  • {d}"))));
        }
        lines
    }
}

fn heading(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text, theme.lane_title))
}

fn subtle(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme.dimmed))
}

fn chip_row(label: &'static str, value: Option<i64>, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {label:<20}")),
        Span::styled(format!(" {} ", value.unwrap_or(0)), style),
    ])
}
