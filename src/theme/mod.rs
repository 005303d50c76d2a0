use crate::app::persistence::ThemeMode;
use ratatui::style::{Modifier, Style};

pub mod catppuccin;
pub mod glyphs;
pub mod palette;

pub use palette::{palette_for, tint, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,

    pub border: Style,
    pub border_focus: Style,
    pub base: Style,

    pub header_logo: Style,
    pub header_tenant: Style,
    pub header_location: Style,
    pub header_stats: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer: Style,

    pub palette_input: Style,
    pub group_label: Style,
    pub list_selected: Style,
    pub list_item: Style,
    pub list_subtitle: Style,
    pub skeleton: Style,
    pub unavailable: Style,

    pub board_title: Style,
    pub lane_title: Style,
    pub lane_hover: Style,
    pub card: Style,
    pub card_meta: Style,
    pub card_dragging: Style,

    pub feed_kind: Style,
    pub feed_text: Style,
    pub trigger: Style,

    pub panel_title: Style,
    pub panel_meta: Style,
    pub chip: Style,
    pub chip_due: Style,
    pub chip_blocked: Style,
    pub chip_risk: Style,

    pub toast: Style,
    pub toast_error: Style,
    pub status_error: Style,
    pub dimmed: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::from_palette(mode, palette_for(mode))
    }

    #[must_use]
    pub fn from_palette(mode: ThemeMode, p: &Palette) -> Self {
        Self {
            mode,

            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),
            base: Style::default().bg(p.base).fg(p.text),

            header_logo: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_tenant: Style::default()
                .bg(p.mauve)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_location: Style::default()
                .bg(p.surface1)
                .fg(p.text)
                .add_modifier(Modifier::BOLD),
            header_stats: Style::default().bg(p.surface0).fg(p.subtext1),
            header: Style::default().bg(p.mantle).fg(p.text),

            footer_segment_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.crust).fg(p.text),
            footer: Style::default().bg(p.crust).fg(p.subtext0),

            palette_input: Style::default().fg(p.text),
            group_label: Style::default()
                .fg(p.overlay1)
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(p.text),
            list_subtitle: Style::default().fg(p.subtext0).add_modifier(Modifier::DIM),
            skeleton: Style::default().fg(p.surface1),
            unavailable: Style::default().fg(p.red).add_modifier(Modifier::BOLD),

            board_title: Style::default()
                .bg(p.surface0)
                .fg(p.text)
                .add_modifier(Modifier::BOLD),
            lane_title: Style::default().fg(p.lavender).add_modifier(Modifier::BOLD),
            lane_hover: Style::default().bg(tint(p.teal, p.base, 0.2)).fg(p.teal),
            card: Style::default().bg(p.surface0).fg(p.text),
            card_meta: Style::default().bg(p.surface0).fg(p.overlay1),
            card_dragging: Style::default()
                .bg(p.surface0)
                .fg(p.overlay0)
                .add_modifier(Modifier::DIM | Modifier::ITALIC),

            feed_kind: Style::default().fg(p.peach).add_modifier(Modifier::BOLD),
            feed_text: Style::default().fg(p.subtext1),
            trigger: Style::default().fg(p.sapphire).add_modifier(Modifier::UNDERLINED),

            panel_title: Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            panel_meta: Style::default().fg(p.subtext0),
            chip: Style::default().bg(p.surface1).fg(p.text),
            chip_due: Style::default().bg(p.yellow).fg(p.crust),
            chip_blocked: Style::default().bg(p.red).fg(p.crust),
            chip_risk: Style::default().bg(p.peach).fg(p.crust),

            toast: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            toast_error: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default().fg(p.red).add_modifier(Modifier::BOLD),
            dimmed: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::Dark)
    }
}
