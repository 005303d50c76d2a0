use crate::app::persistence::Density;
use crate::app::state::{palette::SKELETON_ROWS, AppState, PageStatus, PaletteSession, SearchPhase};
use crate::components::board::BoardView;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::{
    helpers::{centered_rect, dim_area},
    palette::PaletteModal,
    quick_view::QuickViewPanel,
};
use crate::components::sidebar::Sidebar;
use crate::components::toast::ToastStack;
use crate::search::{PaletteRow, SearchResultItem};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
    /// Boards.
    pub main: Rect,
    /// Feed and quick-view triggers.
    pub side: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        body: rows[1],
        footer: rows[2],
        main: cols[0],
        side: cols[1],
    }
}

fn bordered(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

// --- Boards ---

pub fn card_height(density: Density) -> u16 {
    match density {
        Density::Calm => 2,
        Density::Dense => 1,
    }
}

fn card_gap(density: Density) -> u16 {
    match density {
        Density::Calm => 1,
        Density::Dense => 0,
    }
}

/// A lane column. `lane` is `None` for the column of cards that sit
/// outside every lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneRegion {
    pub lane: Option<usize>,
    pub area: Rect,
    pub cards: Vec<(usize, Rect)>,
    /// Cards scrolled out above and below the visible ones.
    pub hidden_above: usize,
    pub hidden_below: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardRegion {
    pub board: usize,
    pub area: Rect,
    pub lanes: Vec<LaneRegion>,
}

/// Screen geometry of every attached board, shared by rendering and mouse
/// hit-testing.
pub fn board_regions(state: &AppState, main: Rect) -> Vec<BoardRegion> {
    let Some(page) = &state.page else {
        return Vec::new();
    };
    if page.boards.is_empty() || main.width == 0 || main.height == 0 {
        return Vec::new();
    }

    let count = page.boards.len() as u32;
    let board_areas =
        Layout::vertical((0..count).map(|_| Constraint::Ratio(1, count))).split(main);
    let density = state.preferences.density;

    page.boards
        .iter()
        .enumerate()
        .map(|(board, lane_board)| {
            let area = board_areas[board];
            let mut columns: Vec<(Option<usize>, Vec<usize>)> = lane_board
                .lanes()
                .iter()
                .enumerate()
                .map(|(i, lane)| (Some(i), lane.cards.clone()))
                .collect();
            let loose: Vec<usize> = lane_board.loose_cards().map(|(i, _)| i).collect();
            if !loose.is_empty() {
                columns.push((None, loose));
            }

            let lanes = if columns.is_empty() {
                Vec::new()
            } else {
                let n = columns.len() as u32;
                let lane_areas =
                    Layout::horizontal((0..n).map(|_| Constraint::Ratio(1, n))).split(bordered(area));
                columns
                    .into_iter()
                    .zip(lane_areas.iter())
                    .map(|((lane, cards), &lane_area)| {
                        let offset = page.lane_offset(board, lane).min(cards.len());
                        let visible =
                            stack_cards(&cards[offset..], bordered(lane_area), density);
                        LaneRegion {
                            lane,
                            area: lane_area,
                            hidden_above: offset,
                            hidden_below: cards.len() - offset - visible.len(),
                            cards: visible,
                        }
                    })
                    .collect()
            };

            BoardRegion { board, area, lanes }
        })
        .collect()
}

fn stack_cards(cards: &[usize], inner: Rect, density: Density) -> Vec<(usize, Rect)> {
    let height = card_height(density);
    let step = height + card_gap(density);
    let mut y = inner.y;
    let mut out = Vec::new();
    for &card in cards {
        if y.saturating_add(height) > inner.bottom() {
            break;
        }
        out.push((card, Rect::new(inner.x, y, inner.width, height)));
        y = y.saturating_add(step);
    }
    out
}

/// `(board, card)` under `pos`.
pub fn card_at(regions: &[BoardRegion], pos: Position) -> Option<(usize, usize)> {
    regions.iter().find_map(|region| {
        region
            .lanes
            .iter()
            .flat_map(|lane| lane.cards.iter())
            .find(|(_, rect)| rect.contains(pos))
            .map(|(card, _)| (region.board, *card))
    })
}

/// Lane of `board` under `pos`. The column of loose cards is not a lane.
pub fn lane_at(regions: &[BoardRegion], board: usize, pos: Position) -> Option<usize> {
    regions
        .iter()
        .find(|r| r.board == board)?
        .lanes
        .iter()
        .find(|l| l.area.contains(pos))
        .and_then(|l| l.lane)
}

// --- Sidebar ---

pub struct SideLayout {
    pub feed: Rect,
    pub triggers: Rect,
}

pub fn side_layout(side: Rect) -> SideLayout {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(side);
    SideLayout {
        feed: parts[0],
        triggers: parts[1],
    }
}

/// One row per visible quick-view trigger, in page order from the
/// scroll offset.
pub fn trigger_regions(state: &AppState, side: Rect) -> Vec<(usize, Rect)> {
    let Some(page) = &state.page else {
        return Vec::new();
    };
    let inner = bordered(side_layout(side).triggers);
    (page.trigger_scroll..page.triggers.len())
        .zip(inner.rows())
        .collect()
}

/// Column under `pos`, lanes and the loose column alike.
pub fn column_at(regions: &[BoardRegion], pos: Position) -> Option<(usize, Option<usize>)> {
    regions.iter().find_map(|region| {
        region
            .lanes
            .iter()
            .find(|l| l.area.contains(pos))
            .map(|l| (region.board, l.lane))
    })
}

// --- Palette ---

pub fn palette_area(area: Rect) -> Rect {
    centered_rect(60, 60, area)
}

pub struct PaletteLayout {
    pub area: Rect,
    pub input: Rect,
    pub separator: Rect,
    pub results: Rect,
}

pub fn palette_layout(area: Rect) -> PaletteLayout {
    let modal = palette_area(area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Query input
            Constraint::Length(1), // Separator
            Constraint::Min(0),    // Results
        ])
        .split(bordered(modal));
    PaletteLayout {
        area: modal,
        input: parts[0],
        separator: parts[1],
        results: parts[2],
    }
}

/// A rendered line of the palette's result list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaletteLine<'a> {
    Group(&'static str),
    Item {
        flat_index: usize,
        item: &'a SearchResultItem,
    },
    Skeleton,
    Unavailable,
    NoResults,
}

impl PaletteLine<'_> {
    /// Result index a click on this line commits.
    pub fn flat_index(&self) -> Option<usize> {
        match self {
            PaletteLine::Item { flat_index, .. } => Some(*flat_index),
            PaletteLine::Unavailable => Some(0),
            _ => None,
        }
    }
}

pub fn palette_lines<'s>(session: &'s PaletteSession<'_>) -> Vec<PaletteLine<'s>> {
    match session.phase {
        SearchPhase::Loading => vec![PaletteLine::Skeleton; SKELETON_ROWS],
        SearchPhase::Failed => vec![PaletteLine::Unavailable],
        SearchPhase::Idle | SearchPhase::Rendered => {
            if session.results.is_empty() {
                return vec![PaletteLine::NoResults];
            }
            session
                .results
                .rows()
                .into_iter()
                .map(|row| match row {
                    PaletteRow::GroupLabel(label) => PaletteLine::Group(label),
                    PaletteRow::Item { flat_index, item } => {
                        PaletteLine::Item { flat_index, item }
                    }
                })
                .collect()
        }
    }
}

/// First visible line so that the selected item stays in view.
pub fn palette_scroll(lines: &[PaletteLine<'_>], selected: usize, height: u16) -> usize {
    let height = height as usize;
    if height == 0 {
        return 0;
    }
    let position = lines
        .iter()
        .position(|l| matches!(l, PaletteLine::Item { flat_index, .. } if *flat_index == selected))
        .unwrap_or(0);
    (position + 1).saturating_sub(height)
}

/// Result index under `pos`, when the palette is open.
pub fn palette_row_at(state: &AppState, area: Rect, pos: Position) -> Option<usize> {
    let session = state.palette.as_ref()?;
    let layout = palette_layout(area);
    if !layout.results.contains(pos) {
        return None;
    }
    let lines = palette_lines(session);
    let offset = palette_scroll(&lines, session.selected_index, layout.results.height);
    let line = offset + (pos.y - layout.results.y) as usize;
    lines.get(line)?.flat_index()
}

// --- Quick view ---

pub fn quick_view_area(body: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body)[1]
}

pub fn draw(f: &mut Frame, app_state: &AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let theme = &app_state.theme;
    let layout = get_layout(area);

    // --- Header ---
    f.render_widget(
        Header {
            state: app_state,
            theme,
        },
        layout.header,
    );

    // --- Boards / page status ---
    match &app_state.page_status {
        PageStatus::Failed(message) if app_state.page.is_none() => {
            let message = format!("Could not load page: {message}");
            draw_status(f, layout.main, &message, theme.status_error, theme.border);
        }
        PageStatus::Loading if app_state.page.is_none() => {
            draw_status(f, layout.main, "Loading…", theme.dimmed, theme.border);
        }
        _ => {
            let regions = board_regions(app_state, layout.main);
            if regions.is_empty() {
                let title = app_state
                    .page
                    .as_ref()
                    .map(|p| p.document.title.as_str())
                    .unwrap_or_default();
                draw_status(f, layout.main, title, theme.dimmed, theme.border);
            }
            if let Some(page) = &app_state.page {
                for region in &regions {
                    if let Some(board) = page.boards.get(region.board) {
                        f.render_widget(
                            BoardView {
                                board,
                                region,
                                theme,
                                density: app_state.preferences.density,
                            },
                            region.area,
                        );
                    }
                }
            }
        }
    }

    // --- Sidebar ---
    f.render_widget(
        Sidebar {
            state: app_state,
            theme,
        },
        layout.side,
    );

    // --- Footer ---
    f.render_widget(
        Footer {
            state: app_state,
            theme,
        },
        layout.footer,
    );

    // --- Overlays ---
    if let Some(qv) = &app_state.quick_view {
        f.render_widget(
            QuickViewPanel {
                state: qv,
                theme,
                easy_mode: app_state.preferences.easy_mode,
            },
            quick_view_area(layout.body),
        );
    }

    if let Some(session) = &app_state.palette {
        dim_area(f.buffer_mut(), area);
        f.render_widget(PaletteModal { session, theme }, area);
        let input = palette_layout(area).input;
        if let Some(pos) = cursor_position(session, input) {
            f.set_cursor_position(pos);
        }
    }

    f.render_widget(
        ToastStack {
            toasts: &app_state.toasts,
            theme,
        },
        layout.body,
    );
}

fn draw_status(f: &mut Frame, area: Rect, message: &str, style: Style, border: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }
    let centered = Rect {
        y: inner.y + inner.height / 2,
        height: 1,
        ..inner
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
            .alignment(Alignment::Center),
        centered,
    );
}

fn cursor_position(session: &PaletteSession<'_>, input: Rect) -> Option<Position> {
    if input.width == 0 || input.height == 0 {
        return None;
    }
    let col = session.input.cursor_col();
    // Prompt is three cells wide.
    let x = input.x + 3 + col as u16;
    (x < input.right()).then_some(Position::new(x, input.y))
}
