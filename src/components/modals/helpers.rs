use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
};

/// Dims everything already drawn in `area`.
pub fn dim_area(buf: &mut Buffer, area: Rect) {
    buf.set_style(
        area.intersection(buf.area),
        Style::new().add_modifier(Modifier::DIM),
    );
}

/// Rect of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y.min(100))])
        .flex(Flex::Center)
        .areas(r);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x.min(100))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// One-cell shadow below and right of `area`, clipped to `bounds`.
pub fn draw_drop_shadow(buf: &mut Buffer, area: Rect, bounds: Rect) {
    let shadow = area.offset(ratatui::layout::Offset { x: 1, y: 1 });
    let shadow = shadow.intersection(bounds).intersection(buf.area);
    for y in shadow.top()..shadow.bottom() {
        for x in shadow.left()..shadow.right() {
            if area.contains((x, y).into()) {
                continue;
            }
            buf[(x, y)]
                .set_symbol(" ")
                .set_style(Style::new().bg(Color::Black));
        }
    }
}
