use crate::app::{action::Action, keymap::is_palette_toggle, state::AppState, ui};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) => map_key(key, app_state),
        Event::Mouse(mouse) => map_mouse(mouse, app_state, area),
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}

fn map_key(key: KeyEvent, app_state: &AppState<'_>) -> Option<Action> {
    if is_palette_toggle(&key) {
        return Some(Action::TogglePalette);
    }
    if key.code == KeyCode::Esc {
        return (app_state.is_palette_open() || app_state.quick_view.is_some())
            .then_some(Action::Dismiss);
    }

    if app_state.is_palette_open() {
        return Some(match key.code {
            KeyCode::Down => Action::PaletteNext,
            KeyCode::Up => Action::PalettePrev,
            KeyCode::Enter => Action::PaletteCommit,
            _ => Action::PaletteInput(key),
        });
    }

    app_state
        .keymap
        .get_action(key, app_state.quick_view.is_some())
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState<'_>, area: Rect) -> Option<Action> {
    let pos = Position::new(mouse.column, mouse.row);

    // --- Palette (modal) ---
    if app_state.is_palette_open() {
        return match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = ui::palette_row_at(app_state, area, pos) {
                    Some(Action::PaletteCommitIndex(index))
                } else if ui::palette_area(area).contains(pos) {
                    None
                } else {
                    Some(Action::ClosePalette)
                }
            }
            _ => None,
        };
    }

    let layout = ui::get_layout(area);

    // --- Drag gesture in progress ---
    // Only the left button's release drops; any other press abandons it.
    if let Some(board) = app_state.dragging_board() {
        let regions = ui::board_regions(app_state, layout.main);
        let lane = ui::lane_at(&regions, board, pos);
        return match mouse.kind {
            MouseEventKind::Drag(MouseButton::Left) => Some(Action::BoardDragMove { board, lane }),
            MouseEventKind::Up(MouseButton::Left) => Some(Action::BoardRelease { board, lane }),
            MouseEventKind::Down(_) => Some(Action::BoardCancel { board }),
            _ => None,
        };
    }

    let delta = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => 0,
        MouseEventKind::ScrollUp => -1,
        MouseEventKind::ScrollDown => 1,
        _ => return None,
    };

    // --- Quick view panel ---
    if app_state.quick_view.is_some() {
        if ui::quick_view_area(layout.body).contains(pos) {
            return None;
        }
        if delta == 0 {
            return Some(Action::CloseQuickView);
        }
    }

    let regions = ui::board_regions(app_state, layout.main);
    if delta != 0 {
        if let Some((board, lane)) = ui::column_at(&regions, pos) {
            return Some(Action::ScrollLane { board, lane, delta });
        }
        return ui::side_layout(layout.side)
            .triggers
            .contains(pos)
            .then_some(Action::ScrollTriggers(delta));
    }

    if let Some((board, card)) = ui::card_at(&regions, pos) {
        return Some(Action::BoardPress { board, card });
    }

    ui::trigger_regions(app_state, layout.side)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(index, _)| Action::OpenQuickView(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{PageView, PaletteSession, QuickViewState};
    use crate::domain::page::PageBuilder;
    use crossterm::event::KeyModifiers;

    const SIZE: Size = Size {
        width: 100,
        height: 40,
    };

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, pos: Position) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: pos.x,
            row: pos.y,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn state_with_page() -> AppState<'static> {
        let mut b = PageBuilder::new("/");
        b.open("section", &[("data-board", "tasks")]);
        b.open("div", &[("data-task-lane", "todo")]);
        b.leaf("article", &[("data-task-id", "1")], "Draft");
        b.close();
        b.open("div", &[("data-task-lane", "done")]);
        b.close();
        b.close();
        b.leaf(
            "button",
            &[("data-quick-view", ""), ("data-client-id", "4")],
            "Acme Co",
        );
        let mut state = AppState::default();
        state.page = Some(PageView::build(b.finish(), &state.board_configs));
        state
    }

    fn area() -> Rect {
        Rect::new(0, 0, SIZE.width, SIZE.height)
    }

    #[test]
    fn test_palette_toggle_keys() {
        let state = AppState::default();
        for modifier in [KeyModifiers::CONTROL, KeyModifiers::SUPER] {
            assert_eq!(
                map_event_to_action(key(KeyCode::Char('k'), modifier), &state, SIZE),
                Some(Action::TogglePalette)
            );
        }
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('k'), KeyModifiers::NONE), &state, SIZE),
            None
        );
    }

    #[test]
    fn test_keys_go_to_palette_while_open() {
        let state = AppState {
            palette: Some(PaletteSession::default()),
            ..AppState::default()
        };
        assert_eq!(
            map_event_to_action(key(KeyCode::Down, KeyModifiers::NONE), &state, SIZE),
            Some(Action::PaletteNext)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter, KeyModifiers::NONE), &state, SIZE),
            Some(Action::PaletteCommit)
        );
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            map_event_to_action(Event::Key(q), &state, SIZE),
            Some(Action::PaletteInput(q))
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc, KeyModifiers::NONE), &state, SIZE),
            Some(Action::Dismiss)
        );
    }

    #[test]
    fn test_shell_keys_when_closed() {
        let state = AppState::default();
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('q'), KeyModifiers::NONE), &state, SIZE),
            Some(Action::Quit)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc, KeyModifiers::NONE), &state, SIZE),
            None
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let state = AppState::default();
        let mut event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_event_to_action(Event::Key(event), &state, SIZE), None);
    }

    #[test]
    fn test_click_outside_palette_closes() {
        let state = AppState {
            palette: Some(PaletteSession::default()),
            ..AppState::default()
        };
        assert_eq!(
            map_event_to_action(
                mouse(MouseEventKind::Down(MouseButton::Left), Position::new(0, 0)),
                &state,
                SIZE
            ),
            Some(Action::ClosePalette)
        );
        let inside = ui::palette_layout(area()).input;
        assert_eq!(
            map_event_to_action(
                mouse(
                    MouseEventKind::Down(MouseButton::Left),
                    Position::new(inside.x, inside.y)
                ),
                &state,
                SIZE
            ),
            None
        );
    }

    #[test]
    fn test_card_press_then_drag_and_release() {
        let mut state = state_with_page();
        let layout = ui::get_layout(area());
        let regions = ui::board_regions(&state, layout.main);
        let (_, card) = regions[0].lanes[0].cards[0];
        let done = regions[0].lanes[1].area;
        let over_done = Position::new(done.x + 1, done.y + 1);

        let press = map_event_to_action(
            mouse(MouseEventKind::Down(MouseButton::Left), card.as_position()),
            &state,
            SIZE,
        );
        assert_eq!(press, Some(Action::BoardPress { board: 0, card: 0 }));

        state.page.as_mut().unwrap().boards[0].drag_start(0);
        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::Drag(MouseButton::Left), over_done), &state, SIZE),
            Some(Action::BoardDragMove {
                board: 0,
                lane: Some(1)
            })
        );
        assert_eq!(
            map_event_to_action(
                mouse(MouseEventKind::Up(MouseButton::Left), Position::new(99, 0)),
                &state,
                SIZE
            ),
            Some(Action::BoardRelease {
                board: 0,
                lane: None
            })
        );
    }

    #[test]
    fn test_trigger_click_opens_quick_view() {
        let state = state_with_page();
        let layout = ui::get_layout(area());
        let (index, rect) = ui::trigger_regions(&state, layout.side)[0];
        assert_eq!(
            map_event_to_action(
                mouse(MouseEventKind::Down(MouseButton::Left), rect.as_position()),
                &state,
                SIZE
            ),
            Some(Action::OpenQuickView(index))
        );
    }

    #[test]
    fn test_quick_view_keys_and_outside_click() {
        let state = AppState {
            quick_view: Some(QuickViewState::default()),
            ..state_with_page()
        };
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('x'), KeyModifiers::NONE), &state, SIZE),
            Some(Action::CloseQuickView)
        );
        assert_eq!(
            map_event_to_action(
                mouse(MouseEventKind::Down(MouseButton::Left), Position::new(0, 5)),
                &state,
                SIZE
            ),
            Some(Action::CloseQuickView)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc, KeyModifiers::NONE), &state, SIZE),
            Some(Action::Dismiss)
        );
    }

    fn left_down(pos: Position) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), pos)
    }

    #[test]
    fn test_palette_mid_drag_never_submits_a_move() {
        use crate::app::{command::Command, reducer};

        let mut state = state_with_page();
        let regions = ui::board_regions(&state, ui::get_layout(area()).main);
        let done = regions[0].lanes[1].area;
        let over_done = Position::new(done.x + 2, done.y + 2);

        reducer::update(&mut state, Action::BoardPress { board: 0, card: 0 });
        assert_eq!(state.dragging_board(), Some(0));
        reducer::update(&mut state, Action::TogglePalette);
        assert_eq!(state.dragging_board(), None);

        let release = mouse(MouseEventKind::Up(MouseButton::Left), over_done);
        assert_eq!(map_event_to_action(release, &state, SIZE), None);
        reducer::update(&mut state, Action::Dismiss);

        let later = map_event_to_action(left_down(over_done), &state, SIZE);
        assert!(!matches!(later, Some(Action::BoardRelease { .. })));
        if let Some(action) = later {
            assert!(!matches!(
                reducer::update(&mut state, action),
                Some(Command::MoveCard(_))
            ));
        }
    }

    #[test]
    fn test_quick_view_mid_drag_ends_gesture() {
        let mut state = state_with_page();
        crate::app::reducer::update(&mut state, Action::BoardPress { board: 0, card: 0 });
        crate::app::reducer::update(&mut state, Action::OpenQuickView(0));
        assert!(state.quick_view.is_some());
        assert_eq!(state.dragging_board(), None);
        let board = &state.page.as_ref().unwrap().boards[0];
        assert!(board.session().is_none());
    }

    #[test]
    fn test_only_left_release_drops() {
        let mut state = state_with_page();
        state.page.as_mut().unwrap().boards[0].drag_start(0);
        let pos = Position::new(50, 10);

        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::Up(MouseButton::Right), pos), &state, SIZE),
            None
        );
        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::Down(MouseButton::Right), pos), &state, SIZE),
            Some(Action::BoardCancel { board: 0 })
        );
        assert_eq!(
            map_event_to_action(left_down(pos), &state, SIZE),
            Some(Action::BoardCancel { board: 0 })
        );
        assert!(matches!(
            map_event_to_action(mouse(MouseEventKind::Up(MouseButton::Left), pos), &state, SIZE),
            Some(Action::BoardRelease { board: 0, .. })
        ));

        crate::app::reducer::update(&mut state, Action::BoardCancel { board: 0 });
        assert_eq!(state.dragging_board(), None);
    }

    #[test]
    fn test_wheel_scrolls_long_lane_to_every_card() {
        let mut b = PageBuilder::new("/");
        b.open("section", &[("data-board", "tasks")]);
        b.open("div", &[("data-task-lane", "todo")]);
        for id in 1..=12 {
            let id = id.to_string();
            b.leaf("article", &[("data-task-id", id.as_str())], "Task");
        }
        b.close();
        b.open("div", &[("data-task-lane", "done")]);
        b.close();
        b.close();
        let mut state = AppState::default();
        state.page = Some(PageView::build(b.finish(), &state.board_configs));

        let main = ui::get_layout(area()).main;
        let regions = ui::board_regions(&state, main);
        let todo = &regions[0].lanes[0];
        assert!(todo.hidden_below > 0);
        assert!(todo.cards.iter().all(|(card, _)| *card != 11));

        let over_todo = Position::new(todo.area.x + 2, todo.area.y + 2);
        let scroll = mouse(MouseEventKind::ScrollDown, over_todo);
        assert_eq!(
            map_event_to_action(scroll.clone(), &state, SIZE),
            Some(Action::ScrollLane {
                board: 0,
                lane: Some(0),
                delta: 1
            })
        );

        let mut last = None;
        for _ in 0..12 {
            let action = map_event_to_action(scroll.clone(), &state, SIZE).unwrap();
            crate::app::reducer::update(&mut state, action);
            let regions = ui::board_regions(&state, main);
            last = regions[0].lanes[0]
                .cards
                .iter()
                .find(|(card, _)| *card == 11)
                .map(|(_, rect)| *rect);
            if last.is_some() {
                break;
            }
        }
        let rect = last.expect("last card scrolled into view");
        assert_eq!(
            map_event_to_action(left_down(rect.as_position()), &state, SIZE),
            Some(Action::BoardPress { board: 0, card: 11 })
        );
        assert!(ui::board_regions(&state, main)[0].lanes[0].hidden_above > 0);
    }
}
