use super::config::{humanize_lane, BoardConfig};
use crate::domain::models::LaneMoveRequest;
use crate::domain::page::{ElementId, PageDocument, Selector};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub element: ElementId,
    pub value: Option<String>,
    pub cards: Vec<usize>,
}

impl Lane {
    pub fn title(&self) -> String {
        self.value
            .as_deref()
            .map_or_else(|| "unassigned".to_string(), humanize_lane)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub element: ElementId,
    pub id: Option<String>,
    pub lane: Option<usize>,
    pub title: String,
}

/// State of one drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card: usize,
    pub dragged_id: String,
    pub source_lane_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Nothing is being dragged.
    NoSession,
    /// The lane has no value to move the card to.
    NoTarget,
    /// The card already belongs to the target lane.
    SameLane,
    Submit(LaneMoveRequest),
}

/// One attached drag-and-drop board.
///
/// Created by [`LaneBoard::attach`] for a page; boards never share state.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneBoard {
    config: Arc<BoardConfig>,
    lanes: Vec<Lane>,
    cards: Vec<Card>,
    drag: Option<DragSession>,
    dragging: Option<usize>,
    hovered: BTreeSet<usize>,
}

impl LaneBoard {
    /// Binds `config` to `page`. Returns `None` when the page has no such
    /// board.
    #[must_use]
    pub fn attach(config: Arc<BoardConfig>, page: &PageDocument) -> Option<Self> {
        let board_sel = parse_or_warn(config.board_selector, config.name)?;
        let lane_sel = parse_or_warn(config.lane_selector, config.name)?;
        let card_sel = parse_or_warn(config.card_selector, config.name)?;

        let board = page.query_selector(&board_sel)?;

        let mut lanes: Vec<Lane> = page
            .query_within(board, &lane_sel)
            .into_iter()
            .map(|element| Lane {
                element,
                value: page.dataset(element, config.lane_key).map(str::to_string),
                cards: Vec::new(),
            })
            .collect();

        let mut cards = Vec::new();
        for element in page.query_within(board, &card_sel) {
            let lane = page
                .closest(element, &lane_sel)
                .and_then(|lane_el| lanes.iter().position(|l| l.element == lane_el));
            let idx = cards.len();
            if let Some(l) = lane {
                lanes[l].cards.push(idx);
            }
            cards.push(Card {
                element,
                id: page
                    .dataset(element, config.card_id_key)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
                lane,
                title: page.text(element).to_string(),
            });
        }

        tracing::debug!(
            board = config.name,
            lanes = lanes.len(),
            cards = cards.len(),
            "board attached"
        );

        Some(Self {
            config,
            lanes,
            cards,
            drag: None,
            dragging: None,
            hovered: BTreeSet::new(),
        })
    }

    /// Releases the board. Any gesture in progress is dropped with it.
    pub fn detach(self) -> Arc<BoardConfig> {
        tracing::debug!(board = self.config.name, "board detached");
        self.config
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self, card: usize) -> bool {
        self.dragging == Some(card)
    }

    /// Card currently marked as dragging, with or without a session.
    pub fn dragged_card(&self) -> Option<usize> {
        self.dragging
    }

    pub fn is_hovered(&self, lane: usize) -> bool {
        self.hovered.contains(&lane)
    }

    pub fn hovered_lanes(&self) -> Vec<usize> {
        self.hovered.iter().copied().collect()
    }

    /// Cards not inside any lane.
    pub fn loose_cards(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.cards.iter().enumerate().filter(|(_, c)| c.lane.is_none())
    }

    pub fn drag_start(&mut self, card: usize) {
        let Some(c) = self.cards.get(card) else {
            return;
        };
        self.dragging = Some(card);
        self.drag = c.id.clone().map(|dragged_id| DragSession {
            card,
            dragged_id,
            source_lane_value: c.lane.and_then(|l| self.lanes[l].value.clone()),
        });
    }

    pub fn drag_over(&mut self, lane: usize) {
        if lane < self.lanes.len() {
            self.hovered.insert(lane);
        }
    }

    pub fn drag_leave(&mut self, lane: usize) {
        self.hovered.remove(&lane);
    }

    /// Ends the gesture whatever its outcome.
    pub fn drag_end(&mut self) {
        self.hovered.clear();
        self.dragging = None;
        self.drag = None;
    }

    pub fn drop(&mut self, lane: usize) -> DropOutcome {
        self.hovered.remove(&lane);
        let Some(session) = self.drag.take() else {
            return DropOutcome::NoSession;
        };
        let Some(target) = self.lanes.get(lane).and_then(|l| l.value.clone()) else {
            return DropOutcome::NoTarget;
        };
        if target.is_empty() {
            return DropOutcome::NoTarget;
        }
        if session.source_lane_value.as_deref() == Some(target.as_str()) {
            return DropOutcome::SameLane;
        }

        DropOutcome::Submit(LaneMoveRequest {
            endpoint: (self.config.endpoint)(&session.dragged_id),
            field: self.config.field_name.to_string(),
            success_message: (self.config.success_message)(&target),
            value: target,
        })
    }
}

fn parse_or_warn(raw: &str, board: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(board, error = %e, "board selector rejected");
            None
        }
    }
}

/// Attaches every config that matches `page`.
#[must_use]
pub fn attach_all(configs: &[Arc<BoardConfig>], page: &PageDocument) -> Vec<LaneBoard> {
    configs
        .iter()
        .filter_map(|cfg| LaneBoard::attach(cfg.clone(), page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::config::{scheduler_board, task_board};
    use crate::domain::page::PageBuilder;

    fn page() -> PageDocument {
        let mut b = PageBuilder::new("/");
        b.open("section", &[("data-board", "tasks")]);
        b.open("div", &[("data-task-lane", "todo")]);
        b.leaf("article", &[("data-task-id", "1")], "Draft copy");
        b.leaf("article", &[("data-task-id", "2")], "Call vendor");
        b.close();
        b.open("div", &[("data-task-lane", "in_progress")]);
        b.close();
        b.open("div", &[("data-task-lane", "")]);
        b.close();
        b.leaf("article", &[], "No id");
        b.close();
        b.open("section", &[("data-board", "scheduler")]);
        b.open("div", &[("data-service-stage", "scheduled")]);
        b.leaf("article", &[("data-service-id", "9")], "Boiler check");
        b.close();
        b.open("div", &[("data-service-stage", "on_site")]);
        b.close();
        b.close();
        b.finish()
    }

    fn tasks() -> LaneBoard {
        LaneBoard::attach(Arc::new(task_board()), &page()).unwrap()
    }

    #[test]
    fn test_attach_collects_lanes_and_cards() {
        let board = tasks();
        assert_eq!(board.lanes().len(), 3);
        assert_eq!(board.cards().len(), 2);
        assert_eq!(board.lanes()[0].cards, vec![0, 1]);
        assert_eq!(board.cards()[1].title, "Call vendor");
        assert_eq!(board.lanes()[1].title(), "in progress");
    }

    #[test]
    fn test_attach_missing_board() {
        let empty = PageBuilder::new("/").finish();
        assert!(LaneBoard::attach(Arc::new(task_board()), &empty).is_none());
    }

    #[test]
    fn test_boards_are_independent() {
        let doc = page();
        let configs = vec![Arc::new(task_board()), Arc::new(scheduler_board())];
        let mut boards = attach_all(&configs, &doc);
        assert_eq!(boards.len(), 2);
        boards[0].drag_start(0);
        assert!(boards[0].session().is_some());
        assert!(boards[1].session().is_none());
        assert_eq!(boards[1].drop(1), DropOutcome::NoSession);
    }

    #[test]
    fn test_drop_on_same_lane_is_noop() {
        let mut board = tasks();
        board.drag_start(0);
        assert_eq!(board.drop(0), DropOutcome::SameLane);
        assert!(board.session().is_none());
    }

    #[test]
    fn test_drop_without_session() {
        let mut board = tasks();
        assert_eq!(board.drop(1), DropOutcome::NoSession);
    }

    #[test]
    fn test_drop_on_lane_without_value() {
        let mut board = tasks();
        board.drag_start(0);
        assert_eq!(board.drop(2), DropOutcome::NoTarget);
    }

    #[test]
    fn test_drop_on_other_lane_builds_request() {
        let mut board = tasks();
        board.drag_start(1);
        board.drag_over(1);
        assert!(board.is_hovered(1));
        let outcome = board.drop(1);
        assert!(!board.is_hovered(1));
        assert_eq!(
            outcome,
            DropOutcome::Submit(LaneMoveRequest {
                endpoint: "/tasks/2/status".to_string(),
                field: "status".to_string(),
                value: "in_progress".to_string(),
                success_message: "Task moved to in progress.".to_string(),
            })
        );
    }

    #[test]
    fn test_drag_end_clears_visual_state() {
        let mut board = tasks();
        board.drag_start(0);
        board.drag_over(1);
        board.drag_over(2);
        assert!(board.is_dragging(0));
        board.drag_end();
        assert!(board.hovered_lanes().is_empty());
        assert!(!board.is_dragging(0));
        assert!(board.session().is_none());
    }

    #[test]
    fn test_drag_leave_removes_highlight() {
        let mut board = tasks();
        board.drag_over(0);
        board.drag_leave(0);
        assert!(!board.is_hovered(0));
    }

    #[test]
    fn test_detach_returns_config() {
        let cfg = tasks().detach();
        assert_eq!(cfg.name, "Tasks");
    }
}
