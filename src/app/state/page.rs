use crate::board::{attach_all, BoardConfig, LaneBoard};
use crate::domain::page::{ElementId, PageDocument, Selector};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum PageStatus {
    Loading,
    Ready,
    Failed(String),
}

/// A row of the activity feed (`[data-feed-kind]`).
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRow {
    pub element: ElementId,
    pub id: Option<String>,
    pub kind: String,
    pub text: String,
}

/// A `[data-quick-view]` trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickViewTrigger {
    pub element: ElementId,
    pub client_id: Option<String>,
    pub label: String,
}

/// The loaded page together with the behaviours bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub document: PageDocument,
    pub boards: Vec<LaneBoard>,
    pub feed: Vec<FeedRow>,
    pub triggers: Vec<QuickViewTrigger>,
    /// First visible card of each `(board, lane)` column. The column of
    /// cards outside every lane is keyed by `None`. Absent means 0.
    pub lane_scroll: BTreeMap<(usize, Option<usize>), usize>,
    pub trigger_scroll: usize,
}

impl PageView {
    #[must_use]
    pub fn build(document: PageDocument, configs: &[Arc<BoardConfig>]) -> Self {
        let boards = attach_all(configs, &document);
        let feed = select(&document, "[data-feed-kind]")
            .into_iter()
            .map(|element| FeedRow {
                element,
                id: document
                    .dataset(element, "feedId")
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
                kind: document
                    .dataset(element, "feedKind")
                    .unwrap_or_default()
                    .to_string(),
                text: document.text(element).to_string(),
            })
            .collect();
        let triggers = select(&document, "[data-quick-view]")
            .into_iter()
            .map(|element| {
                let title = document.dataset(element, "title").unwrap_or_default();
                let label = if title.is_empty() {
                    document.text(element)
                } else {
                    title
                };
                QuickViewTrigger {
                    element,
                    client_id: document.dataset(element, "clientId").map(str::to_string),
                    label: label.to_string(),
                }
            })
            .collect();
        Self {
            document,
            boards,
            feed,
            triggers,
            lane_scroll: BTreeMap::new(),
            trigger_scroll: 0,
        }
    }

    /// Detaches every board, ending any gesture in progress.
    pub fn teardown(self) {
        for board in self.boards {
            board.detach();
        }
    }

    pub fn lane_offset(&self, board: usize, lane: Option<usize>) -> usize {
        self.lane_scroll.get(&(board, lane)).copied().unwrap_or(0)
    }

    /// Moves a column by `delta` cards, keeping at least its last card in
    /// view.
    pub fn scroll_lane(&mut self, board: usize, lane: Option<usize>, delta: isize) {
        let Some(b) = self.boards.get(board) else {
            return;
        };
        let len = match lane {
            Some(l) => b.lanes().get(l).map_or(0, |l| l.cards.len()),
            None => b.loose_cards().count(),
        };
        let next = scrolled(self.lane_offset(board, lane), delta, len);
        if next == 0 {
            self.lane_scroll.remove(&(board, lane));
        } else {
            self.lane_scroll.insert((board, lane), next);
        }
    }

    pub fn scroll_triggers(&mut self, delta: isize) {
        self.trigger_scroll = scrolled(self.trigger_scroll, delta, self.triggers.len());
    }

    /// Ends any drag in progress on every board.
    pub fn end_gestures(&mut self) {
        for board in &mut self.boards {
            board.drag_end();
        }
    }

    pub fn trigger_for_client(&self, client_id: &str) -> Option<&QuickViewTrigger> {
        self.triggers
            .iter()
            .find(|t| t.client_id.as_deref() == Some(client_id))
    }
}

fn select(document: &PageDocument, raw: &str) -> Vec<ElementId> {
    match Selector::parse(raw) {
        Ok(selector) => document.query_selector_all(&selector),
        Err(e) => {
            tracing::warn!(selector = raw, error = %e, "selector rejected");
            Vec::new()
        }
    }
}

fn scrolled(offset: usize, delta: isize, len: usize) -> usize {
    offset
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1))
}
