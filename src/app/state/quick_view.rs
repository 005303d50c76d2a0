use crate::domain::models::QuickView;
use crate::domain::page::{ElementId, PageDocument};

pub const DEFAULT_TITLE: &str = "Quick View";
pub const NO_DETAILS: &str = "No additional details yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickViewLink {
    Client,
    Projects,
}

/// Side panel for one client, opened from a `[data-quick-view]` trigger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuickViewState {
    pub client_id: Option<String>,
    pub title: String,
    pub meta: String,
    pub details: String,
    pub contacts: Vec<String>,
    /// `None` until loaded, and when the server had nothing usable.
    pub data: Option<QuickView>,
    pub loading: bool,
}

impl QuickViewState {
    /// Reads the trigger's `data-*` attributes.
    pub fn from_trigger(page: &PageDocument, trigger: ElementId) -> Self {
        let read = |key: &str| page.dataset(trigger, key).unwrap_or_default().to_string();
        let title = read("title");
        let client_id = page
            .dataset(trigger, "clientId")
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Self {
            loading: client_id.is_some(),
            client_id,
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            meta: read("meta"),
            details: read("details"),
            contacts: read("contacts")
                .split("||")
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            data: None,
        }
    }

    pub fn details_text(&self) -> &str {
        if self.details.is_empty() {
            NO_DETAILS
        } else {
            &self.details
        }
    }

    /// Target of an "Open …" action, falling back to the tenant-wide list.
    #[must_use]
    pub fn link(&self, link: QuickViewLink, tenant_id: &str) -> String {
        let data = self.data.as_ref();
        let (explicit, fallback) = match link {
            QuickViewLink::Client => (data.and_then(|d| d.open_client_url.clone()), "/clients"),
            QuickViewLink::Projects => {
                (data.and_then(|d| d.open_projects_url.clone()), "/projects")
            }
        };
        explicit
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("{fallback}?tenant_id={tenant_id}"))
    }
}
