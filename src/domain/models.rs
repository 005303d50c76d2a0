use serde::Deserialize;

// --- /search payload ---
// Every field is optional: the palette has to render whatever the server
// sends, including nulls and missing categories.

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CommandHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ClientHit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProjectHit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub commands: Option<Vec<CommandHit>>,
    #[serde(default)]
    pub clients: Option<Vec<ClientHit>>,
    #[serde(default)]
    pub projects: Option<Vec<ProjectHit>>,
}

// --- /clients/{id}/quickview payload ---

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct QuickView {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub approvals: Option<i64>,
    #[serde(default)]
    pub blocked: Option<i64>,
    #[serde(default)]
    pub due: Option<i64>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub drivers: Option<Vec<String>>,
    #[serde(default)]
    pub mrr_cents: Option<i64>,
    #[serde(default)]
    pub open_client_url: Option<String>,
    #[serde(default)]
    pub open_projects_url: Option<String>,
}

impl QuickView {
    pub fn has_tracked_actions(&self) -> bool {
        self.approvals.is_some() || self.blocked.is_some() || self.due.is_some()
    }

    pub fn mrr_label(&self) -> String {
        match self.mrr_cents {
            Some(cents) => format!("${:.2}", cents as f64 / 100.0),
            None => "—".to_string(),
        }
    }
}

/// Lane update sent when a card is dropped on a different lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneMoveRequest {
    pub endpoint: String,
    pub field: String,
    pub value: String,
    pub success_message: String,
}
