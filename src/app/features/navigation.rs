use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, PageStatus, PageView, QuickViewState, Toast},
};
use url::Url;

const TOAST_PARAM: &str = "toast";
const QUICK_CLIENT_PARAM: &str = "quick_client_id";

/// Messages for the `?toast=` codes set by server-side redirects.
pub fn toast_message(code: &str) -> Option<&'static str> {
    match code {
        "client-created" => Some("Client created."),
        "project-created" => Some("Project created."),
        "financials-updated" => Some("Client financials updated."),
        "campaign-created" => Some("Campaign saved to Marketing."),
        _ => None,
    }
}

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Navigate(location) => UpdateResult::Handled(Some(navigate(state, location))),
        Action::Reload => {
            let location = state.location.clone();
            UpdateResult::Handled(Some(navigate(state, &location)))
        }
        Action::PageLoaded { location, result } => {
            if *location != state.location {
                tracing::debug!(%location, current = %state.location, "stale page load discarded");
                return UpdateResult::Handled(None);
            }
            match result {
                Ok(document) => UpdateResult::Handled(show_page(state, (**document).clone())),
                Err(e) => {
                    tracing::warn!(%location, error = %e, "page load failed");
                    state.page_status = PageStatus::Failed(e.clone());
                    UpdateResult::Handled(None)
                }
            }
        }
        Action::OpenQuickView(index) => {
            let trigger = state
                .page
                .as_ref()
                .and_then(|p| p.triggers.get(*index).map(|t| t.element));
            match trigger {
                Some(element) => UpdateResult::Handled(open_quick_view(state, element)),
                None => UpdateResult::Handled(None),
            }
        }
        Action::ScrollTriggers(delta) => {
            if let Some(page) = state.page.as_mut() {
                page.scroll_triggers(*delta);
            }
            UpdateResult::Handled(None)
        }
        Action::QuickViewLoaded { client_id, data } => {
            if let Some(qv) = state.quick_view.as_mut() {
                if qv.client_id.as_deref() == Some(client_id.as_str()) {
                    qv.loading = false;
                    qv.data = data.as_deref().cloned();
                } else {
                    tracing::debug!(%client_id, "quick view response for another client discarded");
                }
            }
            UpdateResult::Handled(None)
        }
        Action::CloseQuickView => {
            state.quick_view = None;
            UpdateResult::Handled(None)
        }
        Action::OpenQuickViewLink(link) => {
            let Some(qv) = state.quick_view.take() else {
                return UpdateResult::Handled(None);
            };
            let target = qv.link(*link, &state.tenant_id);
            UpdateResult::Handled(Some(navigate(state, &target)))
        }
        _ => UpdateResult::NotHandled,
    }
}

fn navigate(state: &mut AppState, location: &str) -> Command {
    tracing::info!(%location, "navigating");
    state.location = location.to_string();
    state.page_status = PageStatus::Loading;
    Command::LoadPage(location.to_string())
}

fn show_page(state: &mut AppState, document: crate::domain::page::PageDocument) -> Option<Command> {
    if let Some(old) = state.page.take() {
        old.teardown();
    }
    state.palette = None;
    state.quick_view = None;
    state.feed_muted = false;
    state.page = Some(PageView::build(document, &state.board_configs));
    state.page_status = PageStatus::Ready;

    let params = query_params(&state.location);
    if let Some(message) = params
        .iter()
        .find(|(k, _)| k == TOAST_PARAM)
        .and_then(|(_, code)| toast_message(code))
    {
        state.push_toast(Toast::info(message));
        state.location = strip_param(&state.location, TOAST_PARAM);
    }

    let client_id = params
        .into_iter()
        .find(|(k, v)| k == QUICK_CLIENT_PARAM && !v.is_empty())
        .map(|(_, v)| v)?;
    let element = state
        .page
        .as_ref()?
        .trigger_for_client(&client_id)
        .map(|t| t.element)?;
    open_quick_view(state, element)
}

fn open_quick_view(
    state: &mut AppState,
    trigger: crate::domain::page::ElementId,
) -> Option<Command> {
    let page = state.page.as_mut()?;
    page.end_gestures();
    let qv = QuickViewState::from_trigger(&page.document, trigger);
    let command = qv.client_id.clone().map(Command::LoadQuickView);
    state.quick_view = Some(qv);
    command
}

fn parse_location(location: &str) -> Option<Url> {
    Url::parse("http://console.invalid/").ok()?.join(location).ok()
}

fn query_params(location: &str) -> Vec<(String, String)> {
    parse_location(location)
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}

/// `location` without `key`, keeping path and the other parameters.
fn strip_param(location: &str, key: &str) -> String {
    let Some(mut url) = parse_location(location) else {
        return location.to_string();
    };
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(k, _)| k != key)
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}
