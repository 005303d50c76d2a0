use crate::app::{action::Action, command::Command};
use crate::domain::console::ConsoleApi;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the server-facing half of a [`Command`] on a background task and
/// reports back through `tx`.
///
/// Timer and file commands are owned by the loop; they are logged and
/// dropped here.
pub fn handle_command(
    command: Command,
    api: Arc<dyn ConsoleApi>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::Search { generation, query } => {
            tokio::spawn(async move {
                let result = api.search(&query).await.map_err(|e| e.to_string());
                let _ = tx
                    .send(Action::SearchLoaded {
                        generation,
                        query,
                        result,
                    })
                    .await;
            });
        }
        Command::LoadPage(location) => {
            tokio::spawn(async move {
                let result = api
                    .fetch_page(&location)
                    .await
                    .map(Box::new)
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::PageLoaded { location, result }).await;
            });
        }
        Command::NavigateAfter(location, delay) => {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(Action::Navigate(location)).await;
            });
        }
        Command::MoveCard(request) => {
            tokio::spawn(async move {
                let result = api.move_card(&request).await.map_err(|e| e.to_string());
                let _ = tx
                    .send(Action::LaneMoveCompleted {
                        success_message: request.success_message,
                        result,
                    })
                    .await;
            });
        }
        Command::LoadQuickView(client_id) => {
            tokio::spawn(async move {
                let data = match api.quick_view(&client_id).await {
                    Ok(qv) => Some(Box::new(qv)),
                    Err(e) => {
                        tracing::warn!(%client_id, error = %e, "quick view unavailable");
                        None
                    }
                };
                let _ = tx.send(Action::QuickViewLoaded { client_id, data }).await;
            });
        }
        other => {
            tracing::debug!(command = ?other, "command has no console effect");
        }
    }
    Ok(())
}
