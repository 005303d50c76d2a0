use crate::app::{
    action::Action,
    command::Command,
    debounce::SearchDebouncer,
    input::map_event_to_action,
    reducer,
    state::{palette::SEARCH_DEBOUNCE, AppState},
    ui,
};
use crate::domain::console::ConsoleApi;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    api: Arc<dyn ConsoleApi>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, api, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    api: Arc<dyn ConsoleApi>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);
    let mut debouncer = SearchDebouncer::new(SEARCH_DEBOUNCE);

    // Initial Load
    handle_command(
        Command::LoadPage(app_state.location.clone()),
        api.clone(),
        action_tx.clone(),
    )?;

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        let Some(action) = action else {
            continue;
        };
        let command = reducer::update(&mut app_state, action);

        // Post-reducer side effects (Runtime logic)
        if app_state.should_quit {
            break;
        }
        if !app_state.is_palette_open() {
            debouncer.cancel();
        }

        if let Some(cmd) = command {
            match cmd {
                Command::ScheduleSearch(ticket) => {
                    debouncer.schedule(ticket, action_tx.clone());
                }
                Command::SavePreferences(prefs) => {
                    if let Some(path) = &app_state.preferences_path {
                        if let Err(e) = crate::app::persistence::save_preferences_to(path, &prefs) {
                            tracing::warn!(path = %path.display(), error = %e, "failed to save preferences");
                        }
                    }
                }
                other_cmd => {
                    if matches!(other_cmd, Command::Search { .. }) {
                        debouncer.cancel();
                    }
                    handle_command(other_cmd, api.clone(), action_tx.clone())?;
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn handle_command(
    command: Command,
    api: Arc<dyn ConsoleApi>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::console::handle_command(command, api, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
