use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use opsdeck::app::{persistence, r#loop::run_loop, state::AppState};
use opsdeck::config::ConsoleConfig;
use opsdeck::infrastructure::http_client::HttpConsole;
use opsdeck::logging;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();
    let log_path = logging::init_tui()?;

    // Build the client BEFORE terminal setup so a bad base URL or cookie
    // doesn't leave the terminal in raw mode.
    let config = ConsoleConfig::load();
    let api = Arc::new(HttpConsole::new(&config)?);
    tracing::info!(base_url = %config.base_url, tenant = %config.tenant_id, "starting");

    let mut app_state = AppState::new(
        config.tenant_id.clone(),
        config.start_location.clone(),
        persistence::load_preferences(),
    );
    app_state.preferences_path = persistence::get_preferences_path();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, api).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "console exited with an error");
        println!("{err:?}");
        if let Some(path) = log_path {
            println!("See {} for details.", path.display());
        }
    }

    Ok(())
}
