//! Interactive terminal console (`stubdeck console`)

use crate::api::HttpApi;
use crate::config::preferences_file;
use crate::deck::{Console, FileStore, View};
use crate::tui::{TuiApp, TuiEvent};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

type ConsoleApp = TuiApp<HttpApi, FileStore>;

/// Run the console against `server_url`, starting at `view` (a hash such as
/// `#mocks`, or a bare view name)
pub async fn run(server_url: &str, view: Option<String>) -> Result<()> {
    let api = HttpApi::new(server_url)?;
    let prefs = FileStore::new(preferences_file());
    let mut app = TuiApp::new(Console::new(api, prefs));

    tracing::info!("Console connected to {}", server_url);
    app.console.set_location(&start_hash(view.as_deref())).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_tui_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ConsoleApp,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        // Draw UI
        terminal.draw(|f| crate::tui::draw(f, app))?;

        tokio::select! {
            // Handle keyboard events (non-blocking)
            _ = tick_interval.tick() => {
                while event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        app.handle_event(TuiEvent::Key(key)).await;
                        if app.should_quit {
                            return Ok(());
                        }
                        // Redraw after every handled key
                        break;
                    }
                }
                app.handle_event(TuiEvent::Tick).await;
            }

            _ = tokio::signal::ctrl_c() => {
                return Ok(());
            }
        }
    }
}

/// Location hash for the first routing pass
fn start_hash(view: Option<&str>) -> String {
    match view {
        None | Some("") => View::Home.hash().to_string(),
        Some(hash) if hash.starts_with('#') => hash.to_string(),
        Some(name) => format!("#{}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_hash() {
        assert_eq!(start_hash(None), "#home");
        assert_eq!(start_hash(Some("mocks")), "#mocks");
        assert_eq!(start_hash(Some("#create")), "#create");
        // Unknown names pass through and route to nothing
        assert_eq!(start_hash(Some("stats")), "#stats");
    }
}
