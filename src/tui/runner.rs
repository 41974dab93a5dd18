//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, starts the key reader, runs the main TEA loop, and
//! spawns one tokio task per queued effect. Each task reports back exactly
//! once, whatever happens to its request, which is what lets the
//! controller settle every trigger it disabled.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

use crate::api::DashboardApi;

use super::app::{Effect, TuiApp};
use super::event::TuiMessage;
use super::layout;

/// Spawn the request behind an effect. The result is sent back as a message.
pub fn spawn_effect(api: Arc<dyn DashboardApi>, effect: Effect, tx: mpsc::UnboundedSender<TuiMessage>) {
    tokio::spawn(async move {
        let msg = match effect {
            Effect::LoadWorkflows(ticket) => TuiMessage::WorkflowsLoaded {
                ticket,
                result: api.list_workflows().await,
            },
            Effect::RunWorkflow(ticket) => {
                let result = api.run_workflow(&ticket.workflow_id).await;
                TuiMessage::RunFinished { ticket, result }
            }
            Effect::Generate(request) => {
                TuiMessage::GenerationFinished(api.generate_content(&request).await)
            }
        };
        if tx.send(msg).is_err() {
            warn!("UI loop gone before a request settled");
        }
    });
}

/// Forward crossterm key events into the message channel.
fn spawn_key_reader(tx: mpsc::UnboundedSender<TuiMessage>) {
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(50)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(TuiMessage::Input(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("terminal read failed: {e}");
                    let _ = tx.send(TuiMessage::Quit);
                    break;
                }
            },
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(e) => {
                warn!("terminal poll failed: {e}");
                let _ = tx.send(TuiMessage::Quit);
                break;
            }
        }
    });
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(api: Arc<dyn DashboardApi>, mut app: TuiApp) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    info!("dashboard started against {}", app.base_url);
    let result = main_loop(&mut terminal, api, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: Arc<dyn DashboardApi>,
    app: &mut TuiApp,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_key_reader(tx.clone());

    // Initial listing.
    app.reload();

    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        for effect in app.drain_effects() {
            spawn_effect(api.clone(), effect, tx.clone());
        }

        tokio::select! {
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, app))?;
            }
            Some(msg) = rx.recv() => {
                app.update(msg);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
