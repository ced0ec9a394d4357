use super::App;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, EventStream,
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::{panic, time::Duration};
use tokio::time::{Instant, MissedTickBehavior};

/// Redraw cadence; animation timers resolve at this granularity
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn restore_terminal() -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    Ok(())
}

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    terminal.clear()?;
    app.draw(&mut terminal)?;

    let mut events = EventStream::new();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();
    let cancel = app.cancel_token.clone();

    while !app.should_exit() {
        tokio::select! {
            _ = cancel.cancelled() => break,
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    app.handle_event(event);
                    app.draw(&mut terminal)?;
                }
                Some(Err(e)) => tracing::warn!(error = %e, "terminal event error"),
                None => break,
            },
            _ = frames.tick() => {
                let now = Instant::now();
                app.tick(now.duration_since(last_tick));
                last_tick = now;
                app.draw(&mut terminal)?;
            }
        }
    }

    app.cancel_token.cancel();
    tracing::info!(entries = app.terminal().entries().len(), "terminal session ended");

    terminal.show_cursor()?;
    restore_terminal()?;

    Ok(())
}
