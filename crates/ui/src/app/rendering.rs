use super::App;
use crate::components::{
    ChatView, CommandMenu, Footer, Header, PromptLine, RenderedTranscript, TranscriptPane, wrap_lines,
};
use crate::layout::TuiLayout;
use crate::state::Focus;
use crate::theme::Theme;

use ratatui::{Frame, Terminal, backend::CrosstermBackend, widgets::Block};
use std::io::Result;

pub fn draw(app: &mut App, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    terminal.draw(|frame| render(app, frame))?;
    Ok(())
}

/// Lay out and draw one frame
///
/// Also reports the transcript extent to the scroll coordinator and refreshes
/// the list of on-screen triggers, so it needs the app mutably.
pub fn render(app: &mut App, frame: &mut Frame<'_>) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::base()), area);

    let focus = app.state.focus;
    let layout = TuiLayout::calculate(area, focus == Focus::Menu, app.state.chat.is_open());

    let profile = app.terminal.profile();
    Header::new(&profile.name, &profile.home).render(frame, layout.header);

    let selected_link = (focus == Focus::Links).then_some(app.state.link_selected);
    let rendered = RenderedTranscript::build(&app.terminal, selected_link);
    let lines = wrap_lines(rendered.lines, layout.transcript.width as usize);

    app.viewport_rows = layout.transcript.height as usize;
    app.terminal.scroll_mut().update_extent(lines.len(), app.viewport_rows);
    app.state.set_links(rendered.links);
    TranscriptPane::new(&lines, app.terminal.scroll().scroll_top()).render(frame, layout.transcript);

    if let Some(menu) = layout.menu {
        CommandMenu::new((focus == Focus::Menu).then_some(app.state.menu_selected)).render(frame, menu);
    }
    if let Some(chat) = layout.chat {
        ChatView::new(&app.state.chat, focus == Focus::Chat).render(frame, chat);
    }

    let history = app.terminal.input().history_position(app.terminal.transcript().commands().len());
    PromptLine::new(app.terminal.prompt(), app.terminal.input(), focus == Focus::Input)
        .with_history(history)
        .render(frame, layout.input);

    Footer::new(app.state.focus, app.state.notice.as_deref()).render(frame, layout.footer);
}
