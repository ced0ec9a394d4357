use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout breakpoints for the portfolio terminal
///
/// - >= 100 cols: command menu beside the transcript
/// - < 100 cols: transcript only, the menu is reachable with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Full,
    Compact,
}

impl From<u16> for LayoutMode {
    fn from(width: u16) -> Self {
        match width {
            w if w >= 100 => Self::Full,
            _ => Self::Compact,
        }
    }
}

impl LayoutMode {
    pub fn has_menu(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Width of the side menu in full mode
pub const MENU_WIDTH: u16 = 36;

/// Calculated layout for one frame
#[derive(Debug, Clone)]
pub struct TuiLayout {
    pub mode: LayoutMode,
    /// Title bar (1 line)
    pub header: Rect,
    /// Scrolling transcript
    pub transcript: Rect,
    /// Command menu, when shown
    pub menu: Option<Rect>,
    /// Chat companion panel, when open
    pub chat: Option<Rect>,
    /// Prompt line
    pub input: Rect,
    /// Key hints and notices (1 line)
    pub footer: Rect,
}

impl TuiLayout {
    /// `menu_visible` forces the menu on narrow terminals (menu focus)
    pub fn calculate(area: Rect, menu_visible: bool, chat_open: bool) -> Self {
        let mode = LayoutMode::from(area.width);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let header = rows[0];
        let main = rows[1];
        let input = rows[2];
        let footer = rows[3];

        let show_menu = mode.has_menu() || menu_visible;
        let menu_width = if show_menu { MENU_WIDTH.min(main.width / 2) } else { 0 };
        let chat_width =
            if chat_open { (main.width / 3).max(30).min(main.width.saturating_sub(menu_width) / 2) } else { 0 };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(menu_width), Constraint::Min(0), Constraint::Length(chat_width)])
            .split(main);

        let menu = (menu_width > 0).then_some(columns[0]);
        let chat = (chat_width > 0).then_some(columns[2]);

        Self { mode, header, transcript: columns[1], menu, chat, input, footer }
    }
}
