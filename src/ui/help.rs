//! Help Overlay
//!
//! A centered key-reference popup, toggled with `?` from either page.

use crate::app::{App, AppState};
use crate::ui::colors::Mocha;
use crate::ui::components::centered_rect;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(56, 22, frame.area());

    Clear.render(area, frame.buffer_mut());

    let mut lines = vec![Line::from("")];
    match app.state {
        AppState::Editor => {
            push_section(&mut lines, "Navigation");
            push_key(&mut lines, "Tab / ← →", "switch category");
            push_key(&mut lines, "↑ ↓ / j k", "select experience");
            push_key(&mut lines, "n / p", "next / previous field");
            push_section(&mut lines, "Editing");
            push_key(&mut lines, "a", "add experience");
            push_key(&mut lines, "d", "delete experience");
            push_key(&mut lines, "Enter", "edit selected field");
            push_key(&mut lines, "t", "toggle experience types");
            push_key(&mut lines, "m", "move (reorder) experience");
            push_section(&mut lines, "Data");
            push_key(&mut lines, "s", "save catalog");
            push_key(&mut lines, "x", "export JSON");
            push_key(&mut lines, "i", "import JSON");
            push_key(&mut lines, "g", "open generator");
        }
        AppState::Generator => {
            push_section(&mut lines, "Generator");
            push_key(&mut lines, "↑ ↓ / j k", "select option");
            push_key(&mut lines, "Enter / Space", "edit or toggle option");
            push_key(&mut lines, "Esc", "back to editor");
        }
    }
    push_section(&mut lines, "General");
    push_key(&mut lines, "?", "close this help");
    push_key(&mut lines, "q", "quit");

    let help = Paragraph::new(lines).block(
        Block::bordered()
            .title(" Keyboard Reference ")
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Mocha::LAVENDER)),
    );

    help.render(area, frame.buffer_mut());
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(Mocha::MAUVE).bold(),
    )));
}

fn push_key(lines: &mut Vec<Line<'static>>, key: &str, action: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(Mocha::PEACH)),
        Span::styled(action.to_string(), Style::default().fg(Mocha::TEXT)),
    ]));
}
