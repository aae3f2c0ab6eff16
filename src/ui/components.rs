//! UI Components and Layout Module
//!
//! Reusable pieces shared by the editor and generator pages: the bottom
//! navigation bar with context-aware shortcuts, the transient status line,
//! and the centered overlays used for prompts and confirmations.

use crate::app::{App, AppState, ConfirmationState, InputMode};
use crate::ui::colors::Mocha;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

/// Renders the bottom navigation bar: current location on the left and the
/// keyboard shortcuts relevant to the current mode on the right.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(area);

    let location = match app.state {
        AppState::Editor => format!(
            " xrforge › {} ({}) ",
            app.current_category.title(),
            app.current_experiences().len()
        ),
        AppState::Generator => String::from(" xrforge › Generator "),
    };

    let left_content = Paragraph::new(location)
        .alignment(Alignment::Left)
        .style(Style::default().fg(Mocha::SUBTEXT))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Mocha::SURFACE)),
        );

    let right_content = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Mocha::OVERLAY))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Mocha::SURFACE)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn get_context_shortcuts(app: &App) -> String {
    if app.confirmation_state != ConfirmationState::None {
        return String::from(" [y] Confirm │ [n/Esc] Cancel ");
    }

    match (&app.state, &app.input_mode) {
        (
            _,
            InputMode::EditValue
            | InputMode::ImportPath
            | InputMode::ExportPath
            | InputMode::GeneratorValue
            | InputMode::GeneratorOutput,
        ) => String::from(" [⏎] Apply │ [Esc] Cancel "),
        (_, InputMode::ToggleTypes) => String::from(" [a/m/v] Toggle type │ [Esc] Done "),
        (_, InputMode::Reorder) => String::from(" [↑↓] Move │ [⏎/Esc] Drop "),
        (_, InputMode::HelpMenu) => String::from(" [Esc/?] Close help "),
        (AppState::Editor, InputMode::Normal) => String::from(
            " [⇥] Category │ [a]dd [d]el [⏎] Edit [t]ypes [m]ove │ [s]ave [x]port [i]mport [g]en │ [?] Help [q]uit ",
        ),
        (AppState::Generator, InputMode::Normal) => {
            String::from(" [↑↓] Option │ [⏎] Edit/Apply │ [Esc] Back │ [q]uit ")
        }
    }
}

/// Renders the transient status line. Errors win over successes; with no
/// message pending, an unsaved-changes hint is shown instead.
pub fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(ref message) = app.error_message {
        (
            format!(" ✗ {}", message),
            Style::default().fg(Mocha::RED).bold(),
        )
    } else if let Some(ref message) = app.success_message {
        (
            format!(" ✓ {}", message),
            Style::default().fg(Mocha::GREEN),
        )
    } else if app.dirty {
        (
            String::from(" ● Unsaved changes — press [s] to save"),
            Style::default().fg(Mocha::YELLOW),
        )
    } else {
        (String::new(), Style::default().fg(Mocha::OVERLAY))
    };

    Paragraph::new(text)
        .style(style)
        .render(area, frame.buffer_mut());
}

/// Fixed-size rectangle centered in `area`, clamped to its bounds.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Renders a single-line input overlay fed from the app's input buffer.
pub fn render_input_prompt(frame: &mut Frame, title: &str, app: &App) {
    let area = centered_rect(64, 3, frame.area());

    Clear.render(area, frame.buffer_mut());

    let input = Paragraph::new(Line::from(vec![
        Span::styled(" ❯ ", Style::default().fg(Mocha::MAUVE)),
        Span::styled(app.input_buffer.clone(), Style::default().fg(Mocha::TEXT)),
        Span::styled("█", Style::default().fg(Mocha::LAVENDER)),
    ]))
    .block(
        Block::bordered()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Mocha::LAVENDER).bg(Mocha::BASE)),
    );

    input.render(area, frame.buffer_mut());
}

/// Renders the pending-deletion confirmation dialog, if any.
pub fn render_confirmation(frame: &mut Frame, app: &App) {
    let ConfirmationState::DeleteExperience { ref id } = app.confirmation_state else {
        return;
    };

    let title = app
        .catalog
        .find_experience(id)
        .map(|(_, exp)| exp.title.clone())
        .unwrap_or_else(|| id.clone());

    let area = centered_rect(50, 5, frame.area());
    Clear.render(area, frame.buffer_mut());

    let dialog = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Delete \"{}\"?", title),
            Style::default().fg(Mocha::TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This cannot be undone. [y] delete │ [n] keep",
            Style::default().fg(Mocha::SUBTEXT),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .title(" Confirm deletion ")
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Mocha::RED).bg(Mocha::BASE)),
    );

    dialog.render(area, frame.buffer_mut());
}
