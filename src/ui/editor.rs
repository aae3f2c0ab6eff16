//! Catalog Editor Page
//!
//! Main editing surface: category tabs across the top, the experience list
//! on the left, and the field-by-field detail pane on the right. All
//! mutation flows through key handlers into the catalog operations; this
//! module only draws.

use crate::app::{App, EditableField, InputMode};
use crate::models::CategoryKey;
use crate::ui::colors::Mocha;
use crate::ui::components;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

pub fn render(frame: &mut Frame, app: &App) {
    let main_area = frame.area();

    let block = Block::bordered()
        .title(" xrforge — WebXR Catalog Editor ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Mocha::SURFACE));

    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let main_chunks = Layout::vertical([
        Constraint::Length(2), // Category tabs
        Constraint::Fill(1),   // List + details
        Constraint::Length(1), // Status line
        Constraint::Length(3), // Bottom navigation bar
    ])
    .split(inner_area);

    render_category_tabs(frame, main_chunks[0], app);

    let content_chunks =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[1]);

    render_experience_list(frame, content_chunks[0], app);
    render_detail_pane(frame, content_chunks[1], app);

    components::render_status_line(frame, main_chunks[2], app);
    components::render_bottom_bar(frame, main_chunks[3], app);

    render_overlays(frame, app);
}

fn render_category_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    for (key, category) in app.catalog.menu.entries() {
        let label = format!(" {} ({}) ", category.title, category.experiences.len());
        let style = if key == app.current_category {
            Style::default().fg(Mocha::BASE).bg(Mocha::MAUVE).bold()
        } else {
            Style::default().fg(Mocha::SUBTEXT)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }

    Paragraph::new(Line::from(spans)).render(area, frame.buffer_mut());
}

fn render_experience_list(frame: &mut Frame, area: Rect, app: &App) {
    let reordering = app.input_mode == InputMode::Reorder;

    let border_style = if reordering {
        Style::default().fg(Mocha::PEACH)
    } else {
        Style::default().fg(Mocha::SURFACE)
    };

    let title = if reordering {
        " Experiences (moving) "
    } else {
        " Experiences "
    };

    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .style(border_style);

    let experiences = app.current_experiences();

    if experiences.is_empty() {
        let empty = Paragraph::new("\nNo experiences in this category.\n\nPress [a] to add one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Mocha::OVERLAY).italic())
            .block(block);
        empty.render(area, frame.buffer_mut());
        return;
    }

    let items: Vec<ListItem> = experiences
        .iter()
        .map(|exp| {
            let types = exp
                .experience_types
                .iter()
                .map(|ty| ty.label())
                .collect::<Vec<_>>()
                .join("/");
            let marker = if exp.is_external { " 🌐" } else { "" };

            ListItem::new(Line::from(vec![
                Span::styled(exp.title.clone(), Style::default().fg(Mocha::TEXT)),
                Span::styled(
                    format!("  [{}]{}", types, marker),
                    Style::default().fg(Mocha::TEAL),
                ),
            ]))
        })
        .collect();

    let highlight = if reordering {
        Style::default().fg(Mocha::BASE).bg(Mocha::PEACH)
    } else {
        Style::default().fg(Mocha::BASE).bg(Mocha::LAVENDER)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(" ❯ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut state);
}

fn render_detail_pane(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(" Details ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Mocha::SURFACE));

    let Some(experience) = app.selected_experience() else {
        let placeholder = Paragraph::new("\nSelect an experience to edit its fields.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Mocha::OVERLAY).italic())
            .block(block);
        placeholder.render(area, frame.buffer_mut());
        return;
    };

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(" id ", Style::default().fg(Mocha::OVERLAY)),
        Span::styled(experience.id.clone(), Style::default().fg(Mocha::OVERLAY)),
    ]));
    lines.push(render_type_line(app, experience.experience_types.as_slice()));
    lines.push(Line::from(""));

    for (index, field) in EditableField::ALL.iter().enumerate() {
        let selected = index == app.selected_field;
        let value = field.current_value(experience);

        let label_style = if selected {
            Style::default().fg(Mocha::BASE).bg(Mocha::LAVENDER).bold()
        } else {
            Style::default().fg(Mocha::SUBTEXT)
        };

        let shown_value = if selected && app.input_mode == InputMode::EditValue {
            format!("{}█", app.input_buffer)
        } else if value.is_empty() {
            String::from("—")
        } else {
            value
        };

        let value_style = if selected && app.input_mode == InputMode::EditValue {
            Style::default().fg(Mocha::YELLOW)
        } else {
            Style::default().fg(Mocha::TEXT)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<14}", field.label()), label_style),
            Span::raw(" "),
            Span::styled(shown_value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            " created {}  ·  updated {}",
            experience.created_at.format("%Y-%m-%d %H:%M"),
            experience.updated_at.format("%Y-%m-%d %H:%M")
        ),
        Style::default().fg(Mocha::OVERLAY),
    )));

    Paragraph::new(lines)
        .block(block)
        .render(area, frame.buffer_mut());
}

/// Type membership line; highlighted while the toggle mode is active. The
/// last remaining type cannot be removed, which the handler surfaces as a
/// status message when refused.
fn render_type_line(app: &App, types: &[CategoryKey]) -> Line<'static> {
    let toggling = app.input_mode == InputMode::ToggleTypes;
    let mut spans = vec![Span::styled(
        " types ",
        if toggling {
            Style::default().fg(Mocha::BASE).bg(Mocha::PEACH).bold()
        } else {
            Style::default().fg(Mocha::OVERLAY)
        },
    )];

    for key in CategoryKey::ALL {
        let member = types.contains(&key);
        let marker = if member { "☑" } else { "☐" };
        let style = if member {
            Style::default().fg(Mocha::GREEN)
        } else {
            Style::default().fg(Mocha::OVERLAY)
        };
        spans.push(Span::styled(format!(" {} {}", marker, key.label()), style));
    }

    if toggling {
        spans.push(Span::styled(
            "  (a/m/v)",
            Style::default().fg(Mocha::PEACH),
        ));
    }

    Line::from(spans)
}

fn render_overlays(frame: &mut Frame, app: &App) {
    // Value edits are drawn inline in the detail pane; only the path
    // prompts get a popup.
    match app.input_mode {
        InputMode::ImportPath => {
            components::render_input_prompt(frame, "Import catalog from file", app);
        }
        InputMode::ExportPath => {
            components::render_input_prompt(frame, "Export catalog to file", app);
        }
        _ => {}
    }

    components::render_confirmation(frame, app);
}
