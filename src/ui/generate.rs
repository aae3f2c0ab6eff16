//! Generator Options Page
//!
//! Form over the branding options fed to the static-site generator, plus a
//! live preview of the validated theme color. The same `validate_color`
//! the generator uses drives the preview, so what is shown here is exactly
//! what the generated app will use.

use crate::app::{App, GeneratorRow, InputMode};
use crate::generator::{self, GeneratorOptions};
use crate::ui::colors::Mocha;
use crate::ui::components;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

pub fn render(frame: &mut Frame, app: &App) {
    let main_area = frame.area();

    let block = Block::bordered()
        .title(" Generate WebXR App ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Mocha::SURFACE));

    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let main_chunks = Layout::vertical([
        Constraint::Fill(1),   // Options form
        Constraint::Length(4), // Summary of what will be generated
        Constraint::Length(1), // Status line
        Constraint::Length(3), // Bottom navigation bar
    ])
    .split(inner_area);

    let form_area = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(64),
        Constraint::Fill(1),
    ])
    .split(main_chunks[0])[1];

    render_form(frame, form_area, app);
    render_summary(frame, main_chunks[1], app);
    components::render_status_line(frame, main_chunks[2], app);
    components::render_bottom_bar(frame, main_chunks[3], app);

    match app.input_mode {
        InputMode::GeneratorValue => {
            let row = app.generator_row();
            components::render_input_prompt(frame, &format!("Edit {}", row.label()), app);
        }
        InputMode::GeneratorOutput => {
            components::render_input_prompt(frame, "Output path", app);
        }
        _ => {}
    }
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let options = &app.generator_options;
    let mut lines = vec![Line::from("")];

    for (index, row) in GeneratorRow::ALL.iter().enumerate() {
        let selected = index == app.generator_selected;

        let label_style = if selected {
            Style::default().fg(Mocha::BASE).bg(Mocha::LAVENDER).bold()
        } else {
            Style::default().fg(Mocha::SUBTEXT)
        };

        let value = row_value(row, options, app);
        let mut spans = vec![
            Span::styled(format!(" {:<16}", row.label()), label_style),
            Span::raw(" "),
        ];

        match row {
            GeneratorRow::PrimaryColor => {
                let validated = generator::validate_color(&options.primary_color);
                spans.push(Span::styled(value, Style::default().fg(Mocha::TEXT)));
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("■ {}", validated),
                    Style::default().fg(preview_color(validated)),
                ));
                if validated != options.primary_color {
                    spans.push(Span::styled(
                        "  (invalid, falls back)",
                        Style::default().fg(Mocha::RED),
                    ));
                }
            }
            GeneratorRow::Generate => {
                spans.pop();
                spans.pop();
                let style = if selected {
                    Style::default().fg(Mocha::BASE).bg(Mocha::GREEN).bold()
                } else {
                    Style::default().fg(Mocha::GREEN)
                };
                spans.push(Span::styled("  ▶ Generate standalone app  ", style));
            }
            _ => {
                spans.push(Span::styled(value, Style::default().fg(Mocha::TEXT)));
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(
        Block::bordered()
            .title(" Branding options ")
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Mocha::SURFACE)),
    );

    form.render(area, frame.buffer_mut());
}

fn row_value(row: &GeneratorRow, options: &GeneratorOptions, app: &App) -> String {
    match row {
        GeneratorRow::Title => options.title.clone(),
        GeneratorRow::Description => options.description.clone(),
        GeneratorRow::PrimaryColor => options.primary_color.clone(),
        GeneratorRow::Language => {
            if options.language == "es" {
                String::from("es (Español)")
            } else {
                format!("{} (English)", options.language)
            }
        }
        GeneratorRow::MenuStyle => options.menu_style.to_string(),
        GeneratorRow::IncludeLoadingScreen => {
            if options.include_loading_screen {
                String::from("yes")
            } else {
                String::from("no")
            }
        }
        GeneratorRow::OutputPath => app.output_path.clone(),
        GeneratorRow::Generate => String::new(),
    }
}

/// Best-effort terminal preview of a validated hex color.
fn preview_color(hex: &str) -> ratatui::style::Color {
    let digits = &hex[1..];
    let expand = |pair: &str| u8::from_str_radix(pair, 16).unwrap_or(0);

    let (r, g, b) = if digits.len() == 3 {
        let double = |c: char| expand(&format!("{c}{c}"));
        let mut chars = digits.chars();
        (
            double(chars.next().unwrap_or('0')),
            double(chars.next().unwrap_or('0')),
            double(chars.next().unwrap_or('0')),
        )
    } else {
        (
            expand(&digits[0..2]),
            expand(&digits[2..4]),
            expand(&digits[4..6]),
        )
    };

    ratatui::style::Color::Rgb(r, g, b)
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.catalog.total_experiences();
    let lines = vec![
        Line::from(Span::styled(
            format!(
                " {} experiences across {} categories will be embedded",
                total,
                app.catalog.menu.entries().len()
            ),
            Style::default().fg(Mocha::SUBTEXT),
        )),
        Line::from(Span::styled(
            " Output is a single self-contained HTML document (Three.js + WebXR runtime)",
            Style::default().fg(Mocha::OVERLAY).italic(),
        )),
    ];

    Paragraph::new(lines).render(area, frame.buffer_mut());
}
