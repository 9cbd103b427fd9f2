//! Add/edit form pane.
//!
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus, FormField};

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.view();
    let form = &view.form;
    let active = app.focus == Focus::Form;
    let title = if view.is_editing() { "Edit User" } else { "Add New User" };

    let field_line = |label: &'static str, value: &str, placeholder: &'static str, field: FormField| {
        let focused = active && form.focused == field;
        let marker = if focused { "▶ " } else { "  " };
        let value_span = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(app.theme.muted))
        } else {
            Span::styled(value.to_string(), Style::default().fg(app.theme.text))
        };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
            value_span,
        ];
        if focused {
            spans.push(Span::styled("_", Style::default().fg(app.theme.highlight_fg)));
        }
        Line::from(spans)
    };

    let submit = if app.is_busy() {
        "Loading...".to_string()
    } else if view.is_editing() {
        "[Enter] Update User".to_string()
    } else {
        "[Enter] Add User".to_string()
    };

    let mut lines = vec![
        field_line("Full Name", &form.name, "Enter full name", FormField::Name),
        Line::raw(""),
        field_line("Email Address", &form.email, "Enter email address", FormField::Email),
        Line::raw(""),
        Line::from(Span::styled(submit, Style::default().fg(app.theme.highlight_fg))),
    ];
    if view.is_editing() {
        lines.push(Line::styled("[Esc] Cancel", Style::default().fg(app.theme.muted)));
    }

    let border = if active { app.theme.title } else { app.theme.border };
    let p = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
