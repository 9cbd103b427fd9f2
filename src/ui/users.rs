use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{AppState, Focus};

pub fn render_users_list(f: &mut Frame, area: Rect, app: &AppState) {
    let users = &app.view().users;
    let border = if app.focus == Focus::List { app.theme.title } else { app.theme.border };
    let block = Block::default()
        .title(format!("Users List ({})", users.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    if users.is_empty() {
        let msg = if app.is_busy() { "Loading..." } else { "No users found. Add your first user!" };
        let p = Paragraph::new(msg).style(Style::default().fg(app.theme.muted)).block(block);
        f.render_widget(p, area);
        return;
    }

    // Keep the selected row on screen.
    let body_height = (area.height.saturating_sub(3) as usize).max(1);
    let start = (app.selected_index / body_height) * body_height;
    let end = (start + body_height).min(users.len());

    let rows = users[start..end].iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.id.to_string()),
        ])
        .style(style)
    });

    let widths = [Constraint::Percentage(30), Constraint::Percentage(40), Constraint::Percentage(30)];
    let header = Row::new(vec!["NAME", "EMAIL", "ID"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}
