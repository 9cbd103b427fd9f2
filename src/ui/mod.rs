pub mod components;
pub mod form;
pub mod users;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, HealthStatus};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(root[1]);

    let health = &app.view().health;
    let dot_color = match health {
        HealthStatus::Reachable(_) => app.theme.online,
        HealthStatus::Unreachable => app.theme.offline,
        HealthStatus::Unknown => app.theme.muted,
    };
    let header = Line::from(vec![
        Span::styled(
            "User Management System",
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::raw(format!("backend: {}", health.label())),
    ]);
    let p = Paragraph::new(header)
        .block(
            Block::default()
                .title("user-admin-tui")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    form::render_form(f, body[0], app);
    users::render_users_list(f, body[1], app);
    components::render_status_bar(f, root[2], app);

    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
}
