//! Shared UI components (status bar, help modal, layout helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{KeyAction, Keymap, format_action};
use crate::app::{AppState, Focus};

/// Render the bottom status bar with focus, mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let focus = match app.focus {
        Focus::Form => "FORM",
        Focus::List => "LIST",
    };
    let mode = if app.view().is_editing() { "edit" } else { "create" };
    let busy = if app.is_busy() { "  loading..." } else { "" };
    let msg = format!(
        "focus: {focus}  mode: {mode}  users:{}{busy}  ?: help  Ctrl+C: quit",
        app.view().users.len(),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the help modal: form keys plus the list keys from the active keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 24u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    // Group keys by action so rebinding shows up here.
    let mut list_keys: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        if action == KeyAction::Ignore {
            continue;
        }
        list_keys
            .entry(format_action(action))
            .or_default()
            .insert(Keymap::format_key(mods, code));
    }

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let row = |label: String, keys: String| {
        Line::from(vec![
            Span::raw(format!("  {label:>16} │ ")),
            Span::styled(keys, italic),
        ])
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Form:", bold))];
    for (label, keys) in [
        ("Type", "printable keys"),
        ("Delete char", "Backspace"),
        ("Switch field", "Up, Down"),
        ("Submit", "Enter"),
        ("Cancel edit", "Esc"),
        ("Focus list", "Tab"),
    ] {
        lines.push(row(label.to_string(), keys.to_string()));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Users list:", bold)));
    for (label, keys) in list_keys {
        let joined = keys.into_iter().collect::<Vec<_>>().join(", ");
        lines.push(row(label.to_string(), joined));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Close help: "),
        Span::styled("Esc / Enter", italic),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
