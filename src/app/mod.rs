//! Application state types and entry glue.
//!
//! `AppState` wraps the [`Controller`] with what only the terminal front end
//! needs: focus, list selection, keymap, theme and the queue of network
//! actions waiting for the next frame.
//!
pub mod controller;
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::collections::VecDeque;

use crate::api::{UserId, UserRecord, UsersApi};
use controller::Controller;
use keymap::Keymap;

pub use controller::{FormField, FormState, HealthStatus, ViewState};

/// Which pane receives key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

/// Color palette for the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub online: Color,
    pub offline: Color,
}

impl Theme {
    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            online: Color::Rgb(0xa6, 0xe3, 0xa1),       // green
            offline: Color::Rgb(0xf3, 0x8b, 0xa8),      // red
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

/// Network work queued by key handlers, run by the loop after the next draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    ProbeHealth,
    LoadCollection,
    Submit,
    Delete(UserId),
}

pub struct AppState {
    pub controller: Controller<Box<dyn UsersApi>>,
    pub focus: Focus,
    pub selected_index: usize,
    pub keymap: Keymap,
    pub theme: Theme,
    pub show_help: bool,
    pub pending: VecDeque<PendingAction>,
}

impl AppState {
    /// Fresh state with the startup probe and collection load queued.
    pub fn new(api: Box<dyn UsersApi>, keymap: Keymap) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(PendingAction::ProbeHealth);
        pending.push_back(PendingAction::LoadCollection);
        Self {
            controller: Controller::new(api),
            focus: Focus::Form,
            selected_index: 0,
            keymap,
            theme: Theme::default(),
            show_help: false,
            pending,
        }
    }

    pub fn view(&self) -> &ViewState {
        self.controller.state()
    }

    /// True while a request runs or a submit/load is waiting for its frame.
    ///
    /// Deletes and the health probe do not count.
    pub fn is_busy(&self) -> bool {
        self.view().loading
            || self
                .pending
                .iter()
                .any(|a| matches!(a, PendingAction::Submit | PendingAction::LoadCollection))
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.view().users.get(self.selected_index)
    }

    /// Keep the selection inside the current collection.
    pub fn clamp_selection(&mut self) {
        let len = self.view().users.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Run one queued action against the backend.
    pub fn perform(&mut self, action: PendingAction) {
        tracing::debug!(?action, "performing");
        match action {
            PendingAction::ProbeHealth => self.controller.probe_health(),
            PendingAction::LoadCollection => self.controller.load_collection(),
            PendingAction::Submit => self.controller.submit(),
            PendingAction::Delete(id) => self.controller.delete_record(&id),
        }
        self.clamp_selection();
    }

    /// Perform every queued action in order.
    pub fn drain_pending(&mut self) {
        while let Some(action) = self.pending.pop_front() {
            self.perform(action);
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
