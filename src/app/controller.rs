//! View-state controller: the user collection, the form, and the requests
//! that keep them in sync with the backend.
//!
//! Every operation here runs to completion before returning. Request failures
//! are logged and otherwise swallowed; the collection shown is always the last
//! list the backend returned.
//!
use crate::api::{UserDraft, UserId, UserRecord, UsersApi};

/// Which form input receives typed characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
}

/// Scratch buffer shared by the create and edit flows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub focused: FormField,
}

impl FormState {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
    }

    pub fn toggle_field(&mut self) {
        self.focused = match self.focused {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Name,
        };
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
        }
    }
}

/// Result of the one-shot liveness probe.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    /// Carries the `status` string the backend reported.
    Reachable(String),
    Unreachable,
}

impl HealthStatus {
    /// Text shown in the header.
    pub fn label(&self) -> &str {
        match self {
            HealthStatus::Unknown => "Checking...",
            HealthStatus::Reachable(status) if status.trim().is_empty() => "reachable",
            HealthStatus::Reachable(status) => status,
            HealthStatus::Unreachable => "unreachable",
        }
    }
}

/// Everything the screen renders from, owned by the [`Controller`].
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub users: Vec<UserRecord>,
    pub form: FormState,
    /// `Some` puts the form in edit mode for that record.
    pub edit_target: Option<UserRecord>,
    pub loading: bool,
    pub health: HealthStatus,
}

impl ViewState {
    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }
}

pub struct Controller<A> {
    api: A,
    state: ViewState,
}

impl<A: UsersApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Direct access for input handling (typing into the form).
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Replace the collection with the backend's current list.
    ///
    /// On failure the previous collection stays in place.
    pub fn load_collection(&mut self) {
        self.state.loading = true;
        match self.api.list_users() {
            Ok(users) => {
                tracing::debug!(count = users.len(), "synced user collection");
                self.state.users = users;
            }
            Err(err) => tracing::warn!(error = %err, "loading users failed"),
        }
        self.state.loading = false;
    }

    /// Create a user, then clear the form and re-sync.
    ///
    /// Empty (after trimming) name or email sends nothing and keeps the form.
    pub fn create_record(&mut self, name: &str, email: &str) {
        let Some(draft) = UserDraft::from_input(name, email) else {
            tracing::debug!("create ignored: empty name or email");
            return;
        };
        self.state.loading = true;
        if let Err(err) = self.api.create_user(&draft) {
            tracing::warn!(error = %err, name = %draft.name, "creating user failed");
        }
        self.state.form.clear();
        self.state.loading = false;
        self.load_collection();
    }

    /// Update `id`, then clear the form and edit target and re-sync.
    pub fn update_record(&mut self, id: &UserId, name: &str, email: &str) {
        let Some(draft) = UserDraft::from_input(name, email) else {
            tracing::debug!(%id, "update ignored: empty name or email");
            return;
        };
        self.state.loading = true;
        if let Err(err) = self.api.update_user(id, &draft) {
            tracing::warn!(error = %err, %id, "updating user failed");
        }
        self.state.form.clear();
        self.state.edit_target = None;
        self.state.loading = false;
        self.load_collection();
    }

    /// Delete `id` and re-sync. Does not consult the loading flag.
    pub fn delete_record(&mut self, id: &UserId) {
        if let Err(err) = self.api.delete_user(id) {
            tracing::warn!(error = %err, %id, "deleting user failed");
        }
        self.load_collection();
    }

    pub fn enter_edit_mode(&mut self, record: UserRecord) {
        self.state.form = FormState {
            name: record.name.clone(),
            email: record.email.clone(),
            focused: FormField::Name,
        };
        self.state.edit_target = Some(record);
    }

    pub fn exit_edit_mode(&mut self) {
        self.state.edit_target = None;
        self.state.form.clear();
    }

    /// Submit the form: update in edit mode, create otherwise.
    ///
    /// Ignored while a request is outstanding.
    pub fn submit(&mut self) {
        if self.state.loading {
            tracing::debug!("submit ignored: request in flight");
            return;
        }
        let name = self.state.form.name.clone();
        let email = self.state.form.email.clone();
        match self.state.edit_target.as_ref().map(|u| u.id.clone()) {
            Some(id) => self.update_record(&id, &name, &email),
            None => self.create_record(&name, &email),
        }
    }

    /// One-shot reachability check. Independent of the collection.
    pub fn probe_health(&mut self) {
        self.state.health = match self.api.health() {
            Ok(report) => {
                tracing::info!(status = %report.status, "backend reachable");
                HealthStatus::Reachable(report.status)
            }
            Err(err) => {
                tracing::warn!(error = %err, "health probe failed");
                HealthStatus::Unreachable
            }
        };
    }
}
