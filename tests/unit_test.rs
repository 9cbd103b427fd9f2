// Unit tests for user-admin-tui
// The controller and key handling run against an in-memory backend.

use std::cell::RefCell;
use std::rc::Rc;

use user_admin_tui::api::{HealthReport, UserDraft, UserId, UserRecord, UsersApi};
use user_admin_tui::error::ApiError;

#[derive(Default)]
struct FakeBackend {
    users: Vec<UserRecord>,
    next_id: u64,
    requests: Vec<String>,
    offline: bool,
    health_down: bool,
}

/// Cloneable handle so tests can inspect the backend after handing it over.
#[derive(Clone, Default)]
struct FakeApi(Rc<RefCell<FakeBackend>>);

impl FakeApi {
    fn with_users(users: &[(&str, &str)]) -> Self {
        let api = Self::default();
        for (name, email) in users {
            api.create_user(&UserDraft { name: name.to_string(), email: email.to_string() })
                .expect("seed");
        }
        api.0.borrow_mut().requests.clear();
        api
    }

    fn requests(&self) -> Vec<String> {
        self.0.borrow().requests.clone()
    }

    fn set_offline(&self, offline: bool) {
        self.0.borrow_mut().offline = offline;
    }

    fn record(&self, req: String) -> Result<(), ApiError> {
        let mut b = self.0.borrow_mut();
        b.requests.push(req);
        if b.offline {
            Err(ApiError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl UsersApi for FakeApi {
    fn health(&self) -> Result<HealthReport, ApiError> {
        self.record("GET /api/health".into())?;
        if self.0.borrow().health_down {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(HealthReport { status: "OK".into() })
    }

    fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.record("GET /api/users".into())?;
        Ok(self.0.borrow().users.clone())
    }

    fn create_user(&self, draft: &UserDraft) -> Result<(), ApiError> {
        self.record(format!("POST /api/users {} {}", draft.name, draft.email))?;
        let mut b = self.0.borrow_mut();
        b.next_id += 1;
        let id = UserId::new(b.next_id.to_string());
        b.users.push(UserRecord { id, name: draft.name.clone(), email: draft.email.clone() });
        Ok(())
    }

    fn update_user(&self, id: &UserId, draft: &UserDraft) -> Result<(), ApiError> {
        self.record(format!("PUT /api/users/{id}"))?;
        let mut b = self.0.borrow_mut();
        match b.users.iter_mut().find(|u| &u.id == id) {
            Some(u) => {
                u.name = draft.name.clone();
                u.email = draft.email.clone();
                Ok(())
            }
            None => Err(ApiError::Status { status: 404, url: format!("/api/users/{id}") }),
        }
    }

    fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.record(format!("DELETE /api/users/{id}"))?;
        self.0.borrow_mut().users.retain(|u| &u.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod controller_tests {
    use super::*;
    use user_admin_tui::app::controller::Controller;
    use user_admin_tui::app::{FormField, HealthStatus};

    fn record(id: &str, name: &str, email: &str) -> UserRecord {
        UserRecord { id: UserId::from(id), name: name.into(), email: email.into() }
    }

    #[test]
    fn test_create_on_empty_collection() {
        let api = FakeApi::default();
        let mut c = Controller::new(api.clone());
        c.load_collection();
        assert!(c.state().users.is_empty());

        c.create_record("Ann", "a@x.com");

        assert_eq!(c.state().users, vec![record("1", "Ann", "a@x.com")]);
        assert!(c.state().form.is_empty());
        assert!(!c.state().loading);
    }

    #[test]
    fn test_create_adds_exactly_one_matching_record() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com"), ("Cy", "c@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        let before = c.state().users.len();

        c.create_record("  Dee ", " d@x.com  ");

        let users = &c.state().users;
        assert_eq!(users.len(), before + 1);
        assert_eq!(users.iter().filter(|u| u.name == "Dee" && u.email == "d@x.com").count(), 1);
        assert_eq!(
            api.requests(),
            vec!["GET /api/users", "POST /api/users Dee d@x.com", "GET /api/users"]
        );
    }

    #[test]
    fn test_create_with_blank_field_sends_nothing() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        let before = c.state().users.clone();
        c.state_mut().form.name = "Ann".into();
        c.state_mut().form.email = "   ".into();

        c.create_record("Ann", "   ");
        c.create_record("", "a@x.com");

        assert_eq!(api.requests(), vec!["GET /api/users"]);
        assert_eq!(c.state().users, before);
        // The form keeps what was typed.
        assert_eq!(c.state().form.name, "Ann");
    }

    #[test]
    fn test_create_failure_still_clears_form_and_resyncs() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        c.state_mut().form.name = "Ann".into();
        c.state_mut().form.email = "a@x.com".into();
        api.set_offline(true);

        c.submit();

        assert!(c.state().form.is_empty());
        assert_eq!(c.state().users.len(), 1);
        assert_eq!(api.requests().last().map(String::as_str), Some("GET /api/users"));
        assert!(!c.state().loading);
    }

    #[test]
    fn test_failed_load_keeps_previous_collection() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        api.set_offline(true);

        c.load_collection();

        assert_eq!(c.state().users, vec![record("1", "Bob", "b@x.com")]);
        assert!(!c.state().loading);
    }

    #[test]
    fn test_delete_removes_record_after_resync() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com"), ("Cy", "c@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();

        c.delete_record(&UserId::from("1"));

        assert!(c.state().users.iter().all(|u| u.id.as_str() != "1"));
        assert_eq!(c.state().users.len(), 1);
        assert_eq!(
            api.requests(),
            vec!["GET /api/users", "DELETE /api/users/1", "GET /api/users"]
        );
    }

    #[test]
    fn test_delete_ignores_loading_flag() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        c.state_mut().loading = true;

        c.delete_record(&UserId::from("1"));

        assert!(c.state().users.is_empty());
    }

    #[test]
    fn test_enter_then_exit_edit_mode_restores_create_mode() {
        let mut c = Controller::new(FakeApi::default());
        c.enter_edit_mode(record("7", "Ann", "a@x.com"));
        assert!(c.state().is_editing());
        assert_eq!(c.state().form.name, "Ann");
        assert_eq!(c.state().form.email, "a@x.com");

        c.exit_edit_mode();

        assert!(c.state().edit_target.is_none());
        assert!(c.state().form.is_empty());
    }

    #[test]
    fn test_submit_in_edit_mode_updates_target() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        let bob = c.state().users[0].clone();
        c.enter_edit_mode(bob);
        c.state_mut().form.name = "Robert".into();

        c.submit();

        assert_eq!(c.state().users, vec![record("1", "Robert", "b@x.com")]);
        assert!(c.state().edit_target.is_none());
        assert!(c.state().form.is_empty());
        assert!(api.requests().contains(&"PUT /api/users/1".to_string()));
    }

    #[test]
    fn test_update_failure_clears_edit_target() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.load_collection();
        c.enter_edit_mode(record("99", "Ghost", "g@x.com"));

        c.submit();

        assert!(c.state().edit_target.is_none());
        assert_eq!(c.state().users, vec![record("1", "Bob", "b@x.com")]);
    }

    #[test]
    fn test_update_with_blank_field_keeps_edit_mode() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut c = Controller::new(api.clone());
        c.enter_edit_mode(record("1", "Bob", "b@x.com"));
        c.state_mut().form.email.clear();

        c.submit();

        assert!(c.state().is_editing());
        assert!(api.requests().is_empty());
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let api = FakeApi::default();
        let mut c = Controller::new(api.clone());
        c.state_mut().form.name = "Ann".into();
        c.state_mut().form.email = "a@x.com".into();
        c.state_mut().loading = true;

        c.submit();

        assert!(api.requests().is_empty());
        assert_eq!(c.state().form.name, "Ann");
    }

    #[test]
    fn test_probe_health_reachable_and_unreachable() {
        let api = FakeApi::default();
        let mut c = Controller::new(api.clone());
        assert_eq!(c.state().health, HealthStatus::Unknown);
        c.probe_health();
        assert_eq!(c.state().health, HealthStatus::Reachable("OK".into()));

        api.0.borrow_mut().health_down = true;
        let mut c = Controller::new(api);
        c.probe_health();
        assert_eq!(c.state().health, HealthStatus::Unreachable);
        assert_eq!(c.state().health.label(), "unreachable");
    }

    #[test]
    fn test_blank_health_status_shows_reachable() {
        assert_eq!(HealthStatus::Reachable(String::new()).label(), "reachable");
        assert_eq!(HealthStatus::Reachable("  ".into()).label(), "reachable");
        assert_eq!(HealthStatus::Reachable("OK".into()).label(), "OK");
        assert_eq!(HealthStatus::Unknown.label(), "Checking...");
    }

    #[test]
    fn test_form_typing_follows_focused_field() {
        let mut c = Controller::new(FakeApi::default());
        let form = &mut c.state_mut().form;
        for ch in "Al".chars() {
            form.push_char(ch);
        }
        form.toggle_field();
        assert_eq!(form.focused, FormField::Email);
        for ch in "a@".chars() {
            form.push_char(ch);
        }
        form.backspace();
        assert_eq!(form.name, "Al");
        assert_eq!(form.email, "a");
    }
}

#[cfg(test)]
mod app_tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use user_admin_tui::app::keymap::Keymap;
    use user_admin_tui::app::update::handle_key;
    use user_admin_tui::app::{AppState, Focus, HealthStatus, PendingAction};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            handle_key(app, key(KeyCode::Char(ch)));
        }
    }

    fn started(api: &FakeApi) -> AppState {
        let mut app = AppState::new(Box::new(api.clone()), Keymap::default());
        app.drain_pending();
        app
    }

    #[test]
    fn test_startup_queues_probe_and_load() {
        let app = AppState::new(Box::new(FakeApi::default()), Keymap::default());
        assert_eq!(
            app.pending.iter().cloned().collect::<Vec<_>>(),
            vec![PendingAction::ProbeHealth, PendingAction::LoadCollection]
        );
        assert!(app.is_busy());
    }

    #[test]
    fn test_unreachable_health_does_not_block_load() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        api.0.borrow_mut().health_down = true;

        let app = started(&api);

        assert_eq!(app.view().health, HealthStatus::Unreachable);
        assert_eq!(app.view().users.len(), 1);
        assert!(api.requests().contains(&"GET /api/users".to_string()));
    }

    #[test]
    fn test_form_submit_via_keys() {
        let api = FakeApi::default();
        let mut app = started(&api);
        assert_eq!(app.focus, Focus::Form);

        type_text(&mut app, "Ann");
        handle_key(&mut app, key(KeyCode::Down));
        type_text(&mut app, "a@x.com");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.is_busy());
        // A second Enter before the queued submit runs is dropped.
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.pending.len(), 1);

        app.drain_pending();

        assert_eq!(app.view().users.len(), 1);
        assert_eq!(app.view().users[0].name, "Ann");
        assert!(app.view().form.is_empty());
    }

    #[test]
    fn test_q_types_into_form_but_quits_from_list() {
        let mut app = started(&FakeApi::default());
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.view().form.name, "q");

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::List);
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = started(&FakeApi::default());
        assert!(handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_edit_and_cancel_from_list() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com"), ("Cy", "c@x.com")]);
        let mut app = started(&api);
        app.focus = Focus::List;

        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.focus, Focus::Form);
        assert_eq!(app.view().edit_target.as_ref().map(|u| u.name.as_str()), Some("Cy"));
        assert_eq!(app.view().form.email, "c@x.com");

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.view().is_editing());
        assert!(app.view().form.is_empty());
    }

    #[test]
    fn test_delete_selected_and_clamp_selection() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com"), ("Cy", "c@x.com")]);
        let mut app = started(&api);
        app.focus = Focus::List;
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Delete));
        assert_eq!(app.pending.front(), Some(&PendingAction::Delete(UserId::from("2"))));
        app.drain_pending();

        assert_eq!(app.view().users.len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_new_user_leaves_edit_mode() {
        let api = FakeApi::with_users(&[("Bob", "b@x.com")]);
        let mut app = started(&api);
        app.focus = Focus::List;
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Tab));
        assert!(app.view().is_editing());

        handle_key(&mut app, key(KeyCode::Char('n')));

        assert!(!app.view().is_editing());
        assert_eq!(app.focus, Focus::Form);
    }

    #[test]
    fn test_help_modal_swallows_keys() {
        let mut app = started(&FakeApi::default());
        app.focus = Focus::List;
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(!handle_key(&mut app, key(KeyCode::Char('r'))));
        assert!(app.pending.is_empty());
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }
}

#[cfg(test)]
mod keymap_tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use user_admin_tui::app::keymap::{KeyAction, Keymap};

    #[test]
    fn test_default_bindings() {
        let km = Keymap::default();
        let resolve = |code| km.resolve(&KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(resolve(KeyCode::Char('q')), Some(KeyAction::Quit));
        assert_eq!(resolve(KeyCode::Delete), Some(KeyAction::DeleteSelection));
        assert_eq!(resolve(KeyCode::Char('d')), Some(KeyAction::DeleteSelection));
        assert_eq!(resolve(KeyCode::Enter), Some(KeyAction::EditSelection));
        assert_eq!(resolve(KeyCode::Char('r')), Some(KeyAction::Reload));
        assert_eq!(resolve(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut path = std::env::temp_dir();
        path.push(format!("uat_keybinds_{}.conf", std::process::id()));
        std::fs::write(
            &path,
            "# custom\nDeleteSelection = x\nQuit = Ctrl+q\nNotAnAction = y\nReload = F5\n",
        )
        .expect("write keybinds");

        let km = Keymap::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            km.resolve(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(KeyAction::DeleteSelection)
        );
        assert_eq!(
            km.resolve(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        // Defaults survive.
        assert_eq!(
            km.resolve(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        assert!(Keymap::from_file("/nonexistent/uat/keybinds.conf").is_none());
        let km = Keymap::load("/nonexistent/uat/keybinds.conf");
        assert_eq!(km.all_bindings().len(), Keymap::default().all_bindings().len());
    }

    #[test]
    fn test_format_key() {
        assert_eq!(Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('q')), "Ctrl+q");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::Delete), "Delete");
    }
}

#[cfg(test)]
mod wire_tests {
    use user_admin_tui::api::{UserDraft, UserRecord};

    #[test]
    fn test_record_accepts_underscore_id_and_numbers() {
        let users: Vec<UserRecord> = serde_json::from_str(
            r#"[{"_id":"65a1f0","name":"Ann","email":"a@x.com","__v":0},
                {"id":1,"name":"Bob","email":"b@x.com"}]"#,
        )
        .expect("parse users");
        assert_eq!(users[0].id.as_str(), "65a1f0");
        assert_eq!(users[1].id.as_str(), "1");
    }

    #[test]
    fn test_record_with_both_id_keys_prefers_id() {
        let users: Vec<UserRecord> = serde_json::from_str(
            r#"[{"_id":"65a1f0","id":"65a1f0","name":"Ann","email":"a@x.com"},
                {"id":"v-2","_id":"raw-2","name":"Bob","email":"b@x.com"}]"#,
        )
        .expect("parse users");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id.as_str(), "65a1f0");
        assert_eq!(users[0].name, "Ann");
        assert_eq!(users[1].id.as_str(), "v-2");
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let parsed = serde_json::from_str::<UserRecord>(r#"{"name":"Ann","email":"a@x.com"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_draft_trims_and_rejects_blank() {
        assert_eq!(
            UserDraft::from_input(" Ann ", "a@x.com\n"),
            Some(UserDraft { name: "Ann".into(), email: "a@x.com".into() })
        );
        assert_eq!(UserDraft::from_input("Ann", "  "), None);
        assert_eq!(UserDraft::from_input("", "a@x.com"), None);
    }

    #[test]
    fn test_draft_body_has_only_name_and_email() {
        let body = serde_json::to_value(UserDraft { name: "Ann".into(), email: "a@x.com".into() })
            .expect("serialize");
        assert_eq!(body, serde_json::json!({"name": "Ann", "email": "a@x.com"}));
    }
}
