//! Account registration dialog.
//!
//! Field validation is pure and mirrors the signup rules of the hosted
//! service: a well-formed email, a password of at least four characters
//! entered twice, and a name of at least two characters. Submission POSTs to
//! `user/register` on the task pool and reports the outcome inline.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;

use crate::api;
use crate::config::AppConfig;
use crate::theme;

const REGISTER_PATH: &str = "user/register";

const MIN_PASSWORD_LEN: usize = 4;
const MIN_NAME_LEN: usize = 2;

/// Dialog state, including the form fields.
#[derive(Resource, Default)]
pub struct RegisterDialog {
    pub is_open: bool,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub is_submitting: bool,
    pub submitted_ok: bool,
    pub error: Option<String>,
}

impl RegisterDialog {
    fn reset_outcome(&mut self) {
        self.is_submitting = false;
        self.submitted_ok = false;
        self.error = None;
    }
}

/// Result of a registration attempt.
pub struct RegisterResult {
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Component)]
pub(crate) struct RegisterTask(Task<RegisterResult>);

/// Email shape check: one `@`, a non-empty local part without whitespace,
/// and a dotted domain with non-empty labels.
pub fn is_email_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

pub fn is_password_valid(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn is_name_valid(name: &str) -> bool {
    name.chars().count() >= MIN_NAME_LEN
}

/// All four signup rules at once.
pub fn is_form_valid(email: &str, password: &str, confirm: &str, name: &str) -> bool {
    is_email_valid(email) && is_password_valid(password) && password == confirm && is_name_valid(name)
}

fn submit_registration(base_url: &str, email: &str, password: &str, name: &str) -> RegisterResult {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "name": name,
    });

    match api::post_json::<serde_json::Value>(base_url, REGISTER_PATH, body) {
        Ok(_) => RegisterResult {
            success: true,
            error: None,
        },
        Err(e) => RegisterResult {
            success: false,
            error: Some(e),
        },
    }
}

pub fn register_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog: ResMut<RegisterDialog>,
    config: Res<AppConfig>,
    mut commands: Commands,
) -> Result {
    if !dialog.is_open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let mut open = true;
    let mut start_submit = false;

    egui::Window::new("Create account")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.set_min_width(320.0);

            egui::Grid::new("register_fields")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Email");
                    ui.text_edit_singleline(&mut dialog.email);
                    ui.end_row();

                    ui.label("Password");
                    ui.add(egui::TextEdit::singleline(&mut dialog.password).password(true));
                    ui.end_row();

                    ui.label("Confirm");
                    ui.add(
                        egui::TextEdit::singleline(&mut dialog.confirm_password).password(true),
                    );
                    ui.end_row();

                    ui.label("Name");
                    ui.text_edit_singleline(&mut dialog.name);
                    ui.end_row();
                });

            // Per-field hints, only for fields the user has started filling.
            if !dialog.email.is_empty() && !is_email_valid(&dialog.email) {
                ui.colored_label(theme::ui::HINT_TEXT, "Email should look like name@example.com");
            }
            if !dialog.password.is_empty() && !is_password_valid(&dialog.password) {
                ui.colored_label(theme::ui::HINT_TEXT, "Password needs at least 4 characters");
            }
            if !dialog.confirm_password.is_empty() && dialog.password != dialog.confirm_password {
                ui.colored_label(theme::ui::HINT_TEXT, "Passwords do not match");
            }
            if !dialog.name.is_empty() && !is_name_valid(&dialog.name) {
                ui.colored_label(theme::ui::HINT_TEXT, "Name needs at least 2 characters");
            }

            ui.add_space(8.0);

            if dialog.is_submitting {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Creating account...");
                });
            } else if dialog.submitted_ok {
                ui.colored_label(theme::ui::SUCCESS_TEXT, "Account created. Welcome!");
            } else {
                if let Some(ref error) = dialog.error {
                    ui.colored_label(theme::ui::ERROR_TEXT, error);
                    ui.add_space(4.0);
                }

                let valid = is_form_valid(
                    &dialog.email,
                    &dialog.password,
                    &dialog.confirm_password,
                    &dialog.name,
                );
                if ui
                    .add_enabled(valid, egui::Button::new("Sign up"))
                    .clicked()
                {
                    start_submit = true;
                }
            }
        });

    if !open {
        dialog.is_open = false;
        dialog.reset_outcome();
    }

    if start_submit {
        dialog.is_submitting = true;
        dialog.error = None;

        let base_url = config.api_base_url();
        let email = dialog.email.clone();
        let password = dialog.password.clone();
        let name = dialog.name.clone();

        let task_pool = AsyncComputeTaskPool::get();
        let task =
            task_pool.spawn(async move { submit_registration(&base_url, &email, &password, &name) });

        commands.spawn(RegisterTask(task));
    }

    Ok(())
}

pub fn poll_register_task(
    mut commands: Commands,
    mut dialog: ResMut<RegisterDialog>,
    mut tasks: Query<(Entity, &mut RegisterTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            dialog.is_submitting = false;
            if result.success {
                info!("Registration succeeded");
                dialog.submitted_ok = true;
                dialog.error = None;
            } else {
                warn!(
                    "Registration failed: {}",
                    result.error.as_deref().unwrap_or("unknown error")
                );
                dialog.error = result.error;
            }
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_common_shapes() {
        assert!(is_email_valid("abc@example.com"));
        assert!(is_email_valid("a.b-c@mail.example.co"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(!is_email_valid(""));
        assert!(!is_email_valid("no-at-sign.com"));
        assert!(!is_email_valid("@example.com"));
        assert!(!is_email_valid("user@"));
        assert!(!is_email_valid("user@nodot"));
        assert!(!is_email_valid("user@domain..com"));
        assert!(!is_email_valid("us er@example.com"));
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(!is_password_valid(""));
        assert!(!is_password_valid("abc"));
        assert!(is_password_valid("abcd"));
    }

    #[test]
    fn test_name_minimum_length() {
        assert!(!is_name_valid("a"));
        assert!(is_name_valid("ab"));
    }

    #[test]
    fn test_form_requires_all_rules() {
        assert!(is_form_valid("a@b.co", "pass", "pass", "Jo"));
        // Each rule broken in turn.
        assert!(!is_form_valid("bad-email", "pass", "pass", "Jo"));
        assert!(!is_form_valid("a@b.co", "abc", "abc", "Jo"));
        assert!(!is_form_valid("a@b.co", "pass", "other", "Jo"));
        assert!(!is_form_valid("a@b.co", "pass", "pass", "J"));
    }
}
