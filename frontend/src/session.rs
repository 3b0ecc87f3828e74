//! Browser session helpers: the signed-in user kept in local storage,
//! navigation and confirmation prompts.

use common::model::user::CurrentUser;
use web_sys::Storage;

const CURRENT_USER_KEY: &str = "currentUser";

pub const AUTH_PREFIX: &str = "/auth";
pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn current_user() -> Option<CurrentUser> {
    let raw = storage()?.get_item(CURRENT_USER_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::error!("stored user profile is unreadable: {}", err);
            None
        }
    }
}

pub fn store_user(user: &CurrentUser) {
    let Some(storage) = storage() else {
        log::warn!("local storage unavailable, user not remembered");
        return;
    };
    match serde_json::to_string(user) {
        Ok(json) => {
            if storage.set_item(CURRENT_USER_KEY, &json).is_err() {
                log::warn!("could not store user profile");
            }
        }
        Err(err) => log::error!("cannot encode user profile: {}", err),
    }
}

pub fn clear_user() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(CURRENT_USER_KEY);
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(path) {
            log::error!("navigation to {} failed: {:?}", path, err);
        }
    }
}

/// Blocking `window.confirm`; `false` when there is no window.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
