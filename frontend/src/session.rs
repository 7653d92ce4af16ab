//! Browser session storage.
//!
//! The backend session token and the short username live in
//! `localStorage`, so a page reload keeps the user logged in until the
//! token expires server-side.

use web_sys::Storage;

const TOKEN_KEY: &str = "gdis_token";
const USER_KEY: &str = "gdis_user";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn store(token: &str, username: &str) {
    if let Some(storage) = storage() {
        storage.set_item(TOKEN_KEY, token).ok();
        storage.set_item(USER_KEY, username).ok();
    }
}

pub fn token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok()?
}

pub fn username() -> Option<String> {
    storage()?.get_item(USER_KEY).ok()?
}

pub fn clear() {
    if let Some(storage) = storage() {
        storage.remove_item(TOKEN_KEY).ok();
        storage.remove_item(USER_KEY).ok();
    }
}

/// Drops the stored session and sends the browser back to the login
/// screen. Called whenever the backend answers 401.
pub fn expire() {
    clear();
    if let Some(window) = web_sys::window() {
        window.location().set_href("/").ok();
    }
}
