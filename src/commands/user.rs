//! User Commands
//!
//! Routes for assignee lookup.

use percent_encoding::utf8_percent_encode;

pub(crate) fn current_user_path() -> String {
    "users/me".to_string()
}

pub(crate) fn user_path(user_id: &str) -> String {
    format!("users/{}", super::segment(user_id))
}

pub(crate) fn user_search_path(query: &str) -> String {
    format!("users/search?q={}", utf8_percent_encode(query.trim(), super::QUERY))
}
