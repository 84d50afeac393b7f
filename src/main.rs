//! Kanban Board Frontend Entry Point

use kanban_board_ui::logging::{default_log_level, init_logging};
use kanban_board_ui::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(default_log_level()) {
        web_sys::console::error_1(&err.into());
    }
    mount_to_body(App);
}
