//! UI Components
//!
//! Thin view layer over the workspace store and drag coordinator.

mod assignee_picker;
mod board_tabs;
mod confirm_delete_button;
mod drag_overlay;
mod filter_bar;
mod notice_toast;
mod project_column;
mod task_card;

pub use assignee_picker::AssigneePicker;
pub use board_tabs::BoardTabs;
pub use confirm_delete_button::ConfirmDeleteButton;
pub use drag_overlay::DragOverlay;
pub use filter_bar::FilterBar;
pub use notice_toast::NoticeToast;
pub use project_column::ProjectColumn;
pub use task_card::TaskCard;
