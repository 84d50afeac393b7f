//! Drag Overlay Component
//!
//! Ghost of the task being dragged. Reads only the drag session, never the
//! store's ordering.

use leptos::prelude::*;

use crate::dnd::use_drag_coordinator;
use crate::reorder::find_task;
use crate::store::{use_workspace_store, WorkspaceStateStoreFields};

#[component]
pub fn DragOverlay() -> impl IntoView {
    let state = use_workspace_store().state();
    let dnd = use_drag_coordinator().signals();

    let dragged_title = move || {
        let active = dnd.overlay()?;
        state
            .projects()
            .with(|projects| find_task(projects, &active).map(|t| t.title.clone()))
    };

    view! {
        {move || dragged_title().map(|title| view! {
            <div class="drag-overlay">{title}</div>
        })}
    }
}
