//! Task Card Component
//!
//! One draggable task. Hovering another card during a drag reports it as the
//! drop target; the coordinator decides between reorder and move.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mousedown, make_on_mouseleave, make_on_target_mouseenter, DropTarget};

use super::{AssigneePicker, ConfirmDeleteButton};
use crate::dnd::use_drag_coordinator;
use crate::models::{Status, Task};
use crate::store::{use_workspace_store, TaskDraft};

fn next_status(status: Status) -> Status {
    let idx = Status::ALL.iter().position(|s| *s == status).unwrap_or(0);
    Status::ALL[(idx + 1) % Status::ALL.len()]
}

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let store = use_workspace_store();
    let coordinator = use_drag_coordinator();
    let dnd = coordinator.signals();
    let notice = coordinator.notice();
    let id = task.id.clone();

    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_mouseenter = make_on_target_mouseenter(dnd, DropTarget::Item(id.clone()), coordinator.handler());
    let on_mouseleave = make_on_mouseleave(dnd);

    let card_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("task-card");
            if dnd.overlay().as_ref() == Some(&id) { c.push_str(" dragging"); }
            if matches!(dnd.drop_target.get(), Some(DropTarget::Item(ref t)) if *t == id) {
                c.push_str(" drop-target");
            }
            c
        }
    };

    let advance_status = {
        let store = store.clone();
        let task = task.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            // a release right after a drag is not a click
            if dnd.drag_just_ended.get_untracked() { return; }
            let mut draft = TaskDraft::from_task(&task);
            draft.status = next_status(task.status);
            let store = store.clone();
            let id = task.id.clone();
            spawn_local(async move {
                if let Err(err) = store.update_task(&id, draft, None).await {
                    notice.set(Some(format!("Could not update task: {}", err)));
                }
            });
        }
    };

    let on_delete = Callback::new(move |_: ()| {
        let store = store.clone();
        let id = id.clone();
        spawn_local(async move {
            if let Err(err) = store.remove_task(&id).await {
                notice.set(Some(format!("Could not delete task: {}", err)));
            }
        });
    });

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="task-card-header">
                <span class="task-title">{task.title.clone()}</span>
                <ConfirmDeleteButton button_class="task-delete-btn" on_confirm=on_delete />
            </div>
            {task.description.clone().map(|d| view! { <p class="task-description">{d}</p> })}
            <div class="task-card-footer">
                <button class=format!("status-badge status-{}", task.status.as_str().to_lowercase()) on:click=advance_status>
                    {task.status.label()}
                </button>
                <AssigneePicker task_id=task.id.clone() current=task.assignee.clone() />
                {task.due_date.map(|d| view! { <span class="task-due">{d.format("%Y-%m-%d").to_string()}</span> })}
            </div>
        </div>
    }
}
