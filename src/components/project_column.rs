//! Project Column Component
//!
//! A project with its filtered tasks. The column body is a drop target of
//! its own so a task can be dropped into an empty or short column.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mouseleave, make_on_target_mouseenter, DropTarget};

use super::{ConfirmDeleteButton, TaskCard};
use crate::dnd::use_drag_coordinator;
use crate::models::Status;
use crate::store::{use_workspace_store, TaskDraft};

#[component]
fn NewTaskInput(project_id: String) -> impl IntoView {
    let store = use_workspace_store();
    let notice = use_drag_coordinator().notice();
    let (title, set_title) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() { return; }

        let store = store.clone();
        let project_id = project_id.clone();
        spawn_local(async move {
            let draft = TaskDraft::new(text.trim(), Status::Todo);
            match store.add_task(&project_id, draft).await {
                Ok(_) => set_title.set(String::new()),
                Err(err) => notice.set(Some(format!("Could not create task: {}", err))),
            }
        });
    };

    view! {
        <form class="task-add-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Add task..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <button type="submit">"+"</button>
        </form>
    }
}

#[component]
pub fn ProjectColumn(project_id: String) -> impl IntoView {
    let store = use_workspace_store();
    let coordinator = use_drag_coordinator();
    let dnd = coordinator.signals();
    let notice = coordinator.notice();

    let column = {
        let store = store.clone();
        let pid = project_id.clone();
        Memo::new(move |_| {
            store
                .visible_projects()
                .into_iter()
                .find(|v| v.project_id == pid)
        })
    };

    let on_mouseenter = make_on_target_mouseenter(
        dnd,
        DropTarget::Container(project_id.clone()),
        coordinator.handler(),
    );
    let on_mouseleave = make_on_mouseleave(dnd);

    let column_class = {
        let pid = project_id.clone();
        move || {
            if matches!(dnd.drop_target.get(), Some(DropTarget::Container(ref id)) if *id == pid) {
                "project-column drop-target"
            } else {
                "project-column"
            }
        }
    };

    let on_delete = {
        let pid = project_id.clone();
        Callback::new(move |_: ()| {
            let store = store.clone();
            let pid = pid.clone();
            spawn_local(async move {
                if let Err(err) = store.remove_project(&pid).await {
                    notice.set(Some(format!("Could not delete project: {}", err)));
                }
            });
        })
    };

    view! {
        <section class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <header class="project-column-header">
                <span class="project-title">{move || column.get().map(|c| c.title).unwrap_or_default()}</span>
                <span class="project-count">
                    {move || column.get().map(|c| format!("{}/{}", c.tasks.len(), c.total)).unwrap_or_default()}
                </span>
                <ConfirmDeleteButton button_class="project-delete-btn" on_confirm=on_delete />
            </header>

            <div class="project-column-body">
                {move || {
                    column
                        .get()
                        .map(|c| c.tasks)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|task| view! { <TaskCard task=task /> })
                        .collect_view()
                }}
            </div>

            <NewTaskInput project_id=project_id />
        </section>
    }
}
