//! Assignee Picker Component
//!
//! Shows the assignee on a task card. Clicking opens a user search; picking a
//! result assigns the task.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dnd::use_drag_coordinator;
use crate::models::{User, UserRef};
use crate::store::use_workspace_store;

#[component]
pub fn AssigneePicker(task_id: String, current: Option<UserRef>) -> impl IntoView {
    let store = use_workspace_store();
    let notice = use_drag_coordinator().notice();
    let (open, set_open) = signal(false);
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<User>::new());

    let label = current
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_else(|| "Unassigned".to_string());
    let has_assignee = current.is_some();

    let on_search = {
        let store = store.clone();
        move |ev: web_sys::Event| {
            let text = event_target_value(&ev);
            set_query.set(text.clone());
            let store = store.clone();
            spawn_local(async move {
                match store.search_users(&text).await {
                    // a newer keystroke may have answered first
                    Ok(users) if query.get_untracked() == text => set_results.set(users),
                    Ok(_) => {}
                    Err(err) => notice.set(Some(format!("User search failed: {}", err))),
                }
            });
        }
    };

    let assign = move |user_id: Option<String>| {
        let store = store.clone();
        let task_id = task_id.clone();
        set_open.set(false);
        spawn_local(async move {
            if let Err(err) = store.assign_task(&task_id, user_id.as_deref()).await {
                notice.set(Some(format!("Could not assign task: {}", err)));
            }
        });
    };

    view! {
        <span class="assignee-picker">
            <button
                class=if has_assignee { "task-assignee" } else { "task-assignee empty" }
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_open.update(|v| *v = !*v);
                }
            >
                {label}
            </button>
            <Show when=move || open.get()>
                <div class="assignee-dropdown">
                    <input
                        type="search"
                        placeholder="Find user..."
                        prop:value=move || query.get()
                        on:input=on_search.clone()
                    />
                    <ul class="assignee-results">
                        {
                            let assign = assign.clone();
                            move || {
                                let assign = assign.clone();
                                results
                                    .get()
                                    .into_iter()
                                    .map(|user| {
                                        let assign = assign.clone();
                                        let id = user.id.clone();
                                        view! {
                                            <li>
                                                <button on:click=move |_| assign(Some(id.clone()))>
                                                    {user.name}
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }
                        }
                    </ul>
                    {
                        let assign = assign.clone();
                        view! {
                            <Show when=move || has_assignee>
                                {
                                    let assign = assign.clone();
                                    view! {
                                        <button class="assignee-clear" on:click=move |_| assign(None)>
                                            "Unassign"
                                        </button>
                                    }
                                }
                            </Show>
                        }
                    }
                </div>
            </Show>
        </span>
    }
}
