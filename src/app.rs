//! Kanban Board App
//!
//! Root component: board tabs on top, filter bar, then one column per
//! project of the open board.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::HttpApi;
use crate::components::{BoardTabs, DragOverlay, FilterBar, NoticeToast, ProjectColumn};
use crate::config::ApiConfig;
use crate::dnd::{provide_drag_coordinator, use_drag_coordinator};
use crate::store::{provide_workspace_store, WorkspaceStateStoreFields};

#[component]
fn NewProjectForm() -> impl IntoView {
    let store = crate::store::use_workspace_store();
    let notice = use_drag_coordinator().notice();
    let (title, set_title) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() { return; }

        let store = store.clone();
        spawn_local(async move {
            match store.add_project(text.trim(), None).await {
                Ok(_) => set_title.set(String::new()),
                Err(err) => notice.set(Some(format!("Could not create project: {}", err))),
            }
        });
    };

    view! {
        <form class="project-add-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="New project..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <button type="submit">"Add project"</button>
        </form>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_env();
    log::info!("[APP] API base {}", config.base_url);
    let store = provide_workspace_store(Arc::new(HttpApi::new(config)));
    provide_drag_coordinator(store.clone());
    let state = store.state();

    // Session, then boards
    {
        let store = store.clone();
        spawn_local(async move {
            if store.load_session().await.is_some() {
                store.fetch_boards().await;
            }
        });
    }

    view! {
        <div class="app-layout">
            <BoardTabs />
            <FilterBar />

            {move || match state.current_board_id().get() {
                None => view! { <p class="empty-hint">"Pick or create a board."</p> }.into_any(),
                Some(_) => view! {
                    <Show when=move || state.is_loading_projects().get()>
                        <div class="loading">"Loading projects..."</div>
                    </Show>
                    <div class="board-columns">
                        <For
                            each=move || state.projects().with(|ps| ps.iter().map(|p| p.id.clone()).collect::<Vec<_>>())
                            key=|id| id.clone()
                            children=|id| view! { <ProjectColumn project_id=id /> }
                        />
                    </div>
                    <NewProjectForm />
                }.into_any(),
            }}

            <DragOverlay />
            <NoticeToast />
        </div>
    }
}
