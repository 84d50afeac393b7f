//! Board Tabs Component
//!
//! My boards and team boards as tabs, plus an inline form for a new board.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dnd::use_drag_coordinator;
use crate::models::Board;
use crate::store::{use_workspace_store, WorkspaceStateStoreFields, WorkspaceStore};

fn board_tab(store: WorkspaceStore, board: Board) -> impl IntoView {
    let state = store.state();
    let id = board.id.clone();
    let active_id = id.clone();
    let is_active = move || state.current_board_id().get().as_deref() == Some(active_id.as_str());

    view! {
        <button
            class=move || if is_active() { "board-tab active" } else { "board-tab" }
            on:click=move |_| {
                let store = store.clone();
                let id = id.clone();
                spawn_local(async move { store.select_board(&id).await });
            }
        >
            {board.title}
        </button>
    }
}

#[component]
pub fn BoardTabs() -> impl IntoView {
    let store = use_workspace_store();
    let notice = use_drag_coordinator().notice();
    let state = store.state();
    let (adding, set_adding) = signal(false);
    let (new_title, set_new_title) = signal(String::new());

    let on_add = {
        let store = store.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let title = new_title.get();
            if title.trim().is_empty() { return; }

            let store = store.clone();
            spawn_local(async move {
                match store.add_board(title.trim(), None).await {
                    Ok(board) => store.select_board(&board.id).await,
                    Err(err) => notice.set(Some(format!("Could not create board: {}", err))),
                }
            });
            set_new_title.set(String::new());
            set_adding.set(false);
        }
    };

    let mine = store.clone();
    let team = store.clone();

    view! {
        <nav class="board-tabs">
            <Show when=move || state.is_loading_boards().get()>
                <span class="loading">"Loading boards..."</span>
            </Show>

            <div class="board-group">
                <span class="board-group-label">"My boards"</span>
                <For
                    each=move || state.my_boards().get()
                    key=|b| b.id.clone()
                    children=move |b| board_tab(mine.clone(), b)
                />
            </div>

            <div class="board-group">
                <span class="board-group-label">"Team boards"</span>
                <For
                    each=move || state.team_boards().get()
                    key=|b| b.id.clone()
                    children=move |b| board_tab(team.clone(), b)
                />
            </div>

            <Show
                when=move || adding.get()
                fallback=move || view! {
                    <button class="board-add-btn" on:click=move |_| set_adding.set(true)>"+"</button>
                }
            >
                <form class="board-add-form" on:submit=on_add.clone()>
                    <input
                        type="text"
                        placeholder="Board title"
                        prop:value=move || new_title.get()
                        on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    />
                    <button type="submit">"+"</button>
                    <button type="button" on:click=move |_| set_adding.set(false)>"×"</button>
                </form>
            </Show>
        </nav>
    }
}
