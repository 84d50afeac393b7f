//! Filter Bar Component
//!
//! Status dropdown and title search. Writes straight into the store's filter.

use leptos::prelude::*;

use crate::models::Status;
use crate::store::{use_workspace_store, WorkspaceStateStoreFields};

#[component]
pub fn FilterBar() -> impl IntoView {
    let state = use_workspace_store().state();

    let selected_status = move || {
        state
            .filter()
            .with(|f| f.status.map(|s| s.as_str()).unwrap_or(""))
    };

    view! {
        <div class="filter-bar">
            <select
                prop:value=selected_status
                on:change=move |ev| {
                    let status = Status::parse(&event_target_value(&ev));
                    state.filter().write().status = status;
                }
            >
                <option value="">"All statuses"</option>
                {Status::ALL
                    .iter()
                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                    .collect_view()}
            </select>
            <input
                type="search"
                placeholder="Search tasks..."
                prop:value=move || state.filter().with(|f| f.search.clone())
                on:input=move |ev| state.filter().write().search = event_target_value(&ev)
            />
        </div>
    }
}
