//! Notice Toast Component
//!
//! Shows the coordinator's notice and clears it after a few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dnd::use_drag_coordinator;

const NOTICE_MS: u32 = 4000;

#[component]
pub fn NoticeToast() -> impl IntoView {
    let notice = use_drag_coordinator().notice();

    Effect::new(move |_| {
        let Some(shown) = notice.get() else { return };
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            // only clear if nothing newer replaced it
            if notice.get_untracked().as_deref() == Some(shown.as_str()) {
                notice.set(None);
            }
        });
    });

    view! {
        {move || notice.get().map(|text| view! {
            <div class="notice-toast" on:click=move |_| notice.set(None)>{text}</div>
        })}
    }
}
