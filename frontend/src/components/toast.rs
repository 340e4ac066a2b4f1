//! Transient notification shown at the bottom of the page.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::{Toast, ToastKind, TOAST_DURATION_MS};

/// Show a toast and hide it again after [`TOAST_DURATION_MS`].
pub fn show_toast(set_toast: WriteSignal<Option<Toast>>, toast: Toast) {
    log::info!("💬 {}", toast.message);
    let shown = toast.clone();
    set_toast.set(Some(toast));

    spawn_local(async move {
        TimeoutFuture::new(TOAST_DURATION_MS).await;
        // A newer toast stays up.
        set_toast.update(|current| {
            if current.as_ref() == Some(&shown) {
                *current = None;
            }
        });
    });
}

#[component]
pub fn ToastHost(toast: ReadSignal<Option<Toast>>) -> impl IntoView {
    view! {
        <Show when=move || toast.get().is_some() fallback=|| view! { }>
            {move || toast.get().map(|t| {
                let class = match t.kind {
                    ToastKind::Success => "toast toast-success",
                    ToastKind::Error => "toast toast-error",
                };
                view! { <div class=class role="status">{t.message}</div> }
            })}
        </Show>
    }
}
