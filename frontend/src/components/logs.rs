//! Real-time log streaming using Server-Sent Events (SSE).
//!
//! Connects to the backend's `/api/logs` endpoint and displays
//! import logs in real-time with auto-scroll support.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::{LogEntry, BACKEND_URL, MAX_LOG_ENTRIES};

/// Request animation frame helper for smooth scrolling
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(f);
    if window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .is_ok()
    {
        closure.forget();
    }
}

/// Parse one SSE payload and stamp it with the local time.
pub(crate) fn parse_sse_log(json: &str) -> Option<LogEntry> {
    let mut entry: LogEntry = serde_json::from_str(json).ok()?;
    entry.timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    Some(entry)
}

/// Start SSE connection to receive real-time logs
/// Should be called ONCE at app startup
pub fn init_sse_logs(set_logs: WriteSignal<Vec<LogEntry>>) {
    let sse_url = format!("{}/api/logs", BACKEND_URL);

    let event_source = match EventSource::new(&sse_url) {
        Ok(es) => es,
        Err(e) => {
            log::error!("Failed to create EventSource: {:?}", e);
            return;
        }
    };

    let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Some(entry) = event.data().as_string().as_deref().and_then(parse_sse_log) {
            set_logs.update(|logs| {
                logs.push(entry);
                if logs.len() > MAX_LOG_ENTRIES {
                    logs.remove(0);
                }
            });
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    event_source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::warn!("SSE connection error - will auto-reconnect");
    }) as Box<dyn FnMut(web_sys::Event)>);

    event_source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    // Lives for the whole page.
    std::mem::forget(event_source);

    log::info!("📡 SSE log stream initialized");
}

/// Import logs panel (display only, SSE is initialized elsewhere)
#[component]
pub fn LogsPanel(
    logs: ReadSignal<Vec<LogEntry>>,
    /// For clearing
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Keep the newest entry in view.
    create_effect(move |_| {
        let _ = logs.get();
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"📋 Import Logs"</span>
                <button
                    class="logs-clear"
                    on:click=move |_| set_logs.set(vec![])
                >
                    "Clear"
                </button>
            </div>
            <div class="logs-content" node_ref=logs_container>
                <For
                    each=move || logs.get().into_iter().enumerate()
                    key=|(i, entry)| (*i, entry.message.clone())
                    children=move |(_, entry)| {
                        let pad = format!("padding-left: {}em", entry.indent);
                        view! {
                            <div class=format!("log-entry {}", entry.level.css_class()) style=pad>
                                <span class="log-time">"[" {entry.timestamp.clone()} "] "</span>
                                {entry.message.clone()}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    #[test]
    fn test_parse_sse_log() {
        let entry = parse_sse_log(r#"{"level":"success","message":"Created 2 books","indent":0}"#)
            .unwrap();
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.message, "Created 2 books");
        assert_eq!(entry.timestamp.len(), 8);
    }

    #[test]
    fn test_parse_sse_log_rejects_garbage() {
        assert!(parse_sse_log("keep-alive").is_none());
    }
}
