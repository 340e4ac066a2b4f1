//! Bookstock - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend listing books and importing new ones from a CSV
//! file. The file is parsed in the browser and sent in a single
//! `UploadBooks` call.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (book count)                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── BooksList (+ "Upload CSV" button)                      │
//! │  ├── UploadDialog (parse, preview, upload, template)        │
//! │  └── LogsPanel (when the server reports activity)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer, ToastHost                                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (LogEntry, Toast, AppError)
//! - [`components`] - UI components
//! - [`services`] - Backend and browser I/O

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Logs
    LogEntry, LogLevel,
    // Toasts
    Toast, ToastKind,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Bookstock - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Bookstock"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (refresh, set_refresh) = create_signal(0u32);
    let (dialog_open, set_dialog_open) = create_signal(false);
    let (toast, set_toast) = create_signal(None::<Toast>);
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    init_sse_logs(set_logs);

    let books = create_local_resource(move || refresh.get(), |_| fetch_books());
    let book_count = Signal::derive(move || {
        books.get().and_then(|r| r.ok()).map(|page| page.value.len())
    });

    // The list reloads shortly after an import.
    let reload = Callback::new(move |_: ()| {
        spawn_local(async move {
            TimeoutFuture::new(REFRESH_DELAY_MS).await;
            set_refresh.update(|n| *n += 1);
        });
    });

    view! {
        <Header book_count=book_count/>

        <div class="container">
            <Hero/>

            <BooksList
                books=books
                on_upload=Callback::new(move |_| set_dialog_open.set(true))
            />

            <UploadDialog
                open=dialog_open
                set_open=set_dialog_open
                set_toast=set_toast
                on_created=reload
            />

            <Show
                when=move || !logs.get().is_empty()
                fallback=|| view! { }
            >
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </div>

        <Footer/>
        <ToastHost toast=toast/>
    }
}
