//! Footer component

use leptos::*;

use crate::health_url;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Bookstock • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href=health_url() class="footer-link" target="_blank">
                    "Service status"
                </a>
            </div>
        </footer>
    }
}
