//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Book Stock"</h1>
            <p class="subtitle">
                "Keep track of your books and their stock. "
                "Import a CSV file to add many books at once: either every row is stored, or none is."
            </p>
        </div>
    }
}
