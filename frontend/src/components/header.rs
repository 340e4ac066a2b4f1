use leptos::*;

use crate::SERVICE_ROOT;

#[component]
pub fn Header(
    /// Number of books currently listed, when known
    #[prop(into)]
    book_count: Signal<Option<usize>>,
) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">"BOOKSTOCK"</a>
                <span class="badge">
                    {move || match book_count.get() {
                        Some(n) => format!("{} books", n),
                        None => "-- books".to_string(),
                    }}
                </span>
            </div>
            <div class="header-right">
                <span class="service-root">{SERVICE_ROOT}</span>
            </div>
        </header>
    }
}
