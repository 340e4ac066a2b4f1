//! Book list.

use bookstock_contracts::BooksPage;
use leptos::*;

use crate::AppResult;

#[component]
pub fn BooksList(
    /// Refetched by the owner after a successful import
    books: Resource<u32, AppResult<BooksPage>>,
    /// Opens the upload dialog
    on_upload: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="books-section">
            <div class="books-toolbar">
                <span class="books-title">
                    {move || match books.get() {
                        Some(Ok(page)) => format!("Books ({})", page.value.len()),
                        _ => "Books".to_string(),
                    }}
                </span>
                <button class="upload-button" on:click=move |_| on_upload.call(())>
                    "Upload CSV"
                </button>
            </div>

            <Suspense fallback=|| view! { <div class="books-loading">"⏳ Loading books..."</div> }>
                {move || books.get().map(|result| match result {
                    Ok(page) if page.value.is_empty() => view! {
                        <div class="books-empty">"No books yet. Import a CSV file to add some."</div>
                    }.into_view(),
                    Ok(page) => view! {
                        <table class="books-table">
                            <thead>
                                <tr>
                                    <th>"Title"</th>
                                    <th class="num">"Stock"</th>
                                    <th>"Created"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || page.value.clone()
                                    key=|book| book.id.clone()
                                    children=move |book| view! {
                                        <tr>
                                            <td>{book.title}</td>
                                            <td class="num">{book.stock}</td>
                                            <td class="muted">{book.created_at}</td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    }.into_view(),
                    Err(e) => view! {
                        <div class="error-message">{e.to_string()}</div>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}
