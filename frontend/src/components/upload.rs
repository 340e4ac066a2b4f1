//! CSV upload dialog.
//!
//! Parses the selected file in the browser, shows what was found and sends
//! the batch in one `UploadBooks` call when the user confirms. The parsed
//! batch lives in a signal owned by the dialog and is handed to the upload
//! service as a value.

use bookstock_contracts::{ImportBatch, ParsedFile};
use leptos::*;
use web_sys::{Event, HtmlInputElement};

use crate::components::show_toast;
use crate::services::{created_message, download_template, read_import_file, upload_books};
use crate::{Toast, MSG_NO_FILE_SELECTED};

/// Rows shown in the dialog preview.
const PREVIEW_ROWS: usize = 5;

#[component]
pub fn UploadDialog(
    /// Dialog visibility
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    set_toast: WriteSignal<Option<Toast>>,
    /// Called once the batch is stored
    on_created: Callback<()>,
) -> impl IntoView {
    let (parsed, set_parsed) = create_signal(None::<ParsedFile>);
    let (is_uploading, set_is_uploading) = create_signal(false);

    // Closing drops whatever was parsed.
    let close = move || {
        set_parsed.set(None);
        set_is_uploading.set(false);
        set_open.set(false);
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        set_parsed.set(None);
        spawn_local(async move {
            match read_import_file(&file).await {
                Ok(result) => {
                    log::info!(
                        "📄 Parsed {} rows ({}, columns: {})",
                        result.batch.len(),
                        result.encoding,
                        result.headers.join(", ")
                    );
                    set_parsed.set(Some(result));
                }
                Err(e) => {
                    log::warn!("File read failed: {}", e);
                    show_toast(set_toast, Toast::error(e.to_string()));
                }
            }
        });
    };

    let on_upload = move |_| {
        let batch: ImportBatch = parsed
            .get_untracked()
            .map(|p| p.batch)
            .unwrap_or_default();

        if batch.is_empty() {
            show_toast(set_toast, Toast::error(MSG_NO_FILE_SELECTED));
            return;
        }

        set_is_uploading.set(true);
        spawn_local(async move {
            log::info!("📤 Uploading {} books...", batch.len());
            match upload_books(&batch).await {
                Ok(created) => {
                    show_toast(set_toast, Toast::success(created_message(created)));
                    close();
                    on_created.call(());
                }
                Err(e) => {
                    log::error!("❌ Upload failed: {}", e);
                    set_is_uploading.set(false);
                    show_toast(set_toast, Toast::error(e.to_string()));
                }
            }
        });
    };

    let on_template = move |_| {
        if let Err(e) = download_template() {
            show_toast(set_toast, Toast::error(e.to_string()));
        }
    };

    view! {
        <Show when=move || open.get() fallback=|| view! { }>
            <div class="dialog-backdrop">
                <div class="dialog" role="dialog" aria-modal="true">
                    <div class="dialog-header">
                        <span class="dialog-title">"Import books from CSV"</span>
                    </div>

                    <div class="dialog-body">
                        <p class="upload-hint">
                            "One book per line, columns separated by ';'. "
                            "The first line must be the header " <code>"title;stock"</code> "."
                        </p>

                        <input
                            type="file"
                            id="fileInput"
                            accept=".csv"
                            on:change=on_file_change
                        />

                        <Show when=move || parsed.get().is_some() fallback=|| view! { }>
                            <div class="message-strip">
                                {move || parsed.get().map(|p| format!(
                                    "{} row(s) ready to upload ({}).",
                                    p.batch.len(),
                                    p.encoding
                                ))}
                            </div>
                            <ul class="preview-rows">
                                <For
                                    each=move || {
                                        parsed
                                            .get()
                                            .map(|p| p.batch.records().iter().take(PREVIEW_ROWS).cloned().enumerate().collect::<Vec<_>>())
                                            .unwrap_or_default()
                                    }
                                    key=|(i, _)| *i
                                    children=move |(_, record)| view! {
                                        <li>
                                            <span class="preview-title">{record.title.unwrap_or_default()}</span>
                                            " ; "
                                            <span class="preview-stock">{record.stock.unwrap_or_default()}</span>
                                        </li>
                                    }
                                />
                            </ul>
                        </Show>
                    </div>

                    <div class="dialog-footer">
                        <button class="link-button" on:click=on_template>
                            "Download template"
                        </button>
                        <button
                            class="upload-button"
                            disabled=move || is_uploading.get()
                            on:click=on_upload
                        >
                            {move || if is_uploading.get() { "⏳ Uploading..." } else { "Upload" }}
                        </button>
                        <button class="secondary-button" on:click=move |_| close()>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
