//! Reading a user-selected file in the browser.

use bookstock_contracts::{parse_import_bytes, ParsedFile};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, File};

use crate::config::MSG_ERROR_READ;
use crate::types::{AppError, AppResult};

/// Read the whole file and parse it into a batch.
pub async fn read_import_file(file: &File) -> AppResult<ParsedFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(read_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    log::info!("📄 Read {} ({} bytes)", file.name(), bytes.len());

    Ok(parse_import_bytes(&bytes)?)
}

/// A `NotReadableError` gets the friendly message; anything else keeps the
/// browser's description.
fn read_error(err: JsValue) -> AppError {
    match err.dyn_into::<DomException>() {
        Ok(ex) if ex.name() == "NotReadableError" => AppError::Read(MSG_ERROR_READ.to_string()),
        Ok(ex) => AppError::Read(ex.message()),
        Err(other) => AppError::Read(format!("{:?}", other)),
    }
}
