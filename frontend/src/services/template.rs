//! Client-side download of the empty import template.

use bookstock_contracts::{TEMPLATE_CSV, TEMPLATE_FILE_NAME};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::types::{AppError, AppResult};

/// `data:` URL carrying the template content.
pub fn template_data_url() -> String {
    let encoded: String = js_sys::encode_uri(TEMPLATE_CSV).into();
    format!("data:text/csv;charset=utf-8,{}", encoded)
}

/// Trigger the browser download of `TemplateCsv.csv`.
pub fn download_template() -> AppResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Transport("no document".to_string()))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| AppError::Transport(format!("{:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| AppError::Transport(format!("{:?}", e)))?;

    anchor.set_href(&template_data_url());
    anchor.set_download(TEMPLATE_FILE_NAME);
    anchor.click();

    log::info!("📥 Template downloaded");
    Ok(())
}
