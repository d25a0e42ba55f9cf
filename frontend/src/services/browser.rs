//! Side effects the editor asks the browser for: clipboard, downloads, the
//! mail client and blocking confirmation prompts.

use editor::ExportFile;
use gloo_file::{Blob, ObjectUrl};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAnchorElement;

const REVOKE_DELAY_MS: u32 = 1000;

/// Writes plain text to the system clipboard.
pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

/// Offers `file` as a download through a temporary anchor.
pub fn download(file: &ExportFile) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let blob = Blob::new_with_options(file.bytes.as_slice(), Some(file.media_type));
    let url = ObjectUrl::from(blob);

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file.file_name);
    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    body.remove_child(&anchor).map_err(|e| format!("{:?}", e))?;
    // The object URL has to outlive the click.
    Timeout::new(REVOKE_DELAY_MS, move || drop(url)).forget();
    Ok(())
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(url, "_blank").is_err() {
            gloo_console::warn!("Could not open the mail client");
        }
    }
}

/// Blocking yes/no prompt. Treated as "no" when the prompt cannot be shown.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
