//! Small DOM utilities shared by the components.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Show a temporary toast notification at the bottom of the page.
///
/// Creates a fixed-position div, attaches it to `<body>`, and removes it
/// again after three seconds.
pub fn show_toast(message: &str, is_error: bool) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        return;
    };
    toast.set_class_name(if is_error {
        "toast toast-error"
    } else {
        "toast"
    });
    toast.set_text_content(Some(message));
    let _ = body.append_child(&toast);

    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(3000).await;
        toast.remove();
    });
}

/// Format a count with thousands separators for display.
pub fn format_count(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Trigger a browser download of a text file.
///
/// Builds a Blob URL and clicks a temporary anchor, which is how the CSV
/// export hands the generated document to the browser.
pub fn download_text_file(filename: &str, content: &str, mime: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(anchor) = document.create_element("a") {
        if let Ok(anchor) = anchor.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

/// Today's date as "YYYY-MM-DD", used in export filenames.
pub fn today_string() -> String {
    let iso = js_sys::Date::new_0().to_iso_string();
    let iso: String = iso.into();
    iso.chars().take(10).collect()
}
