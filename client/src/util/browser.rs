//! Browser plumbing: picked files, preview URLs, downloads, and external scripts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled for `hydrate`. Converts `web_sys::File` handles into the
//! plain `SelectedFile` the analyze controller works with, and turns
//! generated bytes back into a browser download.

use wasm_bindgen::JsCast;

use crate::state::analyze::{PreviewHandle, SelectedFile};

fn js_error(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Read the full contents of a picked file.
///
/// # Errors
///
/// Returns an error string if the browser fails to read the file.
pub async fn read_selected_file(file: &web_sys::File) -> Result<SelectedFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(js_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), file.type_(), bytes))
}

/// Create an object URL previewing `file`; revoked when the handle drops.
pub fn create_preview(file: &web_sys::File) -> Option<PreviewHandle> {
    web_sys::Url::create_object_url_with_blob(file).ok().map(PreviewHandle::new)
}

/// Wrap raw bytes in a `Blob` with the given MIME type.
///
/// # Errors
///
/// Returns an error string if the blob cannot be constructed.
pub fn bytes_to_blob(bytes: &[u8], content_type: &str) -> Result<web_sys::Blob, String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

/// Offer `bytes` as a file download named `file_name`.
///
/// # Errors
///
/// Returns an error string if any DOM step fails.
pub fn download_bytes(bytes: &[u8], content_type: &str, file_name: &str) -> Result<(), String> {
    let blob = bytes_to_blob(bytes, content_type)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor element cast failed".to_owned())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Append an async external script to `<head>` once.
pub fn ensure_script(id: &str, src: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let Ok(script) = document.create_element("script") else {
        return;
    };
    let _ = script.set_attribute("id", id);
    let _ = script.set_attribute("src", src);
    let _ = script.set_attribute("async", "");
    if let Some(head) = document.head() {
        let _ = head.append_child(&script);
    }
}

fn js_get(target: &wasm_bindgen::JsValue, key: &str) -> Result<wasm_bindgen::JsValue, String> {
    let value = js_sys::Reflect::get(target, &wasm_bindgen::JsValue::from_str(key)).map_err(js_error)?;
    if value.is_undefined() || value.is_null() {
        return Err(format!("{key} is not defined"));
    }
    Ok(value)
}

fn js_set(target: &js_sys::Object, key: &str, value: &wasm_bindgen::JsValue) -> Result<(), String> {
    js_sys::Reflect::set(target, &wasm_bindgen::JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

/// `window.google.accounts.id`, once the Identity Services script has loaded.
fn google_id_api() -> Result<wasm_bindgen::JsValue, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
    let google = js_get(&window, "google")?;
    let accounts = js_get(&google, "accounts")?;
    js_get(&accounts, "id")
}

/// Whether the Google Identity Services script has finished loading.
pub fn google_identity_ready() -> bool {
    google_id_api().is_ok()
}

/// Initialize Google Identity Services and render its sign-in button into
/// `container`. `on_credential` receives the ID token of each sign-in.
///
/// # Errors
///
/// Returns an error string if the script is not loaded or a call fails.
pub fn render_google_button(
    client_id: &str,
    container: &web_sys::Element,
    on_credential: impl Fn(String) + 'static,
) -> Result<(), String> {
    use wasm_bindgen::closure::Closure;

    let id_api = google_id_api()?;

    let callback = Closure::<dyn Fn(wasm_bindgen::JsValue)>::new(move |response: wasm_bindgen::JsValue| {
        match js_get(&response, "credential").map(|v| v.as_string()) {
            Ok(Some(credential)) => on_credential(credential),
            _ => log::warn!("google sign-in response carried no credential"),
        }
    });

    let config = js_sys::Object::new();
    js_set(&config, "client_id", &wasm_bindgen::JsValue::from_str(client_id))?;
    js_set(&config, "callback", callback.as_ref())?;
    let initialize: js_sys::Function = js_get(&id_api, "initialize")?
        .dyn_into()
        .map_err(|_| "initialize is not a function".to_owned())?;
    initialize.call1(&id_api, &config).map_err(js_error)?;
    // GIS keeps the callback for the page's lifetime.
    callback.forget();

    let options = js_sys::Object::new();
    js_set(&options, "theme", &"outline".into())?;
    js_set(&options, "size", &"large".into())?;
    js_set(&options, "text", &"signin_with".into())?;
    let render: js_sys::Function = js_get(&id_api, "renderButton")?
        .dyn_into()
        .map_err(|_| "renderButton is not a function".to_owned())?;
    render.call2(&id_api, container, &options).map_err(js_error)?;
    Ok(())
}
