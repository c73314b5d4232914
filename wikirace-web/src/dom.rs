//! Thin browser glue: window, storage, fetch and timers.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Storage, Window};

/// The global `window` object.
///
/// # Panics
/// Panics outside a browser context; every caller here runs in one.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Render a JavaScript error value as a plain string for logs.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Run a GET through the browser `fetch` and hand back the `Response`.
///
/// # Errors
/// Returns an error if the request fails or the result is not a
/// `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    let resp_value = JsFuture::from(window().fetch_with_str(url)).await?;
    resp_value.dyn_into::<Response>()
}

/// Fetch a URL and return the response body as text.
///
/// # Errors
/// Returns an error if the request fails or the body cannot be read.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let response = fetch_response(url).await?;
    let text_value = JsFuture::from(response.text()?).await?;
    text_value
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body was not text"))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or
/// `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Invoke `callback` every `interval_ms` until the returned handle drops.
///
/// Used by the race timer; the closure stays alive exactly as long as the
/// handle.
pub struct IntervalHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        window().clear_interval_with_handle(self.id);
    }
}

/// Schedule a repeating callback on the browser event loop.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled.
pub fn set_interval(
    interval_ms: i32,
    callback: impl FnMut() + 'static,
) -> Result<IntervalHandle, JsValue> {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    let id = window().set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        interval_ms,
    )?;
    Ok(IntervalHandle {
        id,
        _closure: closure,
    })
}
