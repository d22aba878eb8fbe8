//! Diagnostics
//!
//! Events go through `tracing`. In the browser there is usually no
//! subscriber installed, so on wasm32 each message is mirrored to the
//! developer console as well.

/// Emit a diagnostic at the given tracing level and mirror it to the console
///
/// Debug events fire on every keystroke of an incomplete form, so they stay
/// out of the console.
macro_rules! engine_log {
    (debug, $($arg:tt)+) => {{
        tracing::debug!($($arg)+);
    }};
    ($level:ident, $($arg:tt)+) => {{
        let message = format!($($arg)+);
        tracing::$level!("{}", message);
        $crate::logging::console(&message);
    }};
}

pub(crate) use engine_log;

#[cfg(target_arch = "wasm32")]
pub(crate) fn console(message: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn console(_message: &str) {}

// Initialize panic hook for better error messages in browser console
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}
