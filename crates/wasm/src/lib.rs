//! wasm-bindgen exports.
//!
//! This module exposes the minifier to JavaScript build tooling via `wasm-bindgen`.
//! The underlying logic lives in the `jsmin` crate.

use wasm_bindgen::prelude::*;

/// Minify script source text.
///
/// Throws with a short message (e.g. `unterminated string literal`) on lexical faults.
#[wasm_bindgen]
pub fn minify(code: String) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    jsmin::minify_str(&code).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Minify raw script bytes, for sources that are not valid UTF-8.
#[wasm_bindgen]
pub fn minify_bytes(code: Vec<u8>) -> Result<Vec<u8>, JsValue> {
    console_error_panic_hook::set_once();

    jsmin::minify_bytes(&code).map_err(|e| JsValue::from_str(&e.to_string()))
}
