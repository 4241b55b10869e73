//! Clipboard
//!
//! Binding to `navigator.clipboard.writeText`.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    async fn write_text_js(text: &str) -> Result<JsValue, JsValue>;
}

pub async fn write_text(text: &str) -> Result<(), String> {
    write_text_js(text)
        .await
        .map(|_| ())
        .map_err(|e| format!("Failed to copy text: {:?}", e))
}
