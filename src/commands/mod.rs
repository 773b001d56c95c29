//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod app;
mod todo;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    // `catch` turns a rejected command into Err instead of a JS exception
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use app::*;
pub use todo::*;

/// Rejections carry the backend's error string
fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn call<A, T>(cmd: &str, args: &A) -> Result<T, String>
where
    A: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_no_args<T: DeserializeOwned>(cmd: &str) -> Result<T, String> {
    let result = invoke(cmd, JsValue::NULL).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
