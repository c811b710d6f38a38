//! Start-up errors. Runtime handlers never fail hard; they log and carry on.

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type PageResult<T> = Result<T, PageError>;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("element {0} has an unexpected type")]
    WrongElementType(String),

    #[error("WebGL2 not supported")]
    NoWebGl2,

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
