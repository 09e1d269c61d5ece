use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No global window available")]
    NoWindow,

    #[error("Window has no document")]
    NoDocument,

    #[error("Element not mounted: {0}")]
    MissingNode(&'static str),

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("Invalid trigger boundary: {0}")]
    Boundary(String),

    #[error("Content parse error: {0}")]
    Content(#[from] serde_json::Error),

    #[error("Smooth scrolling is already active")]
    AlreadyActive,
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
