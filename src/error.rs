use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("audio unavailable: {0}")]
    Audio(String),
    #[error("particle renderer unavailable: {0}")]
    Particles(String),
    #[error("burst options encode failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Render a thrown JS value for error messages.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Dom(describe(&value))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::NoWindow.to_string(), "no window");
        assert_eq!(
            Error::Audio("blocked".into()).to_string(),
            "audio unavailable: blocked"
        );
    }
}
