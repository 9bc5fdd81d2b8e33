use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerUrlError {
    #[error("invalid viewer root '{value}': {source}")]
    InvalidRoot {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("viewer root '{value}' must be a hierarchical URL without query or fragment")]
    UnusableRoot { value: String },

    #[error("cannot resolve '{path}' against the document base: {source}")]
    Unresolvable {
        path: String,
        #[source]
        source: url::ParseError,
    },
}
