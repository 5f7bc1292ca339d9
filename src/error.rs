use std::path::PathBuf;

/// Errors produced by the text engine.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// A `\...\` directive payload is not a JSON object of the expected shape.
    ///
    /// Fatal to the whole `create_text_image` call; no partial image is produced.
    #[error("malformed directive {payload:?}: {source}")]
    MalformedDirective {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse font {name:?}: {reason}")]
    FontParse { name: String, reason: String },

    #[error("failed to load font from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
