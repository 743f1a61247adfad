//! Error types for everything around the rating engine.
//!
//! The engine itself is infallible; these cover config files, trade files and
//! report output.

#[derive(Debug, thiserror::Error)]
pub enum VRatingError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot read trades from {path}: {reason}")]
    TradeFile { path: String, reason: String },

    #[error("invalid trade in {source_name} at record {record}: {reason}")]
    TradeParse {
        source_name: String,
        record: usize,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&VRatingError> for std::process::ExitCode {
    fn from(err: &VRatingError) -> Self {
        let code: u8 = match err {
            VRatingError::Io(_) | VRatingError::Report { .. } => 1,
            VRatingError::ConfigParse { .. } | VRatingError::ConfigInvalid { .. } => 2,
            VRatingError::TradeFile { .. } | VRatingError::TradeParse { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
