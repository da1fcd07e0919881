/// Errors raised while building a scorer or scoring a text.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("lexicon list `{list}` could not be compiled: {source}")]
    Lexicon {
        list: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl MetricsError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
