use crate::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum LexerSymbolsError {
    #[error("failed to resolve token {index} (`{key}`): {source}")]
    Resolve {
        index: i32,
        key: String,
        #[source]
        source: BackendError,
    },
    #[error("invalid lexer symbols configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}
