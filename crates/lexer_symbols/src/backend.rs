use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;

/// Position in grammar source: `row` is 1-based, `column` is 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub row: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub text: String,
    pub range: SourceRange,
}

/// Metadata the analysis backend knows about a grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub definition: Option<Definition>,
}

impl SymbolInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            source: None,
            definition: None,
        }
    }

    pub fn with_definition(mut self, text: impl Into<String>, range: SourceRange) -> Self {
        self.definition = Some(Definition {
            text: text.into(),
            range,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("grammar backend unavailable: {0}")]
    Unavailable(String),
    #[error("symbol query for `{name}` failed: {message}")]
    Query { name: String, message: String },
}

/// The grammar-analysis service that owns parsing and compilation.
///
/// `lexer_vocabulary` returns `None` when the file has no compiled grammar or
/// the grammar has no lexer. `info_for_symbol` is the only suspension point
/// of a tree build.
#[async_trait::async_trait]
pub trait GrammarBackend: Send + Sync {
    fn lexer_vocabulary(&self, file: &str) -> Option<Arc<Vocabulary>>;

    async fn info_for_symbol(
        &self,
        file: &str,
        name: &str,
    ) -> Result<Option<SymbolInfo>, BackendError>;
}

#[async_trait::async_trait]
impl<B: GrammarBackend + ?Sized> GrammarBackend for Arc<B> {
    fn lexer_vocabulary(&self, file: &str) -> Option<Arc<Vocabulary>> {
        (**self).lexer_vocabulary(file)
    }

    async fn info_for_symbol(
        &self,
        file: &str,
        name: &str,
    ) -> Result<Option<SymbolInfo>, BackendError> {
        (**self).info_for_symbol(file, name).await
    }
}
