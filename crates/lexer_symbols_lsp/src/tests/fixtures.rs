use std::collections::HashMap;
use std::sync::Arc;

use lexer_symbols::{
    BackendError, GrammarBackend, SourcePosition, SourceRange, SymbolInfo, Vocabulary,
};
use tower_lsp::lsp_types::Url;

pub(super) const GRAMMAR_PATH: &str = "/work/Expr.g4";

pub(super) fn grammar_uri() -> Url {
    Url::parse("file:///work/Expr.g4").expect("valid test uri")
}

pub(super) fn other_uri() -> Url {
    Url::parse("file:///work/Other.g4").expect("valid test uri")
}

pub(super) fn range(row: u32, start: u32, end: u32) -> SourceRange {
    SourceRange::new(SourcePosition::new(row, start), SourcePosition::new(row, end))
}

/// In-memory grammar analysis keyed by file path.
#[derive(Default)]
pub(super) struct FixtureGrammar {
    vocabularies: HashMap<String, Arc<Vocabulary>>,
    definitions: HashMap<String, SourceRange>,
    broken: bool,
}

impl FixtureGrammar {
    pub(super) fn expr() -> Self {
        let vocabulary = Vocabulary::from_names(
            &[None, Some("'+'"), Some("'if'")],
            &[None, Some("PLUS"), None, Some("ID")],
        );
        let mut grammar = Self::default();
        grammar
            .vocabularies
            .insert(GRAMMAR_PATH.to_string(), Arc::new(vocabulary));
        grammar.definitions.insert("PLUS".to_string(), range(5, 0, 10));
        grammar
    }

    pub(super) fn broken() -> Self {
        Self {
            broken: true,
            ..Self::expr()
        }
    }
}

#[tower_lsp::async_trait]
impl GrammarBackend for FixtureGrammar {
    fn lexer_vocabulary(&self, file: &str) -> Option<Arc<Vocabulary>> {
        self.vocabularies.get(file).cloned()
    }

    async fn info_for_symbol(
        &self,
        _file: &str,
        name: &str,
    ) -> Result<Option<SymbolInfo>, BackendError> {
        if self.broken {
            return Err(BackendError::Unavailable("analysis crashed".to_string()));
        }
        Ok(self
            .definitions
            .get(name)
            .map(|range| SymbolInfo::new(name).with_definition(name, *range)))
    }
}
