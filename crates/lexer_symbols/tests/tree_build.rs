use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use lexer_symbols::{
    BackendError, GrammarBackend, LexerSymbolItem, LexerSymbolsError, LexerSymbolsProvider,
    ProviderConfig, SourcePosition, SourceRange, SymbolInfo, TreeDataProvider, TreeNode,
    Vocabulary,
};

const GRAMMAR: &str = "/work/Expr.g4";

#[derive(Default)]
struct ScriptedBackend {
    vocabulary: Option<Arc<Vocabulary>>,
    definitions: HashMap<String, SourceRange>,
    failing: HashSet<String>,
    vocabulary_requests: Mutex<Vec<String>>,
    queries: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary: Some(Arc::new(vocabulary)),
            ..Self::default()
        }
    }

    fn define(mut self, name: &str, range: SourceRange) -> Self {
        self.definitions.insert(name.to_string(), range);
        self
    }

    fn fail_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    fn queried_keys(&self) -> Vec<String> {
        let queries = self.queries.lock().expect("queries lock");
        queries.iter().map(|(_, name)| name.clone()).collect()
    }
}

#[async_trait::async_trait]
impl GrammarBackend for ScriptedBackend {
    fn lexer_vocabulary(&self, file: &str) -> Option<Arc<Vocabulary>> {
        self.vocabulary_requests
            .lock()
            .expect("vocabulary lock")
            .push(file.to_string());
        self.vocabulary.clone()
    }

    async fn info_for_symbol(
        &self,
        file: &str,
        name: &str,
    ) -> Result<Option<SymbolInfo>, BackendError> {
        self.queries
            .lock()
            .expect("queries lock")
            .push((file.to_string(), name.to_string()));
        if self.failing.contains(name) {
            return Err(BackendError::Query {
                name: name.to_string(),
                message: "grammar is being recompiled".to_string(),
            });
        }
        Ok(self
            .definitions
            .get(name)
            .map(|range| SymbolInfo::new(name).with_definition(name, *range)))
    }
}

fn range(row: u32, start: u32, end: u32) -> SourceRange {
    SourceRange::new(SourcePosition::new(row, start), SourcePosition::new(row, end))
}

fn expr_vocabulary() -> Vocabulary {
    Vocabulary::from_names(
        &[None, Some("'+'"), Some("'if'"), None, None],
        &[None, Some("PLUS"), None, Some("ID"), None],
    )
}

fn labels(items: &[LexerSymbolItem]) -> Vec<&str> {
    items.iter().map(|item| item.label()).collect()
}

#[tokio::test]
async fn root_lists_eof_then_every_token() {
    let backend = ScriptedBackend::with_vocabulary(expr_vocabulary());
    let provider = LexerSymbolsProvider::new(backend);

    let items = provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect("build succeeds")
        .expect("root has children");

    assert_eq!(
        labels(&items),
        vec![
            "-1: EOF",
            "0: <unused>",
            "1: PLUS ('+')",
            "2: <implicit token> ('if')",
            "3: ID",
            "4: <unused>",
        ]
    );
}

#[tokio::test]
async fn item_count_follows_max_token_type() {
    for max_token_type in -1..=6 {
        let count = (max_token_type + 1) as usize;
        let symbolic: Vec<Option<&str>> = vec![Some("T"); count];
        let backend = ScriptedBackend::with_vocabulary(Vocabulary::from_names(&[], &symbolic));
        let provider = LexerSymbolsProvider::new(backend);

        let items = provider
            .get_children(Some(GRAMMAR), None)
            .await
            .expect("build succeeds")
            .expect("root has children");

        assert_eq!(items.len(), count + 1, "max token type {max_token_type}");
        assert_eq!(items[0].label(), "-1: EOF");
        let eof_command = items[0].command().expect("eof command");
        assert!(!eof_command.is_actionable());
        for (position, item) in items.iter().skip(1).enumerate() {
            assert!(item.label().starts_with(&format!("{position}: ")));
        }
    }
}

#[tokio::test]
async fn defined_tokens_get_navigation_commands() {
    let backend = ScriptedBackend::with_vocabulary(expr_vocabulary())
        .define("PLUS", range(12, 0, 10))
        .define("if", range(14, 0, 8));
    let provider = LexerSymbolsProvider::new(backend);

    let items = provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect("build succeeds")
        .expect("root has children");

    let plus = items[2].command().expect("command");
    assert_eq!(plus.command, "antlr.selectGrammarRange");
    assert_eq!(plus.title, "");
    assert_eq!(plus.target_range(), Some(range(12, 0, 10)));

    let implicit_if = items[3].command().expect("command");
    assert_eq!(implicit_if.target_range(), Some(range(14, 0, 8)));

    let id = items[4].command().expect("command");
    assert!(!id.is_actionable());
    assert!(id.arguments.is_empty());
}

#[tokio::test]
async fn lookup_keys_use_symbolic_then_unquoted_literal() {
    let backend = Arc::new(ScriptedBackend::with_vocabulary(expr_vocabulary()));
    let provider = LexerSymbolsProvider::new(Arc::clone(&backend));

    provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect("build succeeds");

    let mut keys = backend.queried_keys();
    keys.sort();
    assert_eq!(keys, vec!["", "", "ID", "PLUS", "if"]);

    let queries = backend.queries.lock().expect("queries lock");
    assert!(queries.iter().all(|(file, _)| file == GRAMMAR));
}

#[tokio::test]
async fn configured_command_is_used_for_navigation() {
    let backend = ScriptedBackend::with_vocabulary(expr_vocabulary()).define("ID", range(3, 0, 2));
    let config = ProviderConfig {
        select_range_command: "grammar.reveal".to_string(),
        context_value: "tokens".to_string(),
        ..ProviderConfig::default()
    };
    let provider = LexerSymbolsProvider::with_config(backend, config);

    let items = provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect("build succeeds")
        .expect("root has children");

    assert_eq!(items[4].command().map(|c| c.command.as_str()), Some("grammar.reveal"));
    assert!(items.iter().all(|item| item.context_value() == Some("tokens")));
}

#[tokio::test]
async fn missing_vocabulary_yields_empty_tree_without_lookups() {
    let backend = Arc::new(ScriptedBackend::default());
    let provider = LexerSymbolsProvider::new(Arc::clone(&backend));

    let items = provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect("no vocabulary is not an error");

    assert_eq!(items, Some(Vec::new()));
    assert!(backend.queried_keys().is_empty());
    assert_eq!(
        *backend.vocabulary_requests.lock().expect("vocabulary lock"),
        vec![GRAMMAR.to_string()]
    );
}

#[tokio::test]
async fn missing_active_file_yields_empty_tree() {
    let backend = Arc::new(ScriptedBackend::with_vocabulary(expr_vocabulary()));
    let provider = LexerSymbolsProvider::new(Arc::clone(&backend));

    let items = provider
        .get_children(None, None)
        .await
        .expect("no file is not an error");

    assert_eq!(items, Some(Vec::new()));
    assert!(backend.vocabulary_requests.lock().expect("lock").is_empty());
    assert!(backend.queried_keys().is_empty());
}

#[tokio::test]
async fn leaf_items_have_no_children() {
    let backend = Arc::new(ScriptedBackend::with_vocabulary(expr_vocabulary()));
    let provider = LexerSymbolsProvider::new(Arc::clone(&backend));

    let items = provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect("build succeeds")
        .expect("root has children");
    let before = backend.queried_keys().len();

    for item in &items {
        let children = provider
            .get_children(Some(GRAMMAR), Some(item))
            .await
            .expect("leaf request succeeds");
        assert_eq!(children, None);
        assert_eq!(provider.get_tree_item(item), *item);
    }
    assert_eq!(backend.queried_keys().len(), before);
}

#[tokio::test]
async fn failing_lookup_fails_the_whole_build() {
    let backend = ScriptedBackend::with_vocabulary(expr_vocabulary()).fail_on("ID");
    let provider = LexerSymbolsProvider::new(backend);

    let err = provider
        .get_children(Some(GRAMMAR), None)
        .await
        .expect_err("one failing lookup rejects the build");

    match err {
        LexerSymbolsError::Resolve { index, key, source } => {
            assert_eq!(index, 3);
            assert_eq!(key, "ID");
            assert!(matches!(source, BackendError::Query { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn rebuilds_start_from_scratch() {
    let backend = Arc::new(ScriptedBackend::with_vocabulary(expr_vocabulary()));
    let provider = LexerSymbolsProvider::new(Arc::clone(&backend));

    let first = provider.get_children(Some(GRAMMAR), None).await.expect("first");
    let second = provider.get_children(Some(GRAMMAR), None).await.expect("second");

    assert_eq!(first, second);
    assert_eq!(backend.queried_keys().len(), 10);
}

#[tokio::test]
async fn refresh_notifies_subscribers() {
    let provider = LexerSymbolsProvider::new(ScriptedBackend::default());
    let mut changes = provider.subscribe();

    provider.refresh();
    changes.changed().await.expect("provider alive");
    assert_eq!(*changes.borrow_and_update(), 1);

    provider.set_config(ProviderConfig {
        eof_title: "end of input".to_string(),
        ..ProviderConfig::default()
    });
    changes.changed().await.expect("provider alive");
    assert_eq!(*changes.borrow_and_update(), 2);
    assert_eq!(provider.config().eof_title, "end of input");
}
