use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use futures::future::try_join_all;
use serde::Serialize;
use tokio::sync::watch;

use crate::backend::{GrammarBackend, SourceRange};
use crate::caption::EOF_CAPTION;
use crate::config::ProviderConfig;
use crate::error::LexerSymbolsError;
use crate::resolver::resolve_token;
use crate::vocabulary::enumerate_tokens;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CollapsibleState {
    #[default]
    None,
    Collapsed,
    Expanded,
}

/// Host command attached to a tree item. Only actionable with a command id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationCommand {
    pub title: String,
    pub command: String,
    pub arguments: Vec<SourceRange>,
}

impl NavigationCommand {
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn select_range(command: &str, range: SourceRange) -> Self {
        Self {
            title: String::new(),
            command: command.to_string(),
            arguments: vec![range],
        }
    }

    pub fn is_actionable(&self) -> bool {
        !self.command.is_empty()
    }

    pub fn target_range(&self) -> Option<SourceRange> {
        if !self.is_actionable() {
            return None;
        }
        self.arguments.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconPath {
    pub light: PathBuf,
    pub dark: PathBuf,
}

impl IconPath {
    pub fn in_dir(root: &std::path::Path) -> Self {
        Self {
            light: root.join("token-light.svg"),
            dark: root.join("token-dark.svg"),
        }
    }
}

/// What a tree view needs to render a node.
pub trait TreeNode {
    fn label(&self) -> &str;
    fn collapsible_state(&self) -> CollapsibleState;
    fn command(&self) -> Option<&NavigationCommand>;

    fn context_value(&self) -> Option<&str> {
        None
    }

    fn icon_path(&self) -> Option<&IconPath> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerSymbolItem {
    pub label: String,
    pub collapsible_state: CollapsibleState,
    pub command: Option<NavigationCommand>,
    pub context_value: String,
    pub icon_path: Option<IconPath>,
}

impl LexerSymbolItem {
    pub fn leaf(label: String, command: NavigationCommand, config: &ProviderConfig) -> Self {
        Self {
            label,
            collapsible_state: CollapsibleState::None,
            command: Some(command),
            context_value: config.context_value.clone(),
            icon_path: config.icon_root.as_deref().map(IconPath::in_dir),
        }
    }

    pub fn eof(config: &ProviderConfig) -> Self {
        let command = NavigationCommand {
            title: config.eof_title.clone(),
            ..NavigationCommand::inert()
        };
        Self::leaf(EOF_CAPTION.to_string(), command, config)
    }
}

impl TreeNode for LexerSymbolItem {
    fn label(&self) -> &str {
        &self.label
    }

    fn collapsible_state(&self) -> CollapsibleState {
        self.collapsible_state
    }

    fn command(&self) -> Option<&NavigationCommand> {
        self.command.as_ref()
    }

    fn context_value(&self) -> Option<&str> {
        Some(&self.context_value)
    }

    fn icon_path(&self) -> Option<&IconPath> {
        self.icon_path.as_ref()
    }
}

/// Lazily populated tree consumed by a host view.
#[async_trait::async_trait]
pub trait TreeDataProvider: Send + Sync {
    type Item: TreeNode + Clone + Send + Sync;

    /// `node == None` asks for the root level. `Ok(None)` means "no children".
    async fn get_children(
        &self,
        file: Option<&str>,
        node: Option<&Self::Item>,
    ) -> Result<Option<Vec<Self::Item>>, LexerSymbolsError>;

    fn get_tree_item(&self, node: &Self::Item) -> Self::Item {
        node.clone()
    }
}

/// Lists the lexer tokens of a grammar, each linked to its definition.
pub struct LexerSymbolsProvider<B> {
    backend: B,
    config: RwLock<Arc<ProviderConfig>>,
    changed: watch::Sender<u64>,
}

impl<B: GrammarBackend> LexerSymbolsProvider<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ProviderConfig::default())
    }

    pub fn with_config(backend: B, config: ProviderConfig) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            backend,
            config: RwLock::new(Arc::new(config)),
            changed,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> Arc<ProviderConfig> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*config)
    }

    pub fn set_config(&self, config: ProviderConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(config);
        self.refresh();
    }

    /// Tells subscribers the tree is stale and should be requested again.
    pub fn refresh(&self) {
        self.changed.send_modify(|generation| *generation += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    async fn build_root(
        &self,
        file: Option<&str>,
    ) -> Result<Vec<LexerSymbolItem>, LexerSymbolsError> {
        let Some(file) = file else {
            tracing::debug!("no active grammar file, lexer symbol tree is empty");
            return Ok(Vec::new());
        };
        let Some(vocabulary) = self.backend.lexer_vocabulary(file) else {
            tracing::debug!(file, "no lexer vocabulary, lexer symbol tree is empty");
            return Ok(Vec::new());
        };

        let config = self.config();
        let tokens = enumerate_tokens(&vocabulary);
        tracing::debug!(file, tokens = tokens.len(), "building lexer symbol tree");

        // Results keep the position of their token, whatever order lookups finish in.
        let resolved = try_join_all(
            tokens
                .iter()
                .map(|token| resolve_token(&self.backend, file, token, &config)),
        )
        .await?;

        let mut items = Vec::with_capacity(resolved.len() + 1);
        items.push(LexerSymbolItem::eof(&config));
        items.extend(resolved);
        Ok(items)
    }
}

#[async_trait::async_trait]
impl<B: GrammarBackend> TreeDataProvider for LexerSymbolsProvider<B> {
    type Item = LexerSymbolItem;

    async fn get_children(
        &self,
        file: Option<&str>,
        node: Option<&LexerSymbolItem>,
    ) -> Result<Option<Vec<LexerSymbolItem>>, LexerSymbolsError> {
        if node.is_some() {
            return Ok(None);
        }
        self.build_root(file).await.map(Some)
    }
}
