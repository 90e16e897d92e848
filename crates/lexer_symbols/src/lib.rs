pub mod backend;
pub mod caption;
pub mod config;
pub mod error;
pub mod resolver;
pub mod tree;
pub mod vocabulary;

pub use backend::{
    BackendError, Definition, GrammarBackend, SourcePosition, SourceRange, SymbolInfo,
};
pub use caption::{format_caption, EOF_CAPTION};
pub use config::ProviderConfig;
pub use error::LexerSymbolsError;
pub use resolver::{lookup_key, resolve_token};
pub use tree::{
    CollapsibleState, IconPath, LexerSymbolItem, LexerSymbolsProvider, NavigationCommand,
    TreeDataProvider, TreeNode,
};
pub use vocabulary::{enumerate_tokens, TokenDescriptor, Vocabulary, EOF_TOKEN_TYPE};
