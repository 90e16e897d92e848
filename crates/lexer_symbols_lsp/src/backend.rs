use std::path::PathBuf;
use std::sync::Arc;

use lexer_symbols::{GrammarBackend, LexerSymbolsProvider, TreeDataProvider};
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::{MessageType, Url};
use tower_lsp::Client;

use crate::protocol::{
    ActiveDocumentParams, LexerSymbolItemDto, LexerSymbolsChanged, LexerSymbolsChangedParams,
    LexerSymbolsParams,
};
use crate::state::ServerState;

pub struct Backend<G> {
    pub(super) client: Client,
    pub(super) state: Arc<Mutex<ServerState>>,
    pub(super) provider: LexerSymbolsProvider<G>,
}

impl<G: GrammarBackend + 'static> Backend<G> {
    pub fn new(client: Client, grammar: G) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(ServerState::default())),
            provider: LexerSymbolsProvider::new(grammar),
        }
    }

    pub fn provider(&self) -> &LexerSymbolsProvider<G> {
        &self.provider
    }

    pub(super) fn path_from_uri(uri: &Url) -> String {
        uri.to_file_path()
            .unwrap_or_else(|_| PathBuf::from(uri.to_string()))
            .display()
            .to_string()
    }

    /// Handles `antlr/lexerSymbols`.
    pub async fn lexer_symbols(
        &self,
        params: LexerSymbolsParams,
    ) -> Result<Option<Vec<LexerSymbolItemDto>>> {
        let uri = match params.text_document {
            Some(document) => Some(document.uri),
            None => self.state.lock().await.active_document.clone(),
        };
        let file = uri.as_ref().map(Self::path_from_uri);
        let node = params.item.map(LexerSymbolItemDto::into_item);

        let children = match self.provider.get_children(file.as_deref(), node.as_ref()).await {
            Ok(children) => children,
            Err(err) => {
                tracing::warn!(error = %err, "lexer symbol tree build failed");
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("Failed to list lexer symbols: {err}"),
                    )
                    .await;
                return Err(Error {
                    code: ErrorCode::InternalError,
                    message: err.to_string().into(),
                    data: None,
                });
            }
        };
        Ok(children.map(|items| items.iter().map(LexerSymbolItemDto::from_item).collect()))
    }

    /// Handles `antlr/activeDocumentChanged`.
    pub async fn active_document_changed(&self, params: ActiveDocumentParams) {
        tracing::debug!(uri = ?params.uri, "active document changed");
        let changed = {
            let mut state = self.state.lock().await;
            let changed = state.active_document != params.uri;
            state.active_document = params.uri.clone();
            changed
        };
        if changed {
            self.notify_changed(params.uri).await;
        }
    }

    pub(super) async fn notify_changed(&self, uri: Option<Url>) {
        self.provider.refresh();
        self.client
            .send_notification::<LexerSymbolsChanged>(LexerSymbolsChangedParams { uri })
            .await;
    }
}
