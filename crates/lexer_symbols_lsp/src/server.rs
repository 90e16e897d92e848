use lexer_symbols::{GrammarBackend, ProviderConfig};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, InitializeParams, InitializeResult,
    InitializedParams, MessageType, SaveOptions, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, TextDocumentSyncOptions,
    TextDocumentSyncSaveOptions,
};
use tower_lsp::LanguageServer;

use crate::backend::Backend;

#[tower_lsp::async_trait]
impl<G: GrammarBackend + 'static> LanguageServer for Backend<G> {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(false),
                        })),
                        ..TextDocumentSyncOptions::default()
                    },
                )),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "lexer-symbols-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "lexer-symbols-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        {
            let mut state = self.state.lock().await;
            state.open(uri.clone());
        }
        self.notify_changed(Some(uri)).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.notify_changed(Some(params.text_document.uri)).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        self.notify_changed(Some(params.text_document.uri)).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        let next_active = {
            let mut state = self.state.lock().await;
            let was_active = state.active_document.as_ref() == Some(&uri);
            state.close(&uri);
            was_active.then(|| state.active_document.clone())
        };
        if let Some(active) = next_active {
            self.notify_changed(active).await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let config = match ProviderConfig::from_value(params.settings) {
            Ok(config) => config,
            Err(err) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Failed to parse configuration: {err}"),
                    )
                    .await;
                return;
            }
        };
        self.provider.set_config(config);
        let uri = self.state.lock().await.active_document.clone();
        self.notify_changed(uri).await;
    }
}
