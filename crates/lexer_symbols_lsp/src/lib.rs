use lexer_symbols::GrammarBackend;
use tokio::io::{AsyncRead, AsyncWrite};
use tower_lsp::{ClientSocket, LspService, Server};

mod backend;
pub mod protocol;
mod server;
mod state;

pub use backend::Backend;

pub fn build_service<G>(grammar: G) -> (LspService<Backend<G>>, ClientSocket)
where
    G: GrammarBackend + 'static,
{
    LspService::build(|client| Backend::new(client, grammar))
        .custom_method(protocol::LEXER_SYMBOLS_METHOD, Backend::<G>::lexer_symbols)
        .custom_method(
            protocol::ACTIVE_DOCUMENT_CHANGED_METHOD,
            Backend::<G>::active_document_changed,
        )
        .finish()
}

/// Runs the server until the client disconnects.
pub async fn serve<G, I, O>(grammar: G, input: I, output: O)
where
    G: GrammarBackend + 'static,
    I: AsyncRead + Unpin,
    O: AsyncWrite,
{
    let (service, socket) = build_service(grammar);
    Server::new(input, output, socket).serve(service).await;
}

/// [`serve`] over stdin and stdout.
pub async fn serve_stdio<G: GrammarBackend + 'static>(grammar: G) {
    serve(grammar, tokio::io::stdin(), tokio::io::stdout()).await;
}
