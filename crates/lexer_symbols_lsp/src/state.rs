use tower_lsp::lsp_types::Url;

#[derive(Debug, Default)]
pub(super) struct ServerState {
    pub(super) active_document: Option<Url>,
    /// Open documents, most recently opened last.
    pub(super) open_documents: Vec<Url>,
}

impl ServerState {
    pub(super) fn open(&mut self, uri: Url) {
        self.open_documents.retain(|open| *open != uri);
        self.open_documents.push(uri.clone());
        self.active_document = Some(uri);
    }

    /// Closing the active document hands activity to the latest remaining one.
    pub(super) fn close(&mut self, uri: &Url) {
        self.open_documents.retain(|open| open != uri);
        if self.active_document.as_ref() == Some(uri) {
            self.active_document = self.open_documents.last().cloned();
        }
    }
}
