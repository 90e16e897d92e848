use crate::backend::GrammarBackend;
use crate::caption::format_caption;
use crate::config::ProviderConfig;
use crate::error::LexerSymbolsError;
use crate::tree::{LexerSymbolItem, NavigationCommand};
use crate::vocabulary::TokenDescriptor;

/// Name used to ask the backend about a token.
///
/// The symbolic name wins. Otherwise the literal with its surrounding quote
/// characters removed (`'if'` becomes `if`); a literal shorter than two
/// characters yields an empty key.
pub fn lookup_key(token: &TokenDescriptor) -> String {
    if let Some(symbolic) = token.symbolic.as_deref() {
        return symbolic.to_string();
    }
    token
        .literal
        .as_deref()
        .map(strip_delimiters)
        .unwrap_or_default()
        .to_string()
}

fn strip_delimiters(literal: &str) -> &str {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Builds the tree item for one token, asking the backend where it is defined.
pub async fn resolve_token<B>(
    backend: &B,
    file: &str,
    token: &TokenDescriptor,
    config: &ProviderConfig,
) -> Result<LexerSymbolItem, LexerSymbolsError>
where
    B: GrammarBackend + ?Sized,
{
    let caption = format_caption(token);
    let key = lookup_key(token);
    tracing::trace!(index = token.index, key = %key, "resolving lexer symbol");

    let info = backend
        .info_for_symbol(file, &key)
        .await
        .map_err(|source| {
            tracing::warn!(index = token.index, key = %key, error = %source, "symbol lookup failed");
            LexerSymbolsError::Resolve {
                index: token.index,
                key: key.clone(),
                source,
            }
        })?;

    let command = match info.and_then(|info| info.definition) {
        Some(definition) => {
            NavigationCommand::select_range(&config.select_range_command, definition.range)
        }
        None => NavigationCommand::inert(),
    };
    Ok(LexerSymbolItem::leaf(caption, command, config))
}
