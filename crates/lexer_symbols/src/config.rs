use std::path::PathBuf;

use serde::Deserialize;

use crate::error::LexerSymbolsError;

pub const DEFAULT_SELECT_RANGE_COMMAND: &str = "antlr.selectGrammarRange";
pub const DEFAULT_CONTEXT_VALUE: &str = "lexerSymbols";
pub const DEFAULT_EOF_TITLE: &str = "<unused>";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Command the host runs to jump to a token definition.
    pub select_range_command: String,
    pub context_value: String,
    /// Directory holding `token-light.svg` and `token-dark.svg`.
    pub icon_root: Option<PathBuf>,
    pub eof_title: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            select_range_command: DEFAULT_SELECT_RANGE_COMMAND.to_string(),
            context_value: DEFAULT_CONTEXT_VALUE.to_string(),
            icon_root: None,
            eof_title: DEFAULT_EOF_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedSettings {
    lexer_symbols: ProviderConfig,
}

impl ProviderConfig {
    /// Reads settings either at the top level or under a `lexerSymbols` key.
    pub fn from_value(value: serde_json::Value) -> Result<Self, LexerSymbolsError> {
        if value.get("lexerSymbols").is_some() {
            let nested: NestedSettings =
                serde_json::from_value(value).map_err(LexerSymbolsError::InvalidConfig)?;
            return Ok(nested.lexer_symbols);
        }
        serde_json::from_value(value).map_err(LexerSymbolsError::InvalidConfig)
    }
}
