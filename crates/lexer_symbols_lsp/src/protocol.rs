use lexer_symbols::{
    CollapsibleState, IconPath, LexerSymbolItem, NavigationCommand, SourcePosition, SourceRange,
};
use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{Command, Position, Range, TextDocumentIdentifier, Url};

pub const LEXER_SYMBOLS_METHOD: &str = "antlr/lexerSymbols";
pub const ACTIVE_DOCUMENT_CHANGED_METHOD: &str = "antlr/activeDocumentChanged";

/// Request for one level of the lexer symbol tree.
///
/// Without `text_document` the server uses the document the client last
/// reported as active. With `item` the request is for that item's children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexerSymbolsParams {
    #[serde(default)]
    pub text_document: Option<TextDocumentIdentifier>,
    #[serde(default)]
    pub item: Option<LexerSymbolItemDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDocumentParams {
    #[serde(default)]
    pub uri: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexerSymbolsChangedParams {
    pub uri: Option<Url>,
}

pub enum LexerSymbolsChanged {}

impl Notification for LexerSymbolsChanged {
    type Params = LexerSymbolsChangedParams;
    const METHOD: &'static str = "antlr/lexerSymbolsChanged";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPathDto {
    pub light: String,
    pub dark: String,
}

/// Tree item as sent to the editor. `collapsibleState` uses the editor's
/// numbering: 0 none, 1 collapsed, 2 expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexerSymbolItemDto {
    pub label: String,
    #[serde(default)]
    pub collapsible_state: u8,
    #[serde(default)]
    pub command: Option<Command>,
    #[serde(default)]
    pub context_value: Option<String>,
    #[serde(default)]
    pub icon_path: Option<IconPathDto>,
}

impl LexerSymbolItemDto {
    pub fn from_item(item: &LexerSymbolItem) -> Self {
        Self {
            label: item.label.clone(),
            collapsible_state: collapsible_state_to_wire(item.collapsible_state),
            command: item.command.as_ref().map(command_to_lsp),
            context_value: Some(item.context_value.clone()),
            icon_path: item.icon_path.as_ref().map(|icon| IconPathDto {
                light: icon.light.display().to_string(),
                dark: icon.dark.display().to_string(),
            }),
        }
    }

    pub fn into_item(self) -> LexerSymbolItem {
        LexerSymbolItem {
            label: self.label,
            collapsible_state: collapsible_state_from_wire(self.collapsible_state),
            command: self.command.map(command_from_lsp),
            context_value: self.context_value.unwrap_or_default(),
            icon_path: self.icon_path.map(|icon| IconPath {
                light: icon.light.into(),
                dark: icon.dark.into(),
            }),
        }
    }
}

fn collapsible_state_to_wire(state: CollapsibleState) -> u8 {
    match state {
        CollapsibleState::None => 0,
        CollapsibleState::Collapsed => 1,
        CollapsibleState::Expanded => 2,
    }
}

fn collapsible_state_from_wire(state: u8) -> CollapsibleState {
    match state {
        1 => CollapsibleState::Collapsed,
        2 => CollapsibleState::Expanded,
        _ => CollapsibleState::None,
    }
}

/// Grammar rows are 1-based, LSP lines are 0-based; columns match.
pub fn source_range_to_range(range: SourceRange) -> Range {
    Range::new(
        Position::new(range.start.row.saturating_sub(1), range.start.column),
        Position::new(range.end.row.saturating_sub(1), range.end.column),
    )
}

pub fn range_to_source_range(range: Range) -> SourceRange {
    SourceRange::new(
        SourcePosition::new(range.start.line + 1, range.start.character),
        SourcePosition::new(range.end.line + 1, range.end.character),
    )
}

pub fn command_to_lsp(command: &NavigationCommand) -> Command {
    let arguments: Vec<serde_json::Value> = command
        .arguments
        .iter()
        .filter_map(|range| serde_json::to_value(source_range_to_range(*range)).ok())
        .collect();
    Command {
        title: command.title.clone(),
        command: command.command.clone(),
        arguments: if arguments.is_empty() {
            None
        } else {
            Some(arguments)
        },
    }
}

pub fn command_from_lsp(command: Command) -> NavigationCommand {
    let arguments = command
        .arguments
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value::<Range>(value).ok())
        .map(range_to_source_range)
        .collect();
    NavigationCommand {
        title: command.title,
        command: command.command,
        arguments,
    }
}
