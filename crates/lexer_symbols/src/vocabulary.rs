use serde::{Deserialize, Serialize};

/// Token type of the synthetic end-of-input marker.
pub const EOF_TOKEN_TYPE: i32 = -1;

/// Literal and symbolic token names of a compiled lexer, indexed by token type.
///
/// Owned by whoever compiled the grammar; the tree only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub literal_names: Vec<Option<String>>,
    pub symbolic_names: Vec<Option<String>>,
}

impl Vocabulary {
    pub fn new(literal_names: Vec<Option<String>>, symbolic_names: Vec<Option<String>>) -> Self {
        Self {
            literal_names,
            symbolic_names,
        }
    }

    pub fn from_names(literal_names: &[Option<&str>], symbolic_names: &[Option<&str>]) -> Self {
        fn own(names: &[Option<&str>]) -> Vec<Option<String>> {
            names.iter().map(|name| name.map(str::to_string)).collect()
        }
        Self::new(own(literal_names), own(symbolic_names))
    }

    /// Highest token type in the vocabulary, `-1` when there are no tokens.
    pub fn max_token_type(&self) -> i32 {
        let len = self.literal_names.len().max(self.symbolic_names.len());
        i32::try_from(len).unwrap_or(i32::MAX) - 1
    }

    pub fn literal_name(&self, token_type: i32) -> Option<&str> {
        Self::name_at(&self.literal_names, token_type)
    }

    pub fn symbolic_name(&self, token_type: i32) -> Option<&str> {
        Self::name_at(&self.symbolic_names, token_type)
    }

    // Empty names count as missing.
    fn name_at(names: &[Option<String>], token_type: i32) -> Option<&str> {
        let index = usize::try_from(token_type).ok()?;
        names
            .get(index)?
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub index: i32,
    pub literal: Option<String>,
    pub symbolic: Option<String>,
}

impl TokenDescriptor {
    /// Empty names are stored as missing.
    pub fn new(index: i32, literal: Option<&str>, symbolic: Option<&str>) -> Self {
        let own = |name: Option<&str>| name.filter(|name| !name.is_empty()).map(str::to_string);
        Self {
            index,
            literal: own(literal),
            symbolic: own(symbolic),
        }
    }

    pub fn from_vocabulary(vocabulary: &Vocabulary, index: i32) -> Self {
        Self::new(
            index,
            vocabulary.literal_name(index),
            vocabulary.symbolic_name(index),
        )
    }

    pub fn is_unused(&self) -> bool {
        self.literal.is_none() && self.symbolic.is_none()
    }
}

/// One descriptor per token type `0..=max_token_type`, in ascending order.
pub fn enumerate_tokens(vocabulary: &Vocabulary) -> Vec<TokenDescriptor> {
    (0..=vocabulary.max_token_type())
        .map(|index| TokenDescriptor::from_vocabulary(vocabulary, index))
        .collect()
}
