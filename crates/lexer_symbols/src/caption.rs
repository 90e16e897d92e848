use crate::vocabulary::TokenDescriptor;

pub const EOF_CAPTION: &str = "-1: EOF";

const UNUSED: &str = "<unused>";
const IMPLICIT_TOKEN: &str = "<implicit token>";

/// Display text for a token slot, e.g. `2: PLUS ('+')` or `7: <unused>`.
pub fn format_caption(token: &TokenDescriptor) -> String {
    let mut caption = format!("{}: ", token.index);
    if token.is_unused() {
        caption.push_str(UNUSED);
        return caption;
    }

    match token.symbolic.as_deref() {
        Some(symbolic) => caption.push_str(symbolic),
        None => caption.push_str(IMPLICIT_TOKEN),
    }
    if let Some(literal) = token.literal.as_deref() {
        caption.push_str(" (");
        caption.push_str(literal);
        caption.push(')');
    }
    caption
}
