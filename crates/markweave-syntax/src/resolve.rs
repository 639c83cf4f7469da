//! Resolvers: rewrite passes over the event list.
//!
//! The variant order of [`ResolveName`] is the order in which registered
//! resolvers run when a tokenizer is flushed. Labels are matched before
//! attention so emphasis never pairs across a link boundary, and data is
//! merged before trailing whitespace is split off it.

use crate::construct::{
    attention, code_text, content, heading_atx, heading_setext, html_flow,
    label_end, list_item, partial_data, partial_whitespace,
};
use crate::message::Message;
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResolveName {
    Content,
    HeadingAtx,
    HeadingSetext,
    HtmlFlow,
    CodeText,
    Label,
    Attention,
    Data,
    String,
    Text,
    List,
}

/// Run a resolver over all events.
pub fn call(tokenizer: &mut Tokenizer, name: ResolveName) -> Result<(), Message> {
    call_scoped(tokenizer, name, 0)
}

/// Run a resolver over the events from `from` on.
///
/// Only scoped resolvers look at `from`; the others always see everything.
pub fn call_scoped(tokenizer: &mut Tokenizer, name: ResolveName, from: usize) -> Result<(), Message> {
    match name {
        ResolveName::Content => content::resolve(tokenizer, from)?,
        ResolveName::HeadingAtx => heading_atx::resolve(tokenizer, from),
        ResolveName::HeadingSetext => heading_setext::resolve(tokenizer),
        ResolveName::HtmlFlow => html_flow::resolve(tokenizer),
        ResolveName::CodeText => code_text::resolve(tokenizer, from),
        ResolveName::Label => label_end::resolve(tokenizer),
        ResolveName::Attention => attention::resolve(tokenizer),
        ResolveName::Data => partial_data::resolve(tokenizer),
        ResolveName::String => partial_whitespace::resolve(tokenizer, false, false),
        ResolveName::Text => partial_whitespace::resolve(tokenizer, true, true),
        ResolveName::List => list_item::resolve(tokenizer),
    }

    tokenizer.map.consume(&mut tokenizer.events);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_before_attention() {
        assert!(ResolveName::Label < ResolveName::Attention);
        assert!(ResolveName::Data < ResolveName::Text);
        assert!(ResolveName::Content < ResolveName::HeadingSetext);
    }
}
