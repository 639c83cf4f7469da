//! `[`: the start of a link, or of a footnote call that turned out not to
//! be one.

use crate::event::Name;
use crate::lexer::Code;
use crate::state::State;
use crate::tokenizer::{LabelKind, LabelStart, Tokenizer};

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('[') {
        return State::Nok;
    }

    let enter = tokenizer.events.len();
    tokenizer.enter(Name::LabelLink);
    tokenizer.enter(Name::LabelMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelMarker);
    tokenizer.exit(Name::LabelLink);
    tokenizer.tokenize_state.label_starts.push(LabelStart {
        kind: LabelKind::Link,
        start: (enter, tokenizer.events.len() - 1),
        inactive: false,
    });
    State::Ok
}
