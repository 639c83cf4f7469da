//! Whitespace around line endings in string and text content.
//!
//! Spaces and tabs at the start and end of each line are split off the
//! data they belong to. Two or more trailing spaces before a line ending in
//! text become a hard break.

use crate::event::{Event, Kind, Name};
use crate::lexer::Code;
use crate::tokenizer::Tokenizer;
use crate::util::constant::HARD_BREAK_PREFIX_SIZE_MIN;

/// Split whitespace off data.
///
/// `hard_break` turns trailing spaces into hard breaks; `trim_whole` also
/// trims the very start and end of the content.
pub fn resolve(tokenizer: &mut Tokenizer, hard_break: bool, trim_whole: bool) {
    let mut index = 0;

    while index < tokenizer.events.len() {
        let event = &tokenizer.events[index];

        if event.kind == Kind::Exit && event.name == Name::Data {
            let len = tokenizer.events.len();
            let trim_start = (trim_whole && index == 1)
                || (index > 1 && tokenizer.events[index - 2].name == Name::LineEnding);
            let trim_end = (trim_whole && index == len - 1)
                || (index + 1 < len && tokenizer.events[index + 1].name == Name::LineEnding);

            trim_data(tokenizer, index, trim_start, trim_end, hard_break);
        }

        index += 1;
    }
}

fn trim_data(
    tokenizer: &mut Tokenizer,
    exit_index: usize,
    trim_start: bool,
    trim_end: bool,
    hard_break: bool,
) {
    let mut codes = tokenizer.parse_state.codes(
        &tokenizer.events[exit_index - 1].point,
        &tokenizer.events[exit_index].point,
    );

    if trim_end {
        let mut index = codes.len();
        let mut spaces_only = true;

        while index > 0 {
            match codes[index - 1].1 {
                Code::Char(' ') => {}
                Code::HorizontalTab | Code::VirtualSpace => spaces_only = false,
                _ => break,
            }
            index -= 1;
        }

        let trailing = codes.len() - index;
        let name = if hard_break
            && spaces_only
            && trailing >= HARD_BREAK_PREFIX_SIZE_MIN
            && exit_index + 1 < tokenizer.events.len()
        {
            Name::HardBreakTrailing
        } else {
            Name::SpaceOrTab
        };

        // All whitespace: rename the token.
        if index == 0 {
            tokenizer.events[exit_index - 1].name = name;
            tokenizer.events[exit_index].name = name;
            return;
        }

        if trailing > 0 {
            let exit_point = tokenizer.events[exit_index].point.clone();
            let enter_point = codes[index].0.clone();
            tokenizer.map.add(
                exit_index + 1,
                0,
                vec![
                    Event::enter(name, enter_point.clone()),
                    Event::exit(name, exit_point),
                ],
            );
            tokenizer.events[exit_index].point = enter_point;
            codes.truncate(index);
        }
    }

    if trim_start {
        let leading = codes
            .iter()
            .take_while(|(_, code)| code.is_space_or_tab())
            .count();

        if leading == codes.len() {
            tokenizer.events[exit_index - 1].name = Name::SpaceOrTab;
            tokenizer.events[exit_index].name = Name::SpaceOrTab;
            return;
        }

        if leading > 0 {
            let enter_point = tokenizer.events[exit_index - 1].point.clone();
            let exit_point = codes[leading].0.clone();
            tokenizer.map.add(
                exit_index - 1,
                0,
                vec![
                    Event::enter(Name::SpaceOrTab, enter_point),
                    Event::exit(Name::SpaceOrTab, exit_point.clone()),
                ],
            );
            tokenizer.events[exit_index - 1].point = exit_point;
        }
    }
}
