//! # Attention
//!
//! Runs of `*` or `_` make emphasis and strong emphasis; with the GFM
//! extension, runs of one or two `~` make strikethrough.
//!
//! The tokenizer only marks each run as an [`Name::AttentionSequence`].
//! Whether a run can open or close, and what it pairs with, depends on the
//! characters around it and on every other run, so all of that happens in
//! [`resolve`] once the text is tokenized:
//!
//! ```text
//! ***a** b*
//! │└┴── strong, from the inner two of the opening run
//! └──── emphasis, with the last `*`
//! ```
//!
//! Runs only pair inside the same parent token, so emphasis never crosses
//! a link boundary.

use std::collections::BTreeMap;

use crate::event::{Event, Kind, Name, Point};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::character::{CharacterKind, classify};

pub fn start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(marker @ ('*' | '_' | '~')) => {
            tokenizer.tokenize_state.marker = marker;
            tokenizer.enter(Name::AttentionSequence);
            State::Retry(StateName::AttentionInside)
        }
        _ => State::Nok,
    }
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.consume();
        State::Next(StateName::AttentionInside)
    } else {
        tokenizer.exit(Name::AttentionSequence);
        tokenizer.tokenize_state.marker = '\0';
        State::Ok
    }
}

/// One run of markers, and what has been taken from it.
#[derive(Debug)]
struct Sequence {
    /// Index of the enter event.
    index: usize,
    /// Index of the enter event of the parent token, if any.
    parent: Option<usize>,
    marker: char,
    /// Points of each marker, plus the end.
    points: Vec<Point>,
    /// Markers still unused: `points[start..end]`.
    start: usize,
    end: usize,
    open: bool,
    close: bool,
    /// Events that close groups, before the unused markers.
    closes: Vec<Event>,
    /// Events that open groups, after the unused markers.
    opens: Vec<Event>,
}

impl Sequence {
    fn size(&self) -> usize {
        self.end - self.start
    }
}

fn group_names(marker: char, take: usize) -> (Name, Name, Name) {
    match (marker, take) {
        ('~', _) => (
            Name::GfmStrikethrough,
            Name::GfmStrikethroughSequence,
            Name::GfmStrikethroughText,
        ),
        (_, 1) => (Name::Emphasis, Name::EmphasisSequence, Name::EmphasisText),
        _ => (Name::Strong, Name::StrongSequence, Name::StrongText),
    }
}

/// Pair up attention runs and turn the rest into data.
pub fn resolve(tokenizer: &mut Tokenizer) {
    let mut sequences = collect(tokenizer);

    let mut groups: BTreeMap<Option<usize>, Vec<usize>> = BTreeMap::new();
    for (index, sequence) in sequences.iter().enumerate() {
        groups.entry(sequence.parent).or_default().push(index);
    }

    for mut members in groups.into_values() {
        match_sequences(&mut sequences, &mut members);
    }

    for sequence in sequences {
        let mut replacement = sequence.closes;

        if sequence.start < sequence.end {
            replacement.push(Event::enter(Name::Data, sequence.points[sequence.start].clone()));
            replacement.push(Event::exit(Name::Data, sequence.points[sequence.end].clone()));
        }

        replacement.extend(sequence.opens);
        tokenizer.map.add(sequence.index, 2, replacement);
    }
}

fn collect(tokenizer: &Tokenizer) -> Vec<Sequence> {
    let events = &tokenizer.events;
    let parse_state = tokenizer.parse_state;
    let mut parents: Vec<usize> = Vec::new();
    let mut sequences = Vec::new();

    for (index, event) in events.iter().enumerate() {
        if event.kind == Kind::Exit {
            parents.pop();
            continue;
        }

        if event.name == Name::AttentionSequence {
            let exit = index + 1;
            let mut points: Vec<Point> = parse_state
                .codes(&event.point, &events[exit].point)
                .into_iter()
                .map(|(point, _)| point)
                .collect();
            points.push(events[exit].point.clone());

            let marker = parse_state.code_at(&event.point).char().unwrap_or('*');

            let at_line_start = index == 0 || events[index - 1].name == Name::LineEnding;
            let at_line_end = exit + 1 == events.len() || events[exit + 1].name == Name::LineEnding;
            let before = if at_line_start {
                CharacterKind::Whitespace
            } else {
                classify(parse_state.code_before(&event.point))
            };
            let after = if at_line_end {
                CharacterKind::Whitespace
            } else {
                classify(parse_state.code_at(&events[exit].point))
            };

            let left = after == CharacterKind::Other
                || (after == CharacterKind::Punctuation && before != CharacterKind::Other);
            let right = before == CharacterKind::Other
                || (before == CharacterKind::Punctuation && after != CharacterKind::Other);

            let size = points.len() - 1;
            let (open, close) = match marker {
                '_' => (
                    left && (before != CharacterKind::Other || !right),
                    right && (after != CharacterKind::Other || !left),
                ),
                '~' if size > 2 => (false, false),
                _ => (left, right),
            };

            sequences.push(Sequence {
                index,
                parent: parents.last().copied(),
                marker,
                points,
                start: 0,
                end: size,
                open,
                close,
                closes: Vec::new(),
                opens: Vec::new(),
            });
        }

        parents.push(index);
    }

    sequences
}

/// Pair the runs at `members`, which all share one parent, left to right.
fn match_sequences(sequences: &mut [Sequence], members: &mut Vec<usize>) {
    let mut close = 0;

    while close < members.len() {
        let mut next = close + 1;
        let closer = members[close];

        if sequences[closer].close {
            let mut open = close;

            while open > 0 {
                open -= 1;
                let opener = members[open];

                if let Some(take) = take(&sequences[opener], &sequences[closer]) {
                    pair(sequences, opener, closer, take);

                    // Runs between the pair can no longer match anything.
                    members.drain(open + 1..close);
                    let mut closer_at = open + 1;

                    if sequences[opener].size() == 0 {
                        members.remove(open);
                        closer_at -= 1;
                    }

                    if sequences[closer].size() == 0 {
                        members.remove(closer_at);
                    }

                    // Revisit the closer: what is left of it may close more.
                    next = closer_at;
                    break;
                }
            }
        }

        close = next;
    }
}

/// How many markers two runs pair with, if they pair at all.
fn take(opener: &Sequence, closer: &Sequence) -> Option<usize> {
    if !opener.open || opener.marker != closer.marker || opener.size() == 0 {
        return None;
    }

    let open_size = opener.size();
    let close_size = closer.size();

    if opener.marker == '~' {
        return (open_size == close_size).then_some(open_size);
    }

    // Rule of three: a run that can both open and close only pairs with
    // another if their sizes do not add up to a multiple of three.
    if (opener.close || closer.open)
        && close_size % 3 != 0
        && (open_size + close_size) % 3 == 0
    {
        return None;
    }

    Some(if open_size > 1 && close_size > 1 { 2 } else { 1 })
}

fn pair(sequences: &mut [Sequence], opener: usize, closer: usize, take: usize) {
    let (group, sequence_name, text) = group_names(sequences[opener].marker, take);

    let open = &mut sequences[opener];
    open.end -= take;
    let from = open.points[open.end].clone();
    let to = open.points[open.end + take].clone();
    let mut opens = vec![
        Event::enter(group, from.clone()),
        Event::enter(sequence_name, from),
        Event::exit(sequence_name, to.clone()),
        Event::enter(text, to),
    ];
    opens.append(&mut open.opens);
    open.opens = opens;

    let close = &mut sequences[closer];
    let from = close.points[close.start].clone();
    let to = close.points[close.start + take].clone();
    close.start += take;
    close.closes.extend([
        Event::exit(text, from.clone()),
        Event::enter(sequence_name, from),
        Event::exit(sequence_name, to.clone()),
        Event::exit(group, to),
    ]);
}

#[cfg(test)]
mod tests {
    use crate::event::{Kind, Name};
    use crate::{ParseOptions, parse};
    use pretty_assertions::assert_eq;

    fn groups(input: &str, options: &ParseOptions) -> Vec<Name> {
        let (events, _) = parse(input, options).unwrap();
        events
            .iter()
            .filter(|event| {
                event.kind == Kind::Enter
                    && matches!(
                        event.name,
                        Name::Emphasis | Name::Strong | Name::GfmStrikethrough
                    )
            })
            .map(|event| event.name)
            .collect()
    }

    #[test]
    fn strong_inside_emphasis() {
        assert_eq!(
            groups("***a***", &ParseOptions::default()),
            vec![Name::Emphasis, Name::Strong]
        );
    }

    #[test]
    fn intraword_underscore_does_not_open() {
        assert!(groups("snake_case_name", &ParseOptions::default()).is_empty());
        assert_eq!(groups("a*b*c", &ParseOptions::default()), vec![Name::Emphasis]);
    }

    #[test]
    fn rule_of_three() {
        assert_eq!(groups("*a**b*", &ParseOptions::default()), vec![Name::Emphasis]);
    }

    #[test]
    fn strikethrough_needs_equal_runs() {
        let options = ParseOptions::gfm();
        assert_eq!(groups("~~a~~", &options), vec![Name::GfmStrikethrough]);
        assert!(groups("~~a~", &options).is_empty());
        assert!(groups("~~~a~~~", &options).is_empty());
    }

    #[test]
    fn never_crosses_a_link() {
        assert!(groups("*[a*](b)", &ParseOptions::default()).is_empty());
    }
}
