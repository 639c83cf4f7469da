//! Walk over events of uninteresting names.

use crate::event::{Event, Name};

/// First index at or after `index` whose name is not in `names`.
pub fn opt(events: &[Event], index: usize, names: &[Name]) -> usize {
    let mut index = index;
    while index < events.len() && names.contains(&events[index].name) {
        index += 1;
    }
    index
}

/// Last index at or before `index` whose name is not in `names`.
///
/// Returns `None` when everything before is skipped.
pub fn opt_back(events: &[Event], index: usize, names: &[Name]) -> Option<usize> {
    let mut index = index;
    loop {
        if !names.contains(&events[index].name) {
            return Some(index);
        }
        if index == 0 {
            return None;
        }
        index -= 1;
    }
}

/// First index at or after `index` whose name is in `names`.
pub fn to(events: &[Event], index: usize, names: &[Name]) -> usize {
    let mut index = index;
    while index < events.len() && !names.contains(&events[index].name) {
        index += 1;
    }
    index
}

/// Last index at or before `index` whose name is in `names`.
pub fn to_back(events: &[Event], index: usize, names: &[Name]) -> Option<usize> {
    let mut index = index;
    loop {
        if names.contains(&events[index].name) {
            return Some(index);
        }
        if index == 0 {
            return None;
        }
        index -= 1;
    }
}

/// Index of the exit event that closes the enter event at `index`.
pub fn exit_of(events: &[Event], index: usize) -> usize {
    let mut depth = 0;
    let mut current = index;

    while current < events.len() {
        if events[current].is_enter() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return current;
            }
        }
        current += 1;
    }

    events.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Point;
    use pretty_assertions::assert_eq;

    fn events() -> Vec<Event> {
        vec![
            Event::enter(Name::Paragraph, Point::start()),
            Event::enter(Name::Data, Point::start()),
            Event::exit(Name::Data, Point::start()),
            Event::enter(Name::LineEnding, Point::start()),
            Event::exit(Name::LineEnding, Point::start()),
            Event::exit(Name::Paragraph, Point::start()),
        ]
    }

    #[test]
    fn finds_matching_exit() {
        assert_eq!(exit_of(&events(), 0), 5);
        assert_eq!(exit_of(&events(), 3), 4);
    }

    #[test]
    fn skips_forward_and_back() {
        let events = events();
        assert_eq!(opt(&events, 1, &[Name::Data]), 3);
        assert_eq!(to(&events, 0, &[Name::LineEnding]), 3);
        assert_eq!(opt_back(&events, 4, &[Name::LineEnding]), Some(2));
        assert_eq!(to_back(&events, 4, &[Name::Paragraph]), Some(0));
        assert_eq!(opt_back(&events, 0, &[Name::Paragraph]), None);
    }
}
