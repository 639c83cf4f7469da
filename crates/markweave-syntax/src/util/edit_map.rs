//! Deferred splices into an event list.
//!
//! Resolvers describe their edits against the indices of the list as it is
//! *now*. Adding an edit is a push; [`EditMap::consume`] sorts the edits once
//! and rebuilds the list from the first edit on in a single forward pass, so
//! no edit ever shifts the indices another one refers to.

use crate::event::Event;

#[derive(Debug)]
struct Edit {
    index: usize,
    remove: usize,
    add: Vec<Event>,
    /// Goes before earlier edits at the same index.
    before: bool,
}

#[derive(Debug, Default)]
pub struct EditMap {
    /// In call order until consumed.
    map: Vec<Edit>,
}

impl EditMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove `remove` events at `index` and insert `add` there.
    ///
    /// Edits at the same index are merged: removals add up and insertions
    /// are appended in call order.
    pub fn add(&mut self, index: usize, remove: usize, add: Vec<Event>) {
        self.add_impl(index, remove, add, false);
    }

    /// Like [`EditMap::add`], but inserts before earlier edits at `index`.
    pub fn add_before(&mut self, index: usize, remove: usize, add: Vec<Event>) {
        self.add_impl(index, remove, add, true);
    }

    fn add_impl(&mut self, index: usize, remove: usize, add: Vec<Event>, before: bool) {
        if remove == 0 && add.is_empty() {
            return;
        }

        self.map.push(Edit {
            index,
            remove,
            add,
            before,
        });
    }

    /// Apply all edits to `events`.
    pub fn consume(&mut self, events: &mut Vec<Event>) {
        if self.map.is_empty() {
            return;
        }

        let mut edits = std::mem::take(&mut self.map);
        // Stable, so edits at one index keep their call order.
        edits.sort_by_key(|edit| edit.index);

        // Everything before the first edit stays where it is.
        let mut position = edits[0].index.min(events.len());
        let mut old = events.split_off(position).into_iter();
        let added: usize = edits.iter().map(|edit| edit.add.len()).sum();
        events.reserve(old.len() + added);
        let mut edits = edits.into_iter().peekable();

        while let Some(first) = edits.next() {
            let index = first.index;
            let mut remove = first.remove;
            let mut add = first.add;

            while let Some(edit) = edits.next_if(|edit| edit.index == index) {
                remove += edit.remove;
                if edit.before {
                    let mut front = edit.add;
                    front.append(&mut add);
                    add = front;
                } else {
                    add.extend(edit.add);
                }
            }

            while position < index {
                match old.next() {
                    Some(event) => events.push(event),
                    None => break,
                }
                position += 1;
            }

            events.extend(add);

            let end = index + remove;
            while position < end {
                if old.next().is_none() {
                    break;
                }
                position += 1;
            }
        }

        events.extend(old);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Name, Point};
    use pretty_assertions::assert_eq;

    fn event(name: Name) -> Event {
        Event::enter(name, Point::start())
    }

    fn names(events: &[Event]) -> Vec<Name> {
        events.iter().map(|event| event.name).collect()
    }

    #[test]
    fn edits_use_original_indices() {
        let mut events = vec![
            event(Name::Data),
            event(Name::LineEnding),
            event(Name::Data),
        ];
        let mut map = EditMap::new();

        map.add(2, 1, vec![event(Name::Emphasis), event(Name::Strong)]);
        map.add(0, 1, vec![]);
        map.add(1, 0, vec![event(Name::Paragraph)]);
        map.consume(&mut events);

        assert_eq!(
            names(&events),
            vec![
                Name::Paragraph,
                Name::LineEnding,
                Name::Emphasis,
                Name::Strong
            ]
        );
        assert!(map.is_empty());
    }

    #[test]
    fn edits_at_one_index_merge() {
        let mut events = vec![event(Name::Data)];
        let mut map = EditMap::new();

        map.add(1, 0, vec![event(Name::Emphasis)]);
        map.add(1, 0, vec![event(Name::Strong)]);
        map.add_before(1, 0, vec![event(Name::Link)]);
        map.consume(&mut events);

        assert_eq!(
            names(&events),
            vec![Name::Data, Name::Link, Name::Emphasis, Name::Strong]
        );
    }

    #[test]
    fn edits_added_back_to_front() {
        let mut events: Vec<Event> = (0..100).map(|_| event(Name::Data)).collect();
        let mut map = EditMap::new();

        for index in (1..100).rev().step_by(2) {
            map.add(index, 1, vec![event(Name::LineEnding)]);
        }
        map.consume(&mut events);

        assert_eq!(events.len(), 100);
        for (index, event) in events.iter().enumerate() {
            let expected = if index % 2 == 1 {
                Name::LineEnding
            } else {
                Name::Data
            };
            assert_eq!(event.name, expected, "at {index}");
        }
    }
}
