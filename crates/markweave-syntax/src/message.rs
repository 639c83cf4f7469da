//! Internal-consistency faults.
//!
//! Markdown itself never fails to parse: every byte sequence has a plain
//! text fallback. A [`Message`] only signals that a construct or resolver
//! left the event list in a state the compiler cannot walk.

use thiserror::Error;

use crate::event::Point;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{reason} ({origin}:{rule_id})", point_prefix(.point))]
pub struct Message {
    pub point: Option<Point>,
    pub reason: String,
    pub rule_id: &'static str,
    pub origin: &'static str,
}

fn point_prefix(point: &Option<Point>) -> String {
    point
        .as_ref()
        .map(|point| format!("{}:{}: ", point.line, point.column))
        .unwrap_or_default()
}

impl Message {
    pub fn new(point: Option<Point>, reason: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            point,
            reason: reason.into(),
            rule_id,
            origin: "markweave",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_position_and_rule() {
        let message = Message::new(Some(Point::start()), "Cannot close `Paragraph`", "mismatch");
        assert_eq!(
            message.to_string(),
            "1:1: Cannot close `Paragraph` (markweave:mismatch)"
        );
    }

    #[test]
    fn display_without_position() {
        let message = Message::new(None, "Unexpected end", "eof");
        assert_eq!(message.to_string(), "Unexpected end (markweave:eof)");
    }
}
