use serde::Serialize;

use crate::parser::patterns::{DAY_LABEL, DAY_LOOSE};
use crate::parser::{Strategy, first_success};

/// Where the day number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySource {
    /// A `Day N:` label in the text.
    Label,
    /// The caller's expected day number.
    Expected,
    /// A `Day N` mention without the colon.
    LooseLabel,
    /// Nothing found; defaulted to day 1.
    Default,
}

pub struct DayQuery<'a> {
    pub text: &'a str,
    pub expected: Option<u32>,
}

fn from_label(q: &DayQuery<'_>) -> Option<u32> {
    DAY_LABEL.captures(q.text)?.get(1)?.as_str().parse().ok()
}

fn from_expected(q: &DayQuery<'_>) -> Option<u32> {
    q.expected
}

fn from_loose_label(q: &DayQuery<'_>) -> Option<u32> {
    DAY_LOOSE.captures(q.text)?.get(1)?.as_str().parse().ok()
}

fn default_day(_: &DayQuery<'_>) -> Option<u32> {
    Some(1)
}

/// Find the day number: label, then expected, then a loose label, then 1.
pub fn extract_day_number(text: &str, expected: Option<u32>) -> (u32, DaySource) {
    let query = DayQuery { text, expected };
    let cascade: [(DaySource, Strategy<DayQuery<'_>, u32>); 4] = [
        (DaySource::Label, from_label),
        (DaySource::Expected, from_expected),
        (DaySource::LooseLabel, from_loose_label),
        (DaySource::Default, default_day),
    ];

    let (source, day) = first_success(&cascade, &query).unwrap_or((DaySource::Default, 1));
    match source {
        DaySource::Label => {}
        DaySource::Expected => {
            tracing::warn!(day, "no day label found, using expected day number");
        }
        DaySource::LooseLabel => {
            tracing::warn!(day, "day label without colon, using loose match");
        }
        DaySource::Default => {
            tracing::error!("could not determine day number, defaulting to Day 1");
        }
    }
    (day, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_wins() {
        assert_eq!(extract_day_number("Day 3:\n- Lunch", Some(5)), (3, DaySource::Label));
        assert_eq!(extract_day_number("day 6: stuff", None), (6, DaySource::Label));
    }

    #[test]
    fn test_expected_before_loose() {
        assert_eq!(extract_day_number("Day 4 plan", Some(2)), (2, DaySource::Expected));
        assert_eq!(extract_day_number("Day 4 plan", None), (4, DaySource::LooseLabel));
    }

    #[test]
    fn test_default_day_one() {
        assert_eq!(extract_day_number("no label here", None), (1, DaySource::Default));
    }
}
