use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::models::{DayOptions, Targets};
use crate::parser::patterns::DAY_MARKER;
use crate::pipeline::{DayOutcome, process_single_day};
use crate::planner::constants::MAX_DAYS;

/// Incremental day splitter for text that arrives in chunks.
///
/// A day is complete once the next `Day N:` marker has arrived. Text before
/// the first marker is dropped. At most seven days are ever yielded.
#[derive(Debug, Default)]
pub struct DayStream {
    buffer: String,
    emitted: usize,
}

impl DayStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Days emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn take(&mut self, day: &str, out: &mut Vec<String>) {
        let day = day.trim();
        if day.is_empty() || self.emitted >= MAX_DAYS {
            return;
        }
        out.push(day.to_string());
        self.emitted += 1;
    }

    /// Feed a chunk; returns every day completed by it.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let starts: Vec<usize> = DAY_MARKER
            .find_iter(&self.buffer)
            .map(|m| m.start())
            .collect();
        if starts.len() < 2 {
            return Vec::new();
        }

        let mut days = Vec::new();
        for pair in starts.windows(2) {
            let day = self.buffer[pair[0]..pair[1]].to_string();
            self.take(&day, &mut days);
        }

        let last = starts[starts.len() - 1];
        self.buffer.drain(..last);
        days
    }

    /// Flush the final day.
    ///
    /// Text that never contained a marker is returned whole.
    pub fn finish(mut self) -> Vec<String> {
        let buffer = std::mem::take(&mut self.buffer);
        let rest = match DAY_MARKER.find(&buffer) {
            Some(m) => &buffer[m.start()..],
            None if self.emitted == 0 => buffer.as_str(),
            None => "",
        };

        let mut days = Vec::new();
        self.take(rest, &mut days);
        days
    }
}

/// Split multi-day text into at most seven day blocks.
pub fn split_days(text: &str) -> Vec<String> {
    let mut stream = DayStream::new();
    let mut days = stream.push(text);
    days.extend(stream.finish());
    days
}

/// Reconcile every day of a multi-day text in parallel, in order.
///
/// Each day's ordinal is its expected day number.
pub fn process_week(
    text: &str,
    targets: &Targets,
    options: &DayOptions,
    config: &EngineConfig,
) -> Vec<DayOutcome> {
    let days = split_days(text);
    tracing::info!(days = days.len(), "processing multi-day plan");

    days.par_iter()
        .enumerate()
        .map(|(i, day)| {
            let options = DayOptions {
                expected_day: Some(i as u32 + 1),
                ..*options
            };
            process_single_day(day, targets, &options, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_days_drops_preamble() {
        let text = "Here you go!\nDay 1:\n- Breakfast (300 kcal):\nDay 2:\n- Lunch (500 kcal):\n";
        let days = split_days(text);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0], "Day 1:\n- Breakfast (300 kcal):");
        assert_eq!(days[1], "Day 2:\n- Lunch (500 kcal):");
    }

    #[test]
    fn test_split_days_without_marker() {
        assert_eq!(split_days("  - Snack (100 kcal):  "), vec!["- Snack (100 kcal):"]);
        assert!(split_days("   ").is_empty());
    }

    #[test]
    fn test_split_caps_at_seven() {
        let text: String = (1..=9).map(|d| format!("Day {d}:\nfood\n")).collect();
        let days = split_days(&text);
        assert_eq!(days.len(), 7);
        assert!(days[6].starts_with("Day 7:"));
    }

    #[test]
    fn test_stream_emits_on_next_marker() {
        let mut stream = DayStream::new();
        assert!(stream.push("Day 1:\n- Breakfast").is_empty());
        assert!(stream.push(" (300 kcal):\nDa").is_empty());

        let done = stream.push("y 2:\n- Lunch");
        assert_eq!(done, vec!["Day 1:\n- Breakfast (300 kcal):"]);
        assert_eq!(stream.emitted(), 1);

        assert_eq!(stream.finish(), vec!["Day 2:\n- Lunch"]);
    }
}
