pub mod day;
pub mod headers;
pub mod lines;
pub mod normalize;
pub mod patterns;

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{DayPlan, Item, Meal, MealName};

pub use day::{DaySource, extract_day_number};
pub use headers::{MealHeader, find_headers};
pub use lines::{inline_item, parse_food_line, scan_lines};
pub use normalize::normalize_text;

/// Which parsing strategy produced a piece of structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseTier {
    /// `- <Meal> (<N> kcal):` header.
    StrictHeader,
    /// `<Meal> (<digits>` anywhere in the text.
    LooseHeader,
    /// Items taken from numbered or separator-formatted food lines.
    LineScan,
    /// One synthetic item built from text on the header line.
    InlineFallback,
    /// Nothing usable; the input is returned as-is.
    Passthrough,
}

/// A strategy inspects its query and either produces a value or declines.
pub type Strategy<Q, T> = fn(&Q) -> Option<T>;

/// Run strategies in order; the first `Some` wins.
pub fn first_success<Q, T, Tag: Copy>(
    strategies: &[(Tag, Strategy<Q, T>)],
    query: &Q,
) -> Option<(Tag, T)> {
    strategies
        .iter()
        .find_map(|(tag, strategy)| strategy(query).map(|value| (*tag, value)))
}

/// How each meal was recovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealTrace {
    pub meal: MealName,
    pub header_tier: ParseTier,
    /// `None` when neither line scan nor inline fallback found anything.
    pub item_tier: Option<ParseTier>,
    pub items: usize,
}

/// Parse-time observations for logging and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseDiagnostics {
    pub day_source: DaySource,
    pub meals: Vec<MealTrace>,
    /// Lines starting with `N.` in the raw text.
    pub numbered_lines: usize,
    /// `<number> kcal` mentions in the raw text.
    pub kcal_mentions: usize,
}

impl ParseDiagnostics {
    pub fn inline_fallbacks(&self) -> usize {
        self.meals
            .iter()
            .filter(|m| m.item_tier == Some(ParseTier::InlineFallback))
            .count()
    }

    /// Weakest item tier any meal needed; `Passthrough` when no meal has items.
    pub fn item_tier(&self) -> ParseTier {
        if self.meals.iter().all(|m| m.item_tier.is_none()) {
            ParseTier::Passthrough
        } else if self.inline_fallbacks() > 0 {
            ParseTier::InlineFallback
        } else {
            ParseTier::LineScan
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDay {
    pub plan: DayPlan,
    pub diagnostics: ParseDiagnostics,
}

struct ItemQuery<'a> {
    text: &'a str,
    header: MealHeader,
    scanned: Option<&'a Vec<Item>>,
}

fn scanned_items(q: &ItemQuery<'_>) -> Option<Vec<Item>> {
    q.scanned.filter(|items| !items.is_empty()).cloned()
}

fn inline_items(q: &ItemQuery<'_>) -> Option<Vec<Item>> {
    inline_item(q.text, q.header.meal, q.header.stated_total).map(|item| vec![item])
}

/// Parse normalized text into a day plan.
///
/// Each step is a cascade of strategies tried in order; the first match wins
/// and its tier is recorded. Never fails: missing structure yields fewer items.
pub fn parse_day(text: &str, expected_day: Option<u32>) -> ParsedDay {
    let numbered_lines = patterns::NUMBERED_LINE_MULTI.find_iter(text).count();
    let kcal_mentions = patterns::CALORIES.find_iter(text).count();
    tracing::info!(
        len = text.len(),
        numbered_lines,
        kcal_mentions,
        "parsing day text"
    );
    if numbered_lines < 8 {
        let preview: String = text.chars().take(200).collect();
        tracing::warn!(preview = %preview.replace('\n', "\\n"), "low item count in raw text");
    }

    let (day_number, day_source) = extract_day_number(text, expected_day);
    let headers = find_headers(text);
    let known: Vec<MealName> = headers.iter().map(|h| h.meal).collect();
    let scanned: HashMap<MealName, Vec<Item>> = scan_lines(text, &known);

    let cascade: [(ParseTier, Strategy<ItemQuery<'_>, Vec<Item>>); 2] = [
        (ParseTier::LineScan, scanned_items),
        (ParseTier::InlineFallback, inline_items),
    ];

    let mut plan = DayPlan::new(day_number);
    let mut traces = Vec::with_capacity(headers.len());

    for header in headers {
        let query = ItemQuery {
            text,
            header,
            scanned: scanned.get(&header.meal),
        };
        let (item_tier, items) = match first_success(&cascade, &query) {
            Some((tier, items)) => (Some(tier), items),
            None => (None, Vec::new()),
        };

        traces.push(MealTrace {
            meal: header.meal,
            header_tier: header.tier,
            item_tier,
            items: items.len(),
        });

        let mut meal = Meal::new(header.meal, header.stated_total);
        meal.items = items;
        plan.meals.push(meal);
    }

    tracing::info!(
        day = day_number,
        meals = plan.meals.len(),
        items = plan.item_count(),
        "parsed day structure"
    );

    ParsedDay {
        plan,
        diagnostics: ParseDiagnostics {
            day_source,
            meals: traces,
            numbered_lines,
            kcal_mentions,
        },
    }
}
