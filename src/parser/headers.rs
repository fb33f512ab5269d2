use regex::Regex;

use crate::models::MealName;
use crate::parser::patterns::{MEAL_HEADER_LOOSE, MEAL_HEADER_STRICT};
use crate::parser::{ParseTier, Strategy, first_success};

pub struct HeaderQuery<'a> {
    pub text: &'a str,
    pub meal: MealName,
}

/// Stated total from the first header of `meal` matched by `pattern`.
fn first_header(pattern: &Regex, q: &HeaderQuery<'_>) -> Option<u32> {
    pattern
        .captures_iter(q.text)
        .find(|caps| MealName::parse(&caps[1]) == Some(q.meal))
        .and_then(|caps| caps[2].parse().ok())
}

fn strict_header(q: &HeaderQuery<'_>) -> Option<u32> {
    first_header(&MEAL_HEADER_STRICT, q)
}

fn loose_header(q: &HeaderQuery<'_>) -> Option<u32> {
    first_header(&MEAL_HEADER_LOOSE, q)
}

/// A located meal header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealHeader {
    pub meal: MealName,
    pub stated_total: u32,
    pub tier: ParseTier,
}

/// Locate each meal's header, trying the strict `<Name> (<N> kcal)` form
/// before the loose `<Name> (<digits>` form. Meals come back in output order.
pub fn find_headers(text: &str) -> Vec<MealHeader> {
    let cascade: [(ParseTier, Strategy<HeaderQuery<'_>, u32>); 2] = [
        (ParseTier::StrictHeader, strict_header),
        (ParseTier::LooseHeader, loose_header),
    ];

    let headers: Vec<MealHeader> = MealName::ALL
        .into_iter()
        .filter_map(|meal| {
            let query = HeaderQuery { text, meal };
            first_success(&cascade, &query).map(|(tier, stated_total)| MealHeader {
                meal,
                stated_total,
                tier,
            })
        })
        .collect();

    let loose = headers
        .iter()
        .filter(|h| h.tier == ParseTier::LooseHeader)
        .count();
    if loose > 0 {
        tracing::warn!(loose, "recovered meal headers with the loose pattern");
    }
    if headers.len() < MealName::ALL.len() {
        let found: Vec<&str> = headers.iter().map(|h| h.meal.as_str()).collect();
        tracing::warn!(?found, "expected 4 meal headers, found {}", headers.len());
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_strict() {
        let text = "Day 1:\n- Breakfast (400 kcal):\n- Lunch (600 kcal):\n- Snack (150 kcal):\n- Dinner (650 kcal):";
        let headers = find_headers(text);
        assert_eq!(headers.len(), 4);
        assert!(headers.iter().all(|h| h.tier == ParseTier::StrictHeader));
        assert_eq!(headers[3].meal, MealName::Dinner);
        assert_eq!(headers[3].stated_total, 650);
    }

    #[test]
    fn test_loose_recovers_missing() {
        let text = "- breakfast (400 kcal):\nLunch (600, high protein):\n";
        let headers = find_headers(text);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].tier, ParseTier::StrictHeader);
        assert_eq!(headers[1].meal, MealName::Lunch);
        assert_eq!(headers[1].tier, ParseTier::LooseHeader);
        assert_eq!(headers[1].stated_total, 600);
    }

    #[test]
    fn test_output_order_is_fixed() {
        let text = "- Dinner (500 kcal):\n- Breakfast (300 kcal):";
        let meals: Vec<MealName> = find_headers(text).iter().map(|h| h.meal).collect();
        assert_eq!(meals, vec![MealName::Breakfast, MealName::Dinner]);
    }
}
