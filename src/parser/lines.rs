use std::collections::HashMap;

use crate::models::{Item, MealName};
use crate::parser::patterns::{
    CALORIES, INLINE_CONTENT, MACROS, NUMBERED_LINE, NUMBERING_PREFIX, QUANTITY_HINT,
    QUANTITY_PATTERNS, SEPARATOR, parse_number,
};
use crate::planner::constants::DEFAULT_QUANTITY_G;

const NAME_SEPARATORS: &[&str] = &[" - ", " | ", ", "];

/// Longest name kept for an inline-fallback item, in characters.
const INLINE_NAME_MAX: usize = 100;

/// Meal a line announces, if it looks like a header rather than a food line.
fn header_meal(line: &str) -> Option<MealName> {
    if !line.contains('(') || NUMBERED_LINE.is_match(line) {
        return None;
    }
    let lower = line.to_lowercase();
    MealName::ALL
        .into_iter()
        .find(|m| lower.contains(&m.as_str().to_lowercase()))
}

fn is_total_line(lower: &str) -> bool {
    lower.starts_with("total") || lower.contains("total:") || lower.contains("total daily")
}

/// A line qualifies when numbered, or when it has both a portion and a separator.
fn looks_like_food_line(line: &str) -> bool {
    NUMBERED_LINE.is_match(line) || (QUANTITY_HINT.is_match(line) && SEPARATOR.is_match(line))
}

fn food_name(line: &str) -> Option<String> {
    let stripped = NUMBERING_PREFIX.replace(line, "");
    let stripped = stripped.trim_start_matches(['-', '*', ' ', '\t']).trim();

    // Separators are tried in priority order, not by position.
    let cut = NAME_SEPARATORS
        .iter()
        .find_map(|sep| stripped.find(sep))
        .unwrap_or(stripped.len());
    let name = stripped[..cut].trim();

    (name.chars().count() >= 2).then(|| name.to_string())
}

/// (value, unit, numeric token) of the first portion pattern that matches.
fn extract_quantity(region: &str) -> Option<(f64, &'static str, String)> {
    QUANTITY_PATTERNS.iter().find_map(|(pattern, unit)| {
        let caps = pattern.captures(region)?;
        let token = caps.get(1)?.as_str();
        let value = parse_number(token)?;
        (value > 0.0).then(|| (value, *unit, token.to_string()))
    })
}

fn extract_macros(line: &str) -> Option<(f64, f64, f64)> {
    let caps = MACROS.captures(line)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// Build an item from one food line. Lines without positive calories or a
/// usable name yield `None`.
pub fn parse_food_line(line: &str) -> Option<Item> {
    let line = line.trim();
    let cal_match = CALORIES.captures(line)?;
    let calories: f64 = cal_match[1].parse().ok()?;
    if calories <= 0.0 {
        return None;
    }

    let name = food_name(line)?;

    // Only look for a portion before the calorie figure; macro grams follow it.
    let region_end = cal_match.get(0).map(|m| m.start()).unwrap_or(line.len());
    let (quantity, unit, token) = extract_quantity(&line[..region_end]).unwrap_or_else(|| {
        tracing::debug!(line, "no portion found, defaulting to 100 g");
        (DEFAULT_QUANTITY_G, "g", format!("{DEFAULT_QUANTITY_G}"))
    });

    Some(Item::new(
        name,
        quantity,
        unit,
        token,
        calories,
        extract_macros(line),
    ))
}

/// Scan the text line by line, assigning food lines to the most recent
/// header among `known` meals. Lines before the first header are ignored.
pub fn scan_lines(text: &str, known: &[MealName]) -> HashMap<MealName, Vec<Item>> {
    let mut items: HashMap<MealName, Vec<Item>> = HashMap::new();
    let mut current: Option<MealName> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(meal) = header_meal(line) {
            current = Some(meal);
            continue;
        }

        let Some(meal) = current else { continue };
        if !known.contains(&meal) {
            continue;
        }

        let lower = line.to_lowercase();
        if !lower.contains("kcal") || is_total_line(&lower) || !looks_like_food_line(line) {
            continue;
        }

        if let Some(item) = parse_food_line(line) {
            items.entry(meal).or_default().push(item);
        }
    }

    items
}

/// One synthetic serving built from the text after a meal's header, carrying
/// the header's stated calories.
pub fn inline_item(text: &str, meal: MealName, stated_total: u32) -> Option<Item> {
    if stated_total == 0 {
        return None;
    }
    let (_, pattern) = INLINE_CONTENT.iter().find(|(m, _)| *m == meal)?;
    let content = pattern.captures(text)?.get(1)?.as_str().trim();

    if NUMBERED_LINE.is_match(content) || content.chars().count() <= 3 {
        return None;
    }

    let name: String = content.chars().take(INLINE_NAME_MAX).collect();
    tracing::info!(meal = %meal, name = %name, "creating item from inline header content");

    Some(Item::new(name, 1.0, "serving", "1", stated_total as f64, None))
}
