use std::sync::LazyLock;

use regex::Regex;

use crate::models::MealName;

/// Numbers as the generator writes them: `150`, `1.5`, `1/2`.
const NUMBER: &str = r"(\d+/\d+|\d+(?:\.\d+)?)";

// Patterns run on normalized text, so the only dash to match is `-`.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

pub static DAY_LABEL: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)Day\s*(\d+):"));

pub static DAY_LOOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)Day\s*(\d+)"));

/// A `Day N:` line opening a block, with its line break.
pub static LEADING_DAY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^Day\s*\d+\s*:\s*\n?"));

/// Start of a day block in generated multi-day text.
pub static DAY_MARKER: LazyLock<Regex> = LazyLock::new(|| compile(r"Day \d+:"));

/// `- Breakfast (400 kcal):` at the start of a line.
pub static MEAL_HEADER_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?im)^[ \t]*(?:[-*][ \t]*)?\**(breakfast|lunch|snack|dinner)\**[ \t]*\([ \t]*(\d+)[ \t]*kcal[ \t]*\)")
});

/// `Breakfast (400` anywhere in the text.
pub static MEAL_HEADER_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(breakfast|lunch|snack|dinner)\s*\(\s*(\d+)"));

/// Bulleted meal headers, used to detect duplicated meals in corrections.
pub static MEAL_BULLET: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)-\s*(breakfast|lunch|snack|dinner)\b"));

pub static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*\d+\."));

pub static NUMBERED_LINE_MULTI: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^\s*\d+\."));

pub static NUMBERING_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*\d+\.\s*"));

pub static QUANTITY_HINT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b\d+\s*(g|grams?|ml|oz|cups?|eggs?|slices?|pieces?|tbsp|tsp)\b")
});

pub static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+[-|]\s+"));

pub static CALORIES: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(\d+(?:\.\d+)?)\s*kcal"));

pub static MACROS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)(\d+(?:\.\d+)?)\s*g?\s*p\s*[/,]\s*(\d+(?:\.\d+)?)\s*g?\s*f\s*[/,]\s*(\d+(?:\.\d+)?)\s*g?\s*c")
});

/// Portion patterns in priority order. Serving-like units come before
/// grams so a macro figure such as `20c` or `2g` is never read as the portion.
pub static QUANTITY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"pieces?", "piece"),
        (r"cups?", "cup"),
        (r"eggs?", "egg"),
        (r"slices?", "slice"),
        (r"servings?", "serving"),
        (r"tbsp", "tbsp"),
        (r"tsp", "tsp"),
        (r"medium", "medium"),
        (r"small", "small"),
        (r"large", "large"),
        (r"(?:g|grams?)", "g"),
        (r"ml", "ml"),
        (r"oz", "oz"),
    ]
    .into_iter()
    .map(|(unit, name)| (compile(&format!(r"(?i){NUMBER}\s*{unit}\b")), name))
    .collect()
});

/// Text following a meal header on the same line, per meal.
pub static INLINE_CONTENT: LazyLock<Vec<(MealName, Regex)>> = LazyLock::new(|| {
    MealName::ALL
        .into_iter()
        .map(|meal| {
            (
                meal,
                compile(&format!(r"(?i){}\s*\(\d+[^)\n]*\)\s*:[ \t]*(.+)", meal.as_str())),
            )
        })
        .collect()
});

/// Parse `150`, `1.5` or `1/2` into a value.
pub fn parse_number(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            (den != 0.0).then(|| num / den)
        }
        None => token.trim().parse().ok(),
    }
}
