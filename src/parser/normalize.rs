/// Dash-like code points collapsed to ASCII hyphen.
const DASHES: &[char] = &[
    '\u{2014}', // em dash
    '\u{2013}', // en dash
    '\u{2212}', // minus sign
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2015}', // horizontal bar
    '\u{FE58}', // small em dash
    '\u{FE63}', // small hyphen-minus
    '\u{FF0D}', // fullwidth hyphen-minus
];

/// Space code points collapsed to ASCII space.
const SPACES: &[char] = &[
    '\u{00A0}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{202F}', '\u{205F}',
    '\u{3000}',
];

/// Canonicalize dashes, spaces and line endings so pattern matching does not
/// depend on which Unicode variants the generator emitted.
///
/// Pure and idempotent.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            c if DASHES.contains(&c) => out.push('-'),
            c if SPACES.contains(&c) => out.push(' '),
            c => out.push(c),
        }
    }

    if out != text {
        tracing::debug!("normalized non-standard dashes, spaces or line endings");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashes_and_spaces() {
        let raw = "1. Oats \u{2014} 80g \u{2013} 320\u{00A0}kcal \u{FF0D} 10p/5f/50c";
        assert_eq!(normalize_text(raw), "1. Oats - 80g - 320 kcal - 10p/5f/50c");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_idempotent() {
        let raw = "Day 1:\r\n- Lunch (600\u{2009}kcal):\r\n  1. Rice \u{2212} 150g";
        let once = normalize_text(raw);
        assert_eq!(normalize_text(&once), once);
    }
}
