use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Templates, links, references, tags, escaped tags and tables.
    static ref MARKUP: Regex = Regex::new(
        r"(?s)\{\{.*?\}\}|\[\[.*?\]\]|\[.*?\]|<.*?>|&lt;.*?&gt;|\{\|.*?\|\}"
    ).expect("valid regex");
}

/// Media captions leave this behind once their link markup is gone.
const MEDIA_PREFIX: &str = "File";

/// Tokenize an article body into lowercase words.
///
/// Markup spans are blanked first, then the literal `File`, then the text is
/// lowercased and ASCII punctuation is blanked unless it sits right before an
/// `s` or `t` that is itself followed by whitespace (`don't `, `dog's `).
/// Whatever remains is split on whitespace. A body that is blank after
/// filtering yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let stripped = strip_markup(text);
    let lowered = stripped.replace(MEDIA_PREFIX, " ").to_lowercase();
    strip_punctuation(&lowered)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Replace every markup span with a single space.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, " ").into_owned()
}

/// Replace ASCII punctuation with spaces, keeping it only before `s`/`t` + whitespace.
pub fn strip_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_punctuation() && !precedes_contraction(&chars[i + 1..]) {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

fn precedes_contraction(rest: &[char]) -> bool {
    matches!(rest, ['s' | 't', ws, ..] if ws.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The Cat, the HAT!");
        assert_eq!(t, vec!["the", "cat", "the", "hat"]);
    }

    #[test]
    fn keeps_apostrophe_before_s_or_t_and_space() {
        assert_eq!(tokenize("the dog's bone don't go"), vec!["the", "dog's", "bone", "don't", "go"]);
    }

    #[test]
    fn drops_apostrophe_at_end_of_text() {
        assert_eq!(tokenize("the dog's"), vec!["the", "dog", "s"]);
    }

    #[test]
    fn blank_body_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  {{only a template}}  ").is_empty());
    }
}
