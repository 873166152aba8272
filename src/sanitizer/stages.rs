//! The individual sanitizer stages
//!
//! Each stage is a pure `&str -> String` function. They are meant to run in
//! the order of [`STAGES`]: structural tags must become line breaks before
//! tags are stripped, and markdown is only stripped once no HTML is left.
//! Every stage either leaves its input alone or makes it shorter.

use once_cell::sync::Lazy;
use regex::Regex;

pub type Stage = fn(&str) -> String;

/// Stage table in execution order
pub const STAGES: [(&str, Stage); 8] = [
    ("named_entities", decode_named_entities),
    ("numeric_entities", decode_numeric_entities),
    ("structural_tags", structural_tags_to_breaks),
    ("strip_tags", strip_tags),
    ("markdown", strip_markdown),
    ("leftover_tokens", strip_leftover_tokens),
    ("punctuation", tidy_punctuation),
    ("whitespace", normalize_whitespace),
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("sanitizer pattern must compile")
}

/// Longest `&...;` reference the decoder looks back for
const MAX_ENTITY_LEN: usize = 32;

static BLOCK_CLOSE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)</(?:p|div|section|article|h[1-6])\s*>"));
static LIST_CLOSE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)</(?:li|ul|ol|table|tr)\s*>"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<br\b[^>]*>"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| compile(r"<[^>]*>"));

static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?m)^[ \t]*(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})\r?$")
});
static HEADING: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^[ \t]*#{1,6}(?:[ \t]+|$)"));
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^[ \t]*(?:>[ \t]?)+"));
static IMAGE: Lazy<Regex> = Lazy::new(|| compile(r"!\[([^\]]*)\]\([^)]*\)"));
static LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]*)\]\([^)]*\)"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| compile(r"`([^`]*)`"));
static BOLD_STARS: Lazy<Regex> = Lazy::new(|| compile(r"\*\*(.+?)\*\*"));
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| compile(r"__(.+?)__"));
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| compile(r"~~(.+?)~~"));
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| compile(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*"));
// Underscore emphasis only at word edges so snake_case survives
static ITALIC_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)(^|\W)_([^_\s](?:[^_\n]*[^_\s])?)_(\W|$)"));

static LEFTOVER_TOKENS: Lazy<Regex> = Lazy::new(|| compile(r"#{2,}|\*{2,}|_{2,}"));
static REPEATED_QUESTION: Lazy<Regex> = Lazy::new(|| compile(r"\?{2,}"));
static REPEATED_BANG: Lazy<Regex> = Lazy::new(|| compile(r"!{2,}"));

static CARRIAGE_RETURN: Lazy<Regex> = Lazy::new(|| compile(r"\r\n?"));
static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| compile(r"[^\S\n]+"));
static SPACE_AROUND_NEWLINE: Lazy<Regex> = Lazy::new(|| compile(r" ?\n ?"));
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| compile(r"\n{3,}"));

fn named_entity(name: &str) -> Option<char> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let ch = match name {
        "nbsp" => '\u{00A0}',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "middot" => '\u{00B7}',
        "bull" => '\u{2022}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "euro" => '\u{20AC}',
        _ => return None,
    };
    Some(ch)
}

/// Code point of a `#NNN` or `#xHHH` reference body; NUL, surrogates and
/// out-of-range values are rejected
fn numeric_entity(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()
        }
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse::<u32>().ok()
        }
        _ => None,
    }?;

    char::from_u32(code).filter(|&ch| ch != '\0')
}

fn numeric_or_named_entity(body: &str) -> Option<char> {
    numeric_entity(body).or_else(|| named_entity(body))
}

/// Decode `&body;` references in a single left-to-right scan.
///
/// Each time a `;` lands in the output, the tail is checked for a reference
/// and replaced in place. A decoded `&` or `;` can therefore complete the
/// next reference, so `&amp;amp;lt;` reduces to `<` without another pass.
/// The output never contains a reference `resolve` accepts.
fn decode_references(text: &str, resolve: fn(&str) -> Option<char>) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        out.push(ch);

        while out.ends_with(';') {
            let end = out.len() - 1;
            let window = end.saturating_sub(MAX_ENTITY_LEN);
            let Some(amp) = out.as_bytes()[window..end].iter().rposition(|&b| b == b'&') else {
                break;
            };
            let amp = window + amp;

            match resolve(&out[amp + 1..end]) {
                Some(decoded) => {
                    out.truncate(amp);
                    out.push(decoded);
                }
                None => break,
            }
        }
    }

    out
}

/// Stage 1: decode the fixed set of named entities, leave the rest alone
pub fn decode_named_entities(text: &str) -> String {
    decode_references(text, named_entity)
}

/// Stage 2: decode `&#NNN;` and `&#xHHH;`
///
/// References that overflow, name a surrogate, or point at NUL stay as written.
/// A reference that decodes to `&` may complete a named entity, which is
/// decoded in the same scan.
pub fn decode_numeric_entities(text: &str) -> String {
    decode_references(text, numeric_or_named_entity)
}

/// Stage 3: closing block tags become a blank line, closing list/table tags
/// and `<br>` a single line break
pub fn structural_tags_to_breaks(text: &str) -> String {
    let text = BLOCK_CLOSE.replace_all(text, "\n\n");
    let text = LIST_CLOSE.replace_all(&text, "\n");
    LINE_BREAK.replace_all(&text, "\n").into_owned()
}

/// Stage 4: drop every remaining tag
pub fn strip_tags(text: &str) -> String {
    ANY_TAG.replace_all(text, "").into_owned()
}

/// Stage 5: reduce markdown syntax to the text it wraps
pub fn strip_markdown(text: &str) -> String {
    let text = HORIZONTAL_RULE.replace_all(text, "");
    let text = HEADING.replace_all(&text, "");
    let text = BLOCKQUOTE.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "${1}");
    let text = LINK.replace_all(&text, "${1}");
    let text = INLINE_CODE.replace_all(&text, "${1}");
    let text = BOLD_STARS.replace_all(&text, "${1}");
    let text = BOLD_UNDERSCORES.replace_all(&text, "${1}");
    let text = STRIKETHROUGH.replace_all(&text, "${1}");
    let text = ITALIC_STAR.replace_all(&text, "${1}");
    ITALIC_UNDERSCORE
        .replace_all(&text, "${1}${2}${3}")
        .into_owned()
}

/// Stage 6: runs of `#`, `*` or `_` that markdown stripping left behind
pub fn strip_leftover_tokens(text: &str) -> String {
    LEFTOVER_TOKENS.replace_all(text, "").into_owned()
}

/// Stage 7
pub fn tidy_punctuation(text: &str) -> String {
    let text = REPEATED_QUESTION.replace_all(text, "?");
    REPEATED_BANG.replace_all(&text, "!").into_owned()
}

/// Stage 8: one space between words, at most one blank line, trimmed ends
pub fn normalize_whitespace(text: &str) -> String {
    let text = CARRIAGE_RETURN.replace_all(text, "\n");
    let text = text.replace('\u{00A0}', " ");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
