//! Description sanitizer
//!
//! Turns the HTML/markdown-flavoured job descriptions upstream sends into
//! plain text that can be rendered as-is. Pure and total: no I/O, never
//! panics on malformed entities or tags.

pub mod stages;

pub use stages::STAGES;

/// Clean an optional description; `None` becomes an empty string
pub fn clean(raw: Option<&str>) -> String {
    raw.map(clean_text).unwrap_or_default()
}

/// Passes tried before falling back to [`flatten_syntax`]
pub const MAX_PASSES: usize = 4;

/// Characters any stage treats as markup or entity syntax
const SYNTAX_CHARS: &[char] = &['&', '<', '>', '*', '_', '#', '`', '~', '[', ']', '-'];

/// Run the stage pipeline until the text stops changing.
///
/// A single pass can expose new work (`_a_ _b_` only loses its second pair
/// of underscores on the next pass), so the result is a fixed point of the
/// pipeline and `clean_text(clean_text(x)) == clean_text(x)`. Text still
/// changing after [`MAX_PASSES`] is flattened, which is itself a fixed point.
pub fn clean_text(raw: &str) -> String {
    let mut current = run_stages(raw);
    for _ in 1..MAX_PASSES {
        let next = run_stages(&current);
        if next == current {
            return current;
        }
        current = next;
    }

    if run_stages(&current) == current {
        return current;
    }

    flatten_syntax(&current)
}

/// Drop every markup and entity character, then normalize once.
///
/// With none of [`SYNTAX_CHARS`] left, stages 1-6 have nothing to match and
/// stages 7-8 are idempotent, so the result is a fixed point of [`run_stages`].
pub fn flatten_syntax(text: &str) -> String {
    let stripped: String = text.chars().filter(|ch| !SYNTAX_CHARS.contains(ch)).collect();
    run_stages(&stripped)
}

/// One ordered pass over all eight stages
pub fn run_stages(raw: &str) -> String {
    STAGES
        .iter()
        .fold(raw.to_string(), |text, (_, stage)| stage(&text))
}
