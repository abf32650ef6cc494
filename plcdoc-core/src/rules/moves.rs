use super::engine::RewriteRule;
use once_cell::sync::Lazy;
use regex::Regex;

static MOVE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*MOVE\s*\(([^(),]+),([^(),]+)\)\s*;?\s*$").expect("move call pattern")
});
// Plain variable, member access, indexed element, quoted tag or direct address.
static ASSIGN_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"^[A-Za-z_"#%][\w."#%\[\]]*$"##).expect("assignment target pattern"));

/// `MOVE(src, dst)` → `dst := src;`, and plain assignments get exactly one
/// terminating `;`.
pub struct MoveRule;

/// Canonical form of a line, or `None` when the line is neither a `MOVE`
/// call nor a single top-level assignment.
fn canonical(line: &str) -> Option<String> {
    if let Some(caps) = MOVE_CALL.captures(line) {
        return Some(format!("{} := {};", caps[2].trim(), caps[1].trim()));
    }

    let (code, comment) = match comment_start(line) {
        Some(idx) => (&line[..idx], Some(line[idx + 2..].trim())),
        None => (line, None),
    };
    let idx = top_level_assignment(code)?;
    let target = code[..idx].trim();
    let value = code[idx + 2..].trim().trim_end_matches(';').trim_end();
    if !ASSIGN_TARGET.is_match(target) || value.is_empty() {
        return None;
    }

    Some(match comment {
        Some(comment) => format!("{target} := {value}; // {comment}"),
        None => format!("{target} := {value};"),
    })
}

/// Byte offset of a `//` comment marker outside string literals.
fn comment_start(line: &str) -> Option<usize> {
    let mut quote = None;
    let mut chars = line.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '/') if chars.peek().is_some_and(|&(_, next)| next == '/') => {
                return Some(idx)
            }
            _ => {}
        }
    }
    None
}

/// Byte offset of the only `:=` in `code`, provided it sits outside any
/// parentheses. Named-argument calls carry their `:=` inside the parens.
fn top_level_assignment(code: &str) -> Option<usize> {
    let mut found = None;
    for (idx, _) in code.match_indices(":=") {
        if found.is_some() {
            return None;
        }
        found = Some(idx);
    }
    let idx = found?;

    let depth = code[..idx].chars().fold(0i32, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    });
    (depth == 0).then_some(idx)
}

impl RewriteRule for MoveRule {
    fn name(&self) -> &'static str {
        "Move"
    }

    fn matches(&self, line: &str) -> bool {
        canonical(line).is_some_and(|rewritten| rewritten != line)
    }

    fn rewrite(&self, line: &str) -> String {
        canonical(line).unwrap_or_else(|| line.to_string())
    }
}
