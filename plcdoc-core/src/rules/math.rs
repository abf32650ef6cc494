use super::call::{has_named_args, named_call};
use super::engine::RewriteRule;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MATH_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ADD|SUB|MUL|DIV)\s*\(([^(),]+),([^(),]+)\)").expect("math call pattern")
});

fn is_positional(caps: &Captures) -> bool {
    !has_named_args(&caps[2]) && !has_named_args(&caps[3])
}

/// Two-operand arithmetic calls → `X(IN1 := a, IN2 := b, OUT => )`.
pub struct MathRule;

impl RewriteRule for MathRule {
    fn name(&self) -> &'static str {
        "Math"
    }

    fn matches(&self, line: &str) -> bool {
        MATH_CALL.captures_iter(line).any(|caps| is_positional(&caps))
    }

    fn rewrite(&self, line: &str) -> String {
        MATH_CALL
            .replace_all(line, |caps: &Captures| {
                if !is_positional(caps) {
                    return caps[0].to_string();
                }
                let args = [caps[2].trim(), caps[3].trim()];
                named_call(&caps[1], &["IN1", "IN2"], &["OUT"], &args, &[])
            })
            .into_owned()
    }
}
