use super::call::{has_named_args, named_call, split_args};
use super::engine::RewriteRule;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Longest name first so CTUD is not read as CTU.
static COUNTER_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(CTUD|CTU|CTD)\s*\(([^()]*)\)").expect("counter call pattern"));

const UP_INPUTS: &[&str] = &["CU", "R", "PV"];
const DOWN_INPUTS: &[&str] = &["CD", "LD", "PV"];
const UP_DOWN_INPUTS: &[&str] = &["CU", "CD", "R", "LD", "PV"];
const SINGLE_OUTPUTS: &[&str] = &["Q", "CV"];
const UP_DOWN_OUTPUTS: &[&str] = &["QU", "QD", "CV"];

/// Input and output parameter names for a counter function block.
fn signature(func: &str) -> (&'static [&'static str], &'static [&'static str]) {
    match func {
        "CTU" => (UP_INPUTS, SINGLE_OUTPUTS),
        "CTD" => (DOWN_INPUTS, SINGLE_OUTPUTS),
        _ => (UP_DOWN_INPUTS, UP_DOWN_OUTPUTS),
    }
}

fn is_positional(func: &str, args: &str) -> bool {
    let (inputs, _) = signature(func);
    !has_named_args(args) && split_args(args).len() <= inputs.len()
}

/// Counter calls in named-argument form. Positional arguments fill the
/// inputs in declaration order; the rest stay as empty placeholders.
pub struct CounterRule;

impl RewriteRule for CounterRule {
    fn name(&self) -> &'static str {
        "Counter"
    }

    fn matches(&self, line: &str) -> bool {
        COUNTER_CALL
            .captures_iter(line)
            .any(|caps| is_positional(&caps[1], &caps[2]))
    }

    fn rewrite(&self, line: &str) -> String {
        COUNTER_CALL
            .replace_all(line, |caps: &Captures| {
                let func = &caps[1];
                if !is_positional(func, &caps[2]) {
                    return caps[0].to_string();
                }
                let (inputs, outputs) = signature(func);
                named_call(func, inputs, outputs, &split_args(&caps[2]), &[])
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_counter() {
        assert_eq!(
            CounterRule.apply("CTU(Pulse)".to_string()),
            "CTU(CU := Pulse, R := , PV := , Q => , CV => )"
        );
    }

    #[test]
    fn test_down_counter_fills_in_order() {
        assert_eq!(
            CounterRule.apply("CTD(Down, Load, 10)".to_string()),
            "CTD(CD := Down, LD := Load, PV := 10, Q => , CV => )"
        );
    }

    #[test]
    fn test_up_down_counter_is_not_shadowed() {
        assert_eq!(
            CounterRule.apply("CTUD(Up, Down)".to_string()),
            "CTUD(CU := Up, CD := Down, R := , LD := , PV := , QU => , QD => , CV => )"
        );
    }

    #[test]
    fn test_too_many_arguments_is_left_alone() {
        assert!(!CounterRule.matches("CTU(a, b, c, d)"));
    }
}
