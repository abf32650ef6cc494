use super::call::{has_named_args, named_call, split_args};
use super::engine::RewriteRule;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TIMER_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(TON|TOF|TP)\s*\(([^()]*)\)").expect("timer call pattern"));

const INPUTS: [&str; 2] = ["IN", "PT"];
const OUTPUTS: [&str; 2] = ["Q", "ET"];

/// `TON(a, b)` → `TON(IN := a, PT := b, Q => , ET => )`, same for `TOF`/`TP`.
/// A missing preset becomes the empty duration literal `T#`.
pub struct TimerRule;

fn is_positional(args: &str) -> bool {
    !has_named_args(args) && split_args(args).len() <= INPUTS.len()
}

impl RewriteRule for TimerRule {
    fn name(&self) -> &'static str {
        "Timer"
    }

    fn matches(&self, line: &str) -> bool {
        TIMER_CALL
            .captures_iter(line)
            .any(|caps| is_positional(&caps[2]))
    }

    fn rewrite(&self, line: &str) -> String {
        TIMER_CALL
            .replace_all(line, |caps: &Captures| {
                if !is_positional(&caps[2]) {
                    return caps[0].to_string();
                }
                named_call(
                    &caps[1],
                    &INPUTS,
                    &OUTPUTS,
                    &split_args(&caps[2]),
                    &[("PT", "T#")],
                )
            })
            .into_owned()
    }
}
