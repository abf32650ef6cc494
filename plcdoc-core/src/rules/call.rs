// Helpers for rewriting positional calls into named-argument form.

/// Comma-separated arguments, trimmed. An empty or all-blank list yields no
/// arguments.
pub fn split_args(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    args.split(',').map(str::trim).collect()
}

/// True when an argument list is already in `NAME := value` / `NAME => var`
/// form, i.e. it was written that way or rewritten by an earlier pass.
pub fn has_named_args(args: &str) -> bool {
    args.contains(":=") || args.contains("=>")
}

/// Build `FUNC(IN1 := a, IN2 := b, OUT => )`.
///
/// Positional `args` fill `inputs` in order; inputs without a positional
/// value take their entry from `defaults`, or stay blank. Outputs are always
/// left unassigned.
pub fn named_call(
    func: &str,
    inputs: &[&str],
    outputs: &[&str],
    args: &[&str],
    defaults: &[(&str, &str)],
) -> String {
    let mut params: Vec<String> = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let value = args.get(i).copied().unwrap_or_else(|| {
                defaults
                    .iter()
                    .find(|(name, _)| name == input)
                    .map(|(_, value)| *value)
                    .unwrap_or("")
            });
            format!("{input} := {value}")
        })
        .collect();
    params.extend(outputs.iter().map(|output| format!("{output} => ")));
    format!("{func}({})", params.join(", "))
}
