// Ladder / FBD token spelling. Each pattern is distinct from the others'
// output, so applying them in sequence is idempotent.
const REPLACEMENTS: [(&str, &str); 11] = [
    ("--||--", "--| OR |--"),
    ("--|--", "--| AND |--"),
    ("--|/|--", "--| NOT |--"),
    ("--()--", "--( OUT )--"),
    ("--(S)--", "--( S )--"),
    ("--(R)--", "--( R )--"),
    ("--[ ]--", "--[ IN ]--"),
    ("--[P]--", "--[ P ]--"),
    ("--[N]--", "--[ N ]--"),
    ("--[SR]--", "--[ SR ]--"),
    ("--[RS]--", "--[ RS ]--"),
];

/// Spell out compact diagram tokens in rendered network text.
pub fn format_diagrams(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}
