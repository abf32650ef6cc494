use crate::normalize::content_lines;
use crate::rules::RewriteEngine;
use crate::types::{LineKind, NetworkBody, NetworkLine};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static NETWORK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Network\s+(\d+):\s*(.*)").expect("network header pattern"));
static DIAGRAM_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--\||\|--|\[--|--\]|--\[|\]--|--\(|\)--").expect("diagram fragment pattern")
});
static CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_]\w*\s*\(").expect("call pattern"));

/// First matching kind wins: diagram fragments, then comments, then calls.
pub fn classify_line(line: &str) -> LineKind {
    if DIAGRAM_FRAGMENT.is_match(line) {
        LineKind::Diagram
    } else if line.starts_with("//") {
        LineKind::Comment
    } else if CALL.is_match(line) {
        LineKind::Call
    } else {
        LineKind::Statement
    }
}

/// Groups network lines under their `Network n:` headers, rewriting calls
/// and statements on the way in.
pub struct NetworkStructurer<'a> {
    engine: &'a RewriteEngine,
}

impl<'a> NetworkStructurer<'a> {
    pub fn new(engine: &'a RewriteEngine) -> Self {
        Self { engine }
    }

    /// Networks in header order. Text before the first header is ignored;
    /// a header with no body still yields a network.
    pub fn structure(&self, normalized: &str) -> Vec<NetworkBody> {
        let mut networks = Vec::new();
        let mut current: Option<NetworkBody> = None;

        for line in content_lines(normalized) {
            if let Some(caps) = NETWORK_HEADER.captures(line) {
                networks.extend(current.take());
                let title = caps[2].trim();
                let title = (!title.is_empty()).then(|| title.to_string());
                current = Some(NetworkBody::new(&caps[1], title));
                continue;
            }

            if let Some(network) = current.as_mut() {
                network.lines.push(self.body_line(line));
            }
        }
        networks.extend(current);

        debug!("🔗 Structured {} networks", networks.len());
        networks
    }

    fn body_line(&self, line: &str) -> NetworkLine {
        let kind = classify_line(line);
        let text = match kind {
            LineKind::Diagram | LineKind::Comment => line.to_string(),
            LineKind::Call | LineKind::Statement => self.engine.rewrite_line(line),
        };
        NetworkLine { kind, text }
    }
}

pub fn render_line(line: &NetworkLine) -> String {
    match line.kind {
        LineKind::Diagram => format!("// LAD: {}", line.text),
        _ => line.text.clone(),
    }
}

/// `NETWORK n:`, optional `// title`, body lines indented four spaces, then
/// a blank line.
pub fn render_network(network: &NetworkBody) -> String {
    let mut out = format!("NETWORK {}:\n", network.id);
    if let Some(title) = &network.title {
        out.push_str(&format!("// {title}\n"));
    }
    for line in &network.lines {
        out.push_str("    ");
        out.push_str(&render_line(line));
        out.push('\n');
    }
    out.push('\n');
    out
}

pub fn render_networks(networks: &[NetworkBody], emit_empty: bool) -> String {
    networks
        .iter()
        .filter(|network| emit_empty || !network.lines.is_empty())
        .map(render_network)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NETWORKS: &str = "\
Interface stuff before any network
Network 1: Start logic
Temp := 5
--| |--[Start]--( )--
// operator note
--- PAGE 2 ---
TON(Start, T#5s)
Network 2:
Network 3: Compare
Count >= 10
";

    fn structure(text: &str) -> Vec<NetworkBody> {
        let engine = RewriteEngine::default();
        NetworkStructurer::new(&engine).structure(text)
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(classify_line("--[ ]--( )--"), LineKind::Diagram);
        assert_eq!(classify_line("// --| note"), LineKind::Diagram);
        assert_eq!(classify_line("// plain note"), LineKind::Comment);
        assert_eq!(classify_line("\"Valve\".Open(x)"), LineKind::Call);
        assert_eq!(classify_line("A := B"), LineKind::Statement);
    }

    #[test]
    fn test_networks_in_header_order_across_pages() {
        let networks = structure(NETWORKS);
        let ids: Vec<&str> = networks.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(networks[0].title.as_deref(), Some("Start logic"));
        assert_eq!(networks[0].lines.len(), 4);
        assert!(networks[1].title.is_none());
        assert!(networks[1].lines.is_empty());
    }

    #[test]
    fn test_no_header_means_no_networks() {
        assert!(structure("Temp := 5\nCount >= 10\n").is_empty());
    }

    #[test]
    fn test_render_networks() {
        let rendered = render_networks(&structure(NETWORKS), true);
        let expected = "\
NETWORK 1:
// Start logic
    Temp := 5;
    // LAD: --| |--[Start]--( )--
    // operator note
    TON(IN := Start, PT := T#5s, Q => , ET => )

NETWORK 2:

NETWORK 3:
// Compare
    GE(Count, 10)

";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_empty_networks_can_be_suppressed() {
        let rendered = render_networks(&structure(NETWORKS), false);
        assert!(!rendered.contains("NETWORK 2:"));
        assert!(rendered.contains("NETWORK 3:"));
    }
}
