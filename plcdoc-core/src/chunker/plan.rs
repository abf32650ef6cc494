use crate::config::{ChunkerConfig, SplitStrategy};
use crate::error::PlcDocError;
use serde::Serialize;
use std::ops::Range;

const MIB: f64 = 1024.0 * 1024.0;

/// Names that appear in part file names and headers.
#[derive(Debug, Clone)]
pub struct ChunkNames {
    /// `<category label>_<stem>`
    pub base: String,
    /// Source path as shown in the `Original file:` header line
    pub original: String,
}

/// One output file of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartPlan {
    pub file_name: String,
    pub header: String,
    /// Line indices of the source content carried by this part
    pub lines: Range<usize>,
    pub footer: String,
    /// Letter of a forced sub-part (`a`, `b`, ...)
    pub sub_part: Option<String>,
}

impl PartPlan {
    pub fn render(&self, lines: &[&str]) -> String {
        let mut out = self.header.clone();
        out.push_str(&lines[self.lines.clone()].join("\n"));
        out.push_str(&self.footer);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkPlan {
    pub total_lines: usize,
    pub parts: Vec<PartPlan>,
}

impl ChunkPlan {
    /// Part bodies back to back; equals the source lines.
    pub fn bodies<'a>(&self, lines: &[&'a str]) -> Vec<&'a str> {
        self.parts
            .iter()
            .flat_map(|part| lines[part.lines.clone()].iter().copied())
            .collect()
    }
}

fn rule(width: usize) -> String {
    format!("// {}", "=".repeat(width))
}

fn part_header(names: &ChunkNames, part: usize, total: usize) -> String {
    let mut out = format!(
        "// Part {part} of {total} - {}\n// Original file: {}\n",
        names.base, names.original
    );
    if part > 1 {
        out.push_str(&format!(
            "// IMPORTANT: This is a continuation from part {}. Previous content should be reviewed first.\n",
            part - 1
        ));
    }
    out.push_str(&rule(75));
    out.push_str("\n\n");
    out
}

fn part_footer(part: usize) -> String {
    format!(
        "\n\n{}\n// End of part {part}. Continues in part {}.\n{}",
        rule(30),
        part + 1,
        rule(30)
    )
}

fn sub_part_header(names: &ChunkNames, part: usize, sub: usize, total: usize) -> String {
    format!(
        "// Part {part}.{} of {total} - {}\n// Original file: {}\n// IMPORTANT: This is a sub-part {} of part {part}.\n{}\n\n",
        sub + 1,
        names.base,
        names.original,
        sub_part_label(sub),
        rule(75)
    )
}

fn sub_part_footer(sub: usize) -> String {
    format!(
        "\n\n{}\n// End of sub-part {}. Continues in sub-part {}.\n{}",
        rule(30),
        sub_part_label(sub),
        sub_part_label(sub + 1),
        rule(30)
    )
}

/// `0 → a`, `25 → z`, `26 → aa`
pub fn sub_part_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    label.into_iter().rev().map(char::from).collect()
}

fn part_file_name(base: &str, part: usize) -> String {
    format!("{base}_part{part:02}.txt")
}

/// Split `content` into parts that fit the configured budget.
///
/// Pure: nothing is read or written. Concatenating the part bodies always
/// gives back the source lines, and there is always at least one part.
pub fn plan_chunks(
    names: &ChunkNames,
    content: &str,
    config: &ChunkerConfig,
) -> Result<ChunkPlan, PlcDocError> {
    config.validate()?;
    let lines: Vec<&str> = content.lines().collect();

    let ranges = match config.strategy {
        SplitStrategy::Exact => exact_ranges(names, &lines, config),
        SplitStrategy::Estimated => estimated_ranges(names, &lines, content.len(), config),
    };

    let total = ranges.len();
    let mut parts = Vec::with_capacity(total);
    for (idx, range) in ranges.into_iter().enumerate() {
        let part = idx + 1;
        let plan = PartPlan {
            file_name: part_file_name(&names.base, part),
            header: part_header(names, part, total),
            lines: range,
            footer: if part < total { part_footer(part) } else { String::new() },
            sub_part: None,
        };

        if config.strategy == SplitStrategy::Estimated {
            parts.extend(force_split(names, plan, part, total, &lines, config));
        } else {
            parts.push(plan);
        }
    }

    Ok(ChunkPlan {
        total_lines: lines.len(),
        parts,
    })
}

/// Contiguous ranges of `len` lines, `per_part` each, at least one range.
fn even_ranges(len: usize, per_part: usize) -> Vec<Range<usize>> {
    let per_part = per_part.max(1);
    if len == 0 {
        return vec![0..0];
    }
    (0..len)
        .step_by(per_part)
        .map(|start| start..(start + per_part).min(len))
        .collect()
}

/// Greedy byte accumulation with a worst-case header/footer reservation.
fn exact_ranges(names: &ChunkNames, lines: &[&str], config: &ChunkerConfig) -> Vec<Range<usize>> {
    const WIDEST: usize = 999_999;
    let reserve = part_header(names, WIDEST, WIDEST).len() + part_footer(WIDEST).len();
    let body_budget = config.budget().saturating_sub(reserve);

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut size = 0;
    for (idx, line) in lines.iter().enumerate() {
        let added = if idx == start { line.len() } else { size + 1 + line.len() };
        if idx > start && added > body_budget {
            ranges.push(start..idx);
            start = idx;
            size = line.len();
        } else {
            size = added;
        }
    }
    if start < lines.len() || ranges.is_empty() {
        ranges.push(start..lines.len());
    }
    ranges
}

/// Average-line-size estimate.
fn estimated_ranges(
    names: &ChunkNames,
    lines: &[&str],
    content_len: usize,
    config: &ChunkerConfig,
) -> Vec<Range<usize>> {
    let header_size = format!(
        "// Part X of Y - {}\n// Original file: {}\n// IMPORTANT: This is a continuation from part X. Previous content should be reviewed first.\n{}\n\n",
        names.base,
        names.original,
        rule(75)
    )
    .len();
    let footer_size = format!(
        "\n\n{}\n// End of part X. Continues in part X+1.\n{}",
        rule(30),
        rule(30)
    )
    .len();

    let avg_bytes_per_line = if lines.is_empty() {
        100.0
    } else {
        content_len as f64 / lines.len() as f64
    } * config.line_size_inflation;

    let room = config.budget() as f64 - header_size as f64 - footer_size as f64;
    let per_part = if avg_bytes_per_line > 0.0 {
        (room / avg_bytes_per_line).floor().max(1.0) as usize
    } else {
        lines.len()
    };
    even_ranges(lines.len(), per_part)
}

/// Replace a part whose rendered size exceeds the hard limit with lettered
/// sub-parts slicing its line range evenly.
fn force_split(
    names: &ChunkNames,
    plan: PartPlan,
    part: usize,
    total: usize,
    lines: &[&str],
    config: &ChunkerConfig,
) -> Vec<PartPlan> {
    let size_mb = plan.render(lines).len() as f64 / MIB;
    let line_count = plan.lines.len();
    if size_mb <= config.max_file_size_mb || line_count < 2 {
        return vec![plan];
    }

    let sub_parts = ((size_mb / config.max_file_size_mb) as usize + 1).min(line_count);
    let per_sub = line_count / sub_parts;
    let start = plan.lines.start;

    (0..sub_parts)
        .map(|sub| {
            let sub_start = start + sub * per_sub;
            let sub_end = if sub + 1 < sub_parts {
                start + (sub + 1) * per_sub
            } else {
                plan.lines.end
            };
            PartPlan {
                file_name: format!(
                    "{}_part{part:02}_{}.txt",
                    names.base,
                    sub_part_label(sub)
                ),
                header: sub_part_header(names, part, sub, total),
                lines: sub_start..sub_end,
                footer: if sub + 1 < sub_parts {
                    sub_part_footer(sub)
                } else {
                    String::new()
                },
                sub_part: Some(sub_part_label(sub)),
            }
        })
        .collect()
}
