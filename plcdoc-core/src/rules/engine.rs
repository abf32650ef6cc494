use crate::config::RulesConfig;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::comparison::ComparisonRule;
use super::counters::CounterRule;
use super::math::MathRule;
use super::moves::MoveRule;
use super::timers::TimerRule;

/// One line-local rewrite pass.
///
/// `matches` is the guard; `rewrite` is only called when it holds. Both are
/// pure, and a line already in canonical form must not match again.
pub trait RewriteRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn matches(&self, line: &str) -> bool;
    fn rewrite(&self, line: &str) -> String;

    fn apply(&self, line: String) -> String {
        if self.matches(&line) {
            let rewritten = self.rewrite(&line);
            debug!("✏️  {}: '{}' -> '{}'", self.name(), line, rewritten);
            rewritten
        } else {
            line
        }
    }
}

/// Look up a rewrite pass by its pipeline name.
pub fn rule_by_name(name: &str) -> Option<Box<dyn RewriteRule>> {
    let rule: Box<dyn RewriteRule> = match name {
        "Timer" => Box::new(TimerRule),
        "Counter" => Box::new(CounterRule),
        "Move" => Box::new(MoveRule),
        "Math" => Box::new(MathRule),
        "Comparison" => Box::new(ComparisonRule),
        _ => return None,
    };
    Some(rule)
}

/// Ordered rewrite pipeline for network lines.
pub struct RewriteEngine {
    rules: Vec<Box<dyn RewriteRule>>,
    /// Accumulated time spent in each pass, in pipeline order
    pub rule_timings: std::cell::RefCell<Vec<(&'static str, Duration)>>,
}

impl RewriteEngine {
    pub fn new(config: &RulesConfig) -> Self {
        let mut rules = Vec::new();
        for rule_config in &config.pipeline {
            if !rule_config.enabled {
                debug!("⏭️  Skipping disabled rule: {}", rule_config.name);
                continue;
            }
            match rule_by_name(&rule_config.name) {
                Some(rule) => rules.push(rule),
                None => warn!("⚠️  Unknown rule: {}. Skipping...", rule_config.name),
            }
        }

        let rule_timings = rules.iter().map(|r| (r.name(), Duration::ZERO)).collect();
        Self {
            rules,
            rule_timings: std::cell::RefCell::new(rule_timings),
        }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every pass over one line, in order.
    pub fn rewrite_line(&self, line: &str) -> String {
        let mut timings = self.rule_timings.borrow_mut();
        self.rules
            .iter()
            .zip(timings.iter_mut())
            .fold(line.to_string(), |current, (rule, (_, spent))| {
                let start = Instant::now();
                let next = rule.apply(current);
                *spent += start.elapsed();
                next
            })
    }
}

impl Default for RewriteEngine {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}
