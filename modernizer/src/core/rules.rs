//! Ordered textual rewrite rules for deprecated Flutter APIs.
//!
//! Rules are plain regular expressions applied to the whole file text in a
//! fixed sequence; each rule sees the previous rule's output. They know
//! nothing about Dart syntax: `background:` inside a comment is rewritten
//! and a `.withOpacity(` argument containing `)` is cut short. Use
//! [`MatchMode::CodeOnly`] to skip matches inside literals and comments.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::lexer::LiteralSpans;

/// Where a rule is allowed to match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Match anywhere in the text.
    #[default]
    Anywhere,
    /// Skip matches that start inside a string literal or comment.
    CodeOnly,
}

/// A single pattern-to-replacement rewrite.
#[derive(Debug)]
pub struct Rule {
    /// Stable identifier used in logs and JSON reports.
    pub name: &'static str,
    pattern: Regex,
    /// Replacement template in `regex` expansion syntax (`${1}`).
    replacement: &'static str,
}

/// Number of replacements a rule made in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: &'static str,
    pub count: usize,
}

/// Output of running every rule over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Non-zero hits, in rule order.
    pub hits: Vec<RuleHit>,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Rewrite every eligible match in `text`.
    ///
    /// Returns the rewritten text and the number of replacements made.
    pub fn apply(&self, text: &str, mode: MatchMode) -> (String, usize) {
        let spans = match mode {
            MatchMode::Anywhere => None,
            MatchMode::CodeOnly => Some(LiteralSpans::scan(text)),
        };

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0;
        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if spans
                .as_ref()
                .is_some_and(|spans| spans.contains(whole.start()))
            {
                continue;
            }
            out.push_str(&text[last..whole.start()]);
            caps.expand(self.replacement, &mut out);
            last = whole.end();
            count += 1;
        }
        if count == 0 {
            return (text.to_string(), 0);
        }
        out.push_str(&text[last..]);
        (out, count)
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "with-opacity",
            r"\.withOpacity\(([^)]+)\)",
            ".withAlpha((${1} * 255).round())",
        ),
        Rule::new(
            "color-scheme-member",
            r"(colorScheme\.)background\b",
            "${1}surface",
        ),
        Rule::new(
            "color-scheme-type",
            r"(ColorScheme\.)background\b",
            "${1}surface",
        ),
        Rule::new("background-named-arg", r"\bbackground\s*:", "surface:"),
        Rule::new("print-call", r"\bprint\(", "debugPrint("),
    ]
});

/// The fixed rule sequence, in application order.
pub fn default_rules() -> &'static [Rule] {
    &RULES
}

/// Apply `rules` in order, each to the previous rule's output.
pub fn apply_rules(text: &str, rules: &[Rule], mode: MatchMode) -> Rewrite {
    let mut current = text.to_string();
    let mut hits = Vec::new();
    for rule in rules {
        let (next, count) = rule.apply(&current, mode);
        if count > 0 {
            hits.push(RuleHit {
                rule: rule.name,
                count,
            });
            current = next;
        }
    }
    Rewrite {
        text: current,
        hits,
    }
}
