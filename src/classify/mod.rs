//! Blocked-content classification
//!
//! A best-effort syntactic scan over the decoded document. It does not parse
//! the XML tree, so obfuscated markup can slip through, but a document that
//! contains none of the configured markers is never flagged.

pub mod decode;
pub mod rules;

pub use decode::decode_text;
pub use rules::{Rule, RuleSet, DEFAULT_ELEMENTS, DEFAULT_URI_SCHEMES};

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use serde::Serialize;

use crate::error::{PreviewError, Result};

/// Lazy-initialized classifier for the standard rule set
static STANDARD: OnceLock<Classifier> = OnceLock::new();

/// One rule that matched, with the offset of its first match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: String,
    /// Byte offset into the decoded text
    pub offset: usize,
}

/// Compiled rule set
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<(Rule, Regex)>,
    set: RegexSet,
}

impl Classifier {
    /// Compile `rules` into a classifier
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let patterns: Vec<String> = rules.rules().iter().map(Rule::pattern).collect();
        let set = RegexSet::new(&patterns)
            .map_err(|e| PreviewError::config(format!("invalid classifier rule: {}", e)))?;
        let compiled = rules
            .rules()
            .iter()
            .zip(&patterns)
            .map(|(rule, pattern)| {
                Regex::new(pattern)
                    .map(|re| (rule.clone(), re))
                    .map_err(|e| {
                        PreviewError::config(format!("invalid rule {}: {}", rule.name(), e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules: compiled,
            set,
        })
    }

    /// Shared classifier built from [`RuleSet::standard`]
    pub fn standard() -> &'static Classifier {
        STANDARD.get_or_init(Classifier::default)
    }

    /// True if any rule matches `text`
    pub fn contains_blocked(&self, text: &str) -> bool {
        self.set.is_match(&mask_comments(text))
    }

    /// Decode `bytes` and classify the result
    pub fn contains_blocked_bytes(&self, bytes: &[u8]) -> bool {
        self.contains_blocked(&decode_text(bytes))
    }

    /// Every matching rule with its first offset, ordered by position
    pub fn findings(&self, text: &str) -> Vec<Finding> {
        let masked = mask_comments(text);
        let text = masked.as_ref();
        let mut findings: Vec<Finding> = self
            .set
            .matches(text)
            .iter()
            .filter_map(|i| {
                let (rule, re) = &self.rules[i];
                re.find(text).map(|m| Finding {
                    rule: rule.name(),
                    offset: m.start(),
                })
            })
            .collect();
        findings.sort_by_key(|f| f.offset);
        findings
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|(rule, _)| rule)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&RuleSet::standard()).expect("standard rules compile")
    }
}

/// Blank out `<!-- ... -->` so markers inside comments never match.
///
/// Comment bytes become spaces, keeping byte offsets stable. An unterminated
/// comment runs to the end of the text.
fn mask_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("<!--") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        let comment = &rest[start..];
        let end = comment[4..]
            .find("-->")
            .map(|i| i + 4 + 3)
            .unwrap_or(comment.len());
        out.extend(std::iter::repeat_n(' ', end));
        rest = &comment[end..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Classify `text` with the standard rule set
pub fn contains_blocked_elements(text: &str) -> bool {
    Classifier::standard().contains_blocked(text)
}
