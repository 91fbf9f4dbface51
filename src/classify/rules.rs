//! Blocked-content rules
//!
//! Each rule is a syntactic marker for a construct that turns a static
//! drawing into active content: script, event handlers, embedded foreign
//! documents, external fetches and animated links.

use regex::escape;

/// Elements flagged by the standard rule set
pub const DEFAULT_ELEMENTS: &[&str] = &[
    "script",
    "foreignObject",
    "iframe",
    "embed",
    "object",
    "image",
    "feImage",
    "handler",
    "listener",
];

/// URI schemes flagged by the standard rule set
pub const DEFAULT_URI_SCHEMES: &[&str] = &["javascript", "vbscript"];

/// Optional XML namespace prefix, e.g. `svg:` in `<svg:script>`
const PREFIX: &str = r"(?:[A-Za-z_][\w.-]*:)?";

/// A single blocked-content marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Opening tag with this local name
    Element(String),
    /// Any `on*=` event handler attribute
    EventAttribute,
    /// Attribute value starting with `scheme:`
    UriScheme(String),
    /// `<animate>` or `<set>` retargeting an `href`
    AnimatedHref,
}

impl Rule {
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(name.into())
    }

    pub fn uri_scheme(scheme: impl Into<String>) -> Self {
        Self::UriScheme(scheme.into())
    }

    /// Stable identifier used in diagnostics
    pub fn name(&self) -> String {
        match self {
            Self::Element(name) => format!("element:{}", name),
            Self::EventAttribute => "event-attribute".to_string(),
            Self::UriScheme(scheme) => format!("uri-scheme:{}", scheme),
            Self::AnimatedHref => "animated-href".to_string(),
        }
    }

    /// Case-insensitive regex source for this rule
    pub(crate) fn pattern(&self) -> String {
        match self {
            Self::Element(name) => {
                format!(r"(?i)<\s*{}{}(?:[\s/>]|$)", PREFIX, escape(name))
            }
            // Walks whole attributes so `on` inside a quoted value is skipped
            Self::EventAttribute => format!(
                r#"(?i)<\s*{p}[\w.-]+(?:\s+[^\s=>"'/]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+))*\s+{p}on[a-z]+\s*="#,
                p = PREFIX
            ),
            Self::UriScheme(scheme) => {
                format!(r#"(?i)=\s*["']\s*{}\s*:"#, escape(scheme))
            }
            Self::AnimatedHref => format!(
                r#"(?i)<\s*{}(?:animate|set)\b[^>]*\battributeName\s*=\s*["']\s*(?:xlink:)?href\s*["']"#,
                PREFIX
            ),
        }
    }
}

/// Ordered, de-duplicated collection of rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// A rule set that flags nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Default elements, default URI schemes, event attributes and
    /// animated hrefs
    pub fn standard() -> Self {
        let mut set = Self::empty();
        set.extend(DEFAULT_ELEMENTS.iter().map(|name| Rule::element(*name)));
        set.push(Rule::EventAttribute);
        set.extend(DEFAULT_URI_SCHEMES.iter().map(|s| Rule::uri_scheme(*s)));
        set.push(Rule::AnimatedHref);
        set
    }

    /// Add a rule unless an equivalent one is present.
    ///
    /// Element and scheme names compare case-insensitively since the
    /// compiled patterns do.
    pub fn push(&mut self, rule: Rule) {
        let key = rule.name().to_lowercase();
        if !self.rules.iter().any(|r| r.name().to_lowercase() == key) {
            self.rules.push(rule);
        }
    }

    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<T: IntoIterator<Item = Rule>>(&mut self, iter: T) {
        for rule in iter {
            self.push(rule);
        }
    }
}
