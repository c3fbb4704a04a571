use regex::Regex;

/// Shell-style wildcard: `*` is any run of characters, `?` exactly one, the
/// rest is literal. The whole candidate must match. There is no escape, so a
/// literal `*` or `?` can never be matched.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Option<Regex>,
}

impl WildcardPattern {
    /// Never fails: a pattern that cannot be translated matches nothing.
    pub fn compile(pattern: &str) -> Self {
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push_str("(?s)^");
        let mut literal = [0u8; 4];
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut literal))),
            }
        }
        expr.push('$');

        let regex = match Regex::new(&expr) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::debug!("wildcard {pattern:?} degraded to no-match: {e}");
                None
            }
        };
        Self { source: pattern.to_string(), regex }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
