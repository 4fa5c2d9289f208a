//! Best-effort recovery of `const x = { ... },` object literals from minified
//! script text.
//!
//! The capture is lazy (`{` up to the first `},`) and key quoting is a plain
//! text substitution, so nested literals can be truncated and values holding
//! `word:` sequences (URLs, ternaries) get mangled. Those candidates fail to
//! parse and are dropped; callers only see literals that round-tripped into
//! JSON objects.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static CONST_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)const\s+\w+\s*=\s*\{.*?\},").expect("valid regex"));

static BARE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*:").expect("valid regex"));

/// Lazily yields every `const` object literal in `script` that parses as a
/// JSON object once its bare keys are quoted. Never fails; unparseable
/// candidates are skipped.
pub fn object_literals(script: &str) -> impl Iterator<Item = Map<String, Value>> + '_ {
    CONST_LITERAL_RE
        .find_iter(script)
        .filter_map(|m| parse_literal(m.as_str()))
}

fn parse_literal(captured: &str) -> Option<Map<String, Value>> {
    let start = captured.find('{')?;
    let end = captured.rfind('}')?;
    if end < start {
        return None;
    }
    let normalized = quote_bare_keys(&captured[start..=end]);
    match serde_json::from_str(&normalized) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Wraps every `word:` in double quotes, turning `{name:"x"}` into
/// `{"name":"x"}`.
fn quote_bare_keys(literal: &str) -> String {
    BARE_KEY_RE.replace_all(literal, "\"${1}\":").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_bare_keys() {
        assert_eq!(
            quote_bare_keys(r#"{name:"Op",hash :"h1"}"#),
            r#"{"name":"Op","hash":"h1"}"#
        );
    }

    #[test]
    fn leaves_quoted_keys_alone() {
        assert_eq!(quote_bare_keys(r#"{"name":"Op"}"#), r#"{"name":"Op"}"#);
    }

    #[test]
    fn yields_parseable_literals_in_order() {
        let script = r#"var z=1;const a = {name:"First",hash:"h1"},b=2;const c={name:"Second",hash:"h2"},"#;
        let names: Vec<String> = object_literals(script)
            .filter_map(|m| m.get("name").and_then(Value::as_str).map(str::to_owned))
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn spans_newlines() {
        let script = "const q = {\n  name:\"Multi\",\n  hash:\"h3\"\n},";
        let literal = object_literals(script).next().expect("one literal");
        assert_eq!(literal.get("hash").and_then(Value::as_str), Some("h3"));
    }

    #[test]
    fn skips_unparseable_candidates() {
        let script = r#"const a = {fn:function(){return 1}},const b = {name:"Ok",hash:"h4"},"#;
        let parsed: Vec<_> = object_literals(script).collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].get("name").and_then(Value::as_str), Some("Ok"));
    }

    #[test]
    fn url_values_are_dropped_not_raised() {
        let script = r#"const a = {url:"https://example.com"},"#;
        assert_eq!(object_literals(script).count(), 0);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(object_literals("").count(), 0);
    }
}
