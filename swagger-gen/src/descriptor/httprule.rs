// SPDX-FileCopyrightText: © 2025 Phala Network <dstack@phala.network>
//
// SPDX-License-Identifier: Apache-2.0

//! Parser for the `google.api.http` URL template grammar:
//!
//! ```text
//! Template  = "/" Segments [ ":" Verb ]
//! Segments  = Segment { "/" Segment }
//! Segment   = "*" | "**" | Literal | Variable
//! Variable  = "{" FieldPath [ "=" Segments ] "}"
//! FieldPath = Ident { "." Ident }
//! ```
//!
//! Braces cannot be split on `/` naively because a variable pattern like
//! `{name=shelves/*}` contains slashes, so the scanner keeps a brace
//! depth counter while cutting segments.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
    pub verb: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Wildcard,
    DeepWildcard,
    Variable(Variable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub field_path: Vec<String>,
    /// Segments after `=`; `None` when the variable was written as a
    /// bare `{field}` (equivalent to `{field=*}` on the wire).
    pub pattern: Option<Vec<Segment>>,
}

impl Template {
    /// Variables in template order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable(v) => Some(v),
            _ => None,
        })
    }
}

impl Variable {
    pub fn dotted_path(&self) -> String {
        self.field_path.join(".")
    }
}

fn err(tmpl: &str, msg: &str) -> Error {
    Error::InvalidHttpRule(format!("{msg} in template {tmpl:?}"))
}

/// Parse a URL template, validating the grammar above.
pub fn parse(tmpl: &str) -> Result<Template> {
    let rest = tmpl
        .strip_prefix('/')
        .ok_or_else(|| err(tmpl, "template must start with '/'"))?;

    // Cut segments on '/' and the trailing verb on ':', tracking brace
    // depth so delimiters inside a variable pattern are left alone.
    let mut raw_segments: Vec<String> = Vec::new();
    let mut verb: Option<String> = None;
    let mut buffer = String::new();
    let mut depth = 0u32;
    let mut chars = rest.char_indices();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if depth > 0 {
                    return Err(err(tmpl, "nested '{' is not allowed"));
                }
                depth += 1;
                buffer.push(ch);
            }
            '}' => {
                if depth == 0 {
                    return Err(err(tmpl, "'}' without matching '{'"));
                }
                depth -= 1;
                buffer.push(ch);
            }
            '/' if depth == 0 => {
                raw_segments.push(std::mem::take(&mut buffer));
            }
            ':' if depth == 0 => {
                // Everything after the ':' is the verb.
                let v = &rest[pos + 1..];
                if v.is_empty() || v.contains('/') || v.contains('{') || v.contains(':') {
                    return Err(err(tmpl, "malformed verb"));
                }
                verb = Some(v.to_string());
                break;
            }
            _ => buffer.push(ch),
        }
    }
    if verb.is_none() {
        raw_segments.push(buffer);
    } else {
        raw_segments.push(std::mem::take(&mut buffer));
    }
    if depth != 0 {
        return Err(err(tmpl, "'{' without matching '}'"));
    }

    let mut segments = Vec::with_capacity(raw_segments.len());
    for raw in &raw_segments {
        segments.push(parse_segment(tmpl, raw, true)?);
    }

    // '**' swallows the rest of the path, nothing may follow it.
    for (idx, segment) in segments.iter().enumerate() {
        let has_deep = match segment {
            Segment::DeepWildcard => true,
            Segment::Variable(v) => v
                .pattern
                .as_deref()
                .is_some_and(|p| p.contains(&Segment::DeepWildcard)),
            _ => false,
        };
        if has_deep && idx + 1 != segments.len() {
            return Err(err(tmpl, "no segment may follow '**'"));
        }
    }

    Ok(Template { segments, verb })
}

fn parse_segment(tmpl: &str, raw: &str, allow_variable: bool) -> Result<Segment> {
    match raw {
        "" => Err(err(tmpl, "empty segment")),
        "*" => Ok(Segment::Wildcard),
        "**" => Ok(Segment::DeepWildcard),
        _ if raw.starts_with('{') => {
            if !allow_variable {
                return Err(err(tmpl, "variable inside variable pattern"));
            }
            let inner = raw
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .ok_or_else(|| err(tmpl, "malformed variable"))?;
            parse_variable(tmpl, inner)
        }
        _ => {
            if raw.contains(['{', '}', '*']) {
                return Err(err(tmpl, "malformed segment"));
            }
            Ok(Segment::Literal(raw.to_string()))
        }
    }
}

fn parse_variable(tmpl: &str, inner: &str) -> Result<Segment> {
    let (path_part, pattern_part) = match inner.split_once('=') {
        Some((p, rest)) => (p, Some(rest)),
        None => (inner, None),
    };

    let field_path: Vec<String> = path_part.split('.').map(str::to_string).collect();
    for ident in &field_path {
        let mut chars = ident.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(err(tmpl, "malformed field path in variable"));
        }
    }

    let pattern = match pattern_part {
        None => None,
        Some(p) => {
            let mut segments = Vec::new();
            for raw in p.split('/') {
                segments.push(parse_segment(tmpl, raw, false)?);
            }
            Some(segments)
        }
    };

    Ok(Segment::Variable(Variable {
        field_path,
        pattern,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    #[test]
    fn test_parse_plain_path() {
        let t = parse("/v1/users").unwrap();
        assert_eq!(t.segments, vec![literal("v1"), literal("users")]);
        assert_eq!(t.verb, None);
    }

    #[test]
    fn test_parse_bare_variable() {
        let t = parse("/v1/users/{user_id}").unwrap();
        assert_eq!(
            t.segments[2],
            Segment::Variable(Variable {
                field_path: vec!["user_id".to_string()],
                pattern: None,
            })
        );
    }

    #[test]
    fn test_parse_variable_with_pattern() {
        let t = parse("/v1/{name=projects/*}/items").unwrap();
        assert_eq!(
            t.segments[1],
            Segment::Variable(Variable {
                field_path: vec!["name".to_string()],
                pattern: Some(vec![literal("projects"), Segment::Wildcard]),
            })
        );
        assert_eq!(t.segments[2], literal("items"));
    }

    #[test]
    fn test_parse_dotted_field_path() {
        let t = parse("/v1/users/{user.id}").unwrap();
        assert_eq!(
            t.segments[2],
            Segment::Variable(Variable {
                field_path: vec!["user".to_string(), "id".to_string()],
                pattern: None,
            })
        );
    }

    #[test]
    fn test_parse_verb() {
        let t = parse("/v1/{name=operations/*}:cancel").unwrap();
        assert_eq!(t.verb.as_deref(), Some("cancel"));
        assert_eq!(t.segments.len(), 2);
    }

    #[test]
    fn test_parse_deep_wildcard() {
        let t = parse("/v1/{name=shelves/**}").unwrap();
        match &t.segments[1] {
            Segment::Variable(v) => {
                assert_eq!(
                    v.pattern.as_deref(),
                    Some(&[literal("shelves"), Segment::DeepWildcard][..])
                );
            }
            other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_trailing_after_deep_wildcard() {
        assert!(parse("/v1/**/users").is_err());
        assert!(parse("/v1/{name=**}/users").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse("v1/users").is_err());
        assert!(parse("/v1//users").is_err());
        assert!(parse("/v1/{a={b}}").is_err());
        assert!(parse("/v1/{}").is_err());
        assert!(parse("/v1/{1abc}").is_err());
        assert!(parse("/v1/users:").is_err());
        assert!(parse("/v1/us{er").is_err());
    }
}
