//! Path template compilation.
//!
//! A template is a path made of literal text and parameter tokens:
//!
//! | Token | Meaning |
//! |---|---|
//! | `:name` | required segment |
//! | `:name?` | optional segment |
//! | `:name+` | one or more segments |
//! | `:name*` | zero or more segments |
//! | `:name(\d+)` | segment restricted by a custom regex (combines with modifiers) |
//!
//! [`compile`] turns a template into a [`CompiledPattern`] that both matches
//! paths (extracting parameters) and builds paths from parameters. Matching
//! is case-insensitive and tolerates one trailing slash.

use std::fmt;
use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::CharIndices;

use regex::Regex;

use locale_router_core::utils::{ParamValue, Params};
use locale_router_core::{RouterError, RouterResult};

use crate::query::{decode_component, encode_path_literal, encode_path_segment};

/// The sub-pattern used when a token does not declare one.
const DEFAULT_SEGMENT: &str = "[^/]+?";

/// A named parameter declared by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    name: String,
    prefix: String,
    pattern: String,
    optional: bool,
    repeat: bool,
}

impl Key {
    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sub-pattern a single value must satisfy.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `true` for `?` and `*` tokens.
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// `true` for `+` and `*` tokens.
    pub const fn is_repeat(&self) -> bool {
        self.repeat
    }
}

#[derive(Debug, Clone)]
enum Token {
    /// Literal text, already percent-encoded the way request paths arrive.
    Literal(String),
    Param(Key),
}

/// A compiled template: an anchored matcher plus a path builder.
#[derive(Clone)]
pub struct CompiledPattern {
    source: String,
    tokens: Vec<Token>,
    keys: Vec<Key>,
    regex: Regex,
    validators: Vec<Regex>,
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("regex", &self.regex.as_str())
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl CompiledPattern {
    /// Returns the template this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled matcher.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the declared parameters in order of first appearance.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns `true` if the template declares a parameter called `name`.
    pub fn has_key(&self, name: &str) -> bool {
        self.keys.iter().any(|key| key.name == name)
    }

    /// Returns `true` if `path` matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches `path` and extracts its parameters.
    ///
    /// Values are percent-decoded. Repeating parameters are split on `/` into
    /// a list. Optional parameters that did not take part in the match are
    /// left out of the result.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();

        for (index, key) in self.keys.iter().enumerate() {
            let Some(m) = captures.get(index + 1) else {
                continue;
            };
            let value = if key.repeat {
                ParamValue::Many(m.as_str().split('/').map(decode_component).collect())
            } else {
                ParamValue::One(decode_component(m.as_str()))
            };
            params.insert(key.name.clone(), value);
        }

        Some(params)
    }

    /// Builds a concrete path from `params`.
    ///
    /// Keys the template does not declare are ignored. Values are
    /// percent-encoded segment by segment and lists are joined with `/`.
    ///
    /// # Errors
    ///
    /// - [`RouterError::MissingParameter`] when a required parameter is absent
    ///   (or an empty list is given for a `+` parameter).
    /// - [`RouterError::InvalidParameter`] when a list is given for a
    ///   non-repeating parameter, or a value does not satisfy the token's pattern.
    pub fn build(&self, params: &Params) -> RouterResult<String> {
        let mut path = String::new();
        let mut key_index = 0;

        for token in &self.tokens {
            let key = match token {
                Token::Literal(text) => {
                    path.push_str(text);
                    continue;
                }
                Token::Param(key) => key,
            };
            let validator = &self.validators[key_index];
            key_index += 1;

            let values: &[String] = match params.get(&key.name) {
                None => &[],
                Some(ParamValue::Many(_)) if !key.repeat => {
                    return Err(RouterError::InvalidParameter {
                        param: key.name.clone(),
                        reason: "expected a single value, got a list".to_string(),
                    });
                }
                Some(value) => value.as_slice(),
            };

            if values.is_empty() {
                if key.optional {
                    continue;
                }
                return Err(RouterError::MissingParameter {
                    route: self.source.clone(),
                    param: key.name.clone(),
                });
            }

            for (position, value) in values.iter().enumerate() {
                let encoded = encode_path_segment(value);
                if !validator.is_match(&encoded) {
                    return Err(RouterError::InvalidParameter {
                        param: key.name.clone(),
                        reason: format!("'{value}' does not match '{}'", key.pattern),
                    });
                }
                path.push_str(if position == 0 { key.prefix.as_str() } else { "/" });
                path.push_str(&encoded);
            }
        }

        Ok(path)
    }

    /// Returns the template with every parameter token removed.
    ///
    /// `/blog/:slug/comments` becomes `/blog/comments`; a template with no
    /// literal text becomes `/`. The skeleton is returned decoded.
    pub fn skeleton(&self) -> String {
        literal_skeleton(&self.tokens)
    }
}

/// Returns the literal skeleton of a template without compiling a matcher.
///
/// # Errors
///
/// Returns [`RouterError::ImproperlyConfigured`] when the template cannot be tokenized.
pub fn skeleton(template: &str) -> RouterResult<String> {
    tokenize(template).map(|tokens| literal_skeleton(&tokens))
}

fn literal_skeleton(tokens: &[Token]) -> String {
    let literal: String = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Literal(text) => Some(text.as_str()),
            Token::Param(_) => None,
        })
        .collect();

    let literal = decode_component(&literal);
    let trimmed = literal.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Compiles a path template.
///
/// # Examples
///
/// ```
/// use locale_router_http::urls::pattern::compile;
/// use locale_router_core::{ParamValue, Params};
///
/// let pattern = compile("/en/a/:b/:c+").unwrap();
/// let params = pattern.match_path("/en/a/b/1/2").unwrap();
/// assert_eq!(params.get_str("b"), Some("b"));
/// assert_eq!(params.get("c"), Some(&ParamValue::from(vec!["1", "2"])));
///
/// assert_eq!(pattern.build(&params).unwrap(), "/en/a/b/1/2");
/// ```
///
/// # Errors
///
/// Returns [`RouterError::ImproperlyConfigured`] for an unclosed or empty
/// custom pattern, a parameter declared twice, a custom pattern containing
/// capturing groups, or a custom pattern that is not a valid regex.
pub fn compile(template: &str) -> RouterResult<CompiledPattern> {
    let tokens = tokenize(template)?;
    let keys: Vec<Key> = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Param(key) => Some(key.clone()),
            Token::Literal(_) => None,
        })
        .collect();

    let source = regex_source(&tokens);
    let regex = Regex::new(&source).map_err(|e| {
        RouterError::ImproperlyConfigured(format!("Invalid pattern '{template}': {e}"))
    })?;

    if regex.captures_len() != keys.len() + 1 {
        return Err(RouterError::ImproperlyConfigured(format!(
            "Custom parameter patterns must not contain capturing groups: {template}"
        )));
    }

    let validators = keys
        .iter()
        .map(|key| {
            Regex::new(&format!("(?i)^(?:{})$", key.pattern)).map_err(|e| {
                RouterError::ImproperlyConfigured(format!(
                    "Invalid pattern for parameter '{}': {e}",
                    key.name
                ))
            })
        })
        .collect::<RouterResult<Vec<_>>>()?;

    Ok(CompiledPattern {
        source: template.to_string(),
        tokens,
        keys,
        regex,
        validators,
    })
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a template into literal runs and parameter tokens.
///
/// A `/` directly before a parameter becomes that parameter's prefix, so an
/// omitted optional segment takes its slash with it.
fn tokenize(template: &str) -> RouterResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    literal.push(escaped);
                }
            }
            ':' if chars.peek().is_some_and(|&(_, next)| is_name_char(next)) => {
                let mut name = String::new();
                while let Some(&(_, next)) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }

                let pattern = if chars.peek().is_some_and(|&(_, next)| next == '(') {
                    chars.next();
                    read_group(&mut chars, template)?
                } else {
                    DEFAULT_SEGMENT.to_string()
                };

                let (optional, repeat) = match chars.peek() {
                    Some(&(_, '?')) => (true, false),
                    Some(&(_, '*')) => (true, true),
                    Some(&(_, '+')) => (false, true),
                    _ => (false, false),
                };
                if optional || repeat {
                    chars.next();
                }

                let duplicate = tokens
                    .iter()
                    .any(|token| matches!(token, Token::Param(key) if key.name == name));
                if duplicate {
                    return Err(RouterError::ImproperlyConfigured(format!(
                        "Parameter '{name}' is declared twice in: {template}"
                    )));
                }

                let prefix = if literal.ends_with('/') {
                    literal.pop();
                    "/"
                } else {
                    ""
                };
                if !literal.is_empty() {
                    tokens.push(Token::Literal(encode_path_literal(&literal)));
                    literal.clear();
                }

                tokens.push(Token::Param(Key {
                    name,
                    prefix: prefix.to_string(),
                    pattern,
                    optional,
                    repeat,
                }));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(encode_path_literal(&literal)));
    }

    Ok(tokens)
}

/// Reads a parenthesised custom pattern; the opening `(` is already consumed.
fn read_group(chars: &mut Peekable<CharIndices<'_>>, template: &str) -> RouterResult<String> {
    let mut depth = 1;
    let mut group = String::new();

    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                group.push(c);
                if let Some((_, escaped)) = chars.next() {
                    group.push(escaped);
                }
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    if group.is_empty() {
                        return Err(RouterError::ImproperlyConfigured(format!(
                            "Empty parameter pattern in: {template}"
                        )));
                    }
                    return Ok(group);
                }
            }
            _ => {}
        }
        group.push(c);
    }

    Err(RouterError::ImproperlyConfigured(format!(
        "Unclosed parenthesis in route: {template}"
    )))
}

/// Renders tokens as an anchored, case-insensitive regex.
fn regex_source(tokens: &[Token]) -> String {
    let mut source = String::from("(?i)^");
    let last = tokens.len().saturating_sub(1);

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(text) => {
                // A trailing slash is re-added as optional below.
                let text = if index == last {
                    text.strip_suffix('/').unwrap_or(text)
                } else {
                    text
                };
                source.push_str(&regex::escape(text));
            }
            Token::Param(key) => {
                let prefix = regex::escape(&key.prefix);
                let mut capture = format!("(?:{})", key.pattern);
                if key.repeat {
                    capture = format!("{capture}(?:/{capture})*");
                }
                if key.optional {
                    if prefix.is_empty() {
                        write!(source, "({capture})?").ok();
                    } else {
                        write!(source, "(?:{prefix}({capture}))?").ok();
                    }
                } else {
                    write!(source, "{prefix}({capture})").ok();
                }
            }
        }
    }

    source.push_str("/?$");
    source
}
