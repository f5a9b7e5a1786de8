//! Prompt templates with `{name}` placeholders.
//!
//! Placeholders are identifiers wrapped in single braces. Literal braces are
//! written doubled, `{{` and `}}`.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while parsing or rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{` without its closing brace
    #[error("unclosed '{{' at byte {0}")]
    Unclosed(usize),

    /// A single `}` outside of a placeholder
    #[error("unmatched '}}' at byte {0}")]
    Unmatched(usize),

    /// A placeholder whose name is not an identifier
    #[error("invalid placeholder name {0:?}")]
    InvalidName(String),

    /// No value was supplied for a placeholder
    #[error("missing value for {{{0}}}")]
    Missing(String),

    /// The template lacks a placeholder the caller requires
    #[error("template must contain {{{0}}}")]
    Required(String),

    /// The template uses a placeholder the caller does not provide
    #[error("unknown placeholder {{{0}}}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Var(String),
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    partials: BTreeMap<String, String>,
}

impl Template {
    /// Parse a template
    pub fn new(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|(_, c)| *c) == Some('{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek().map(|(_, c)| *c) == Some('}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    if !is_identifier(&name) {
                        return Err(TemplateError::InvalidName(name));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Var(name));
                }
                '}' => return Err(TemplateError::Unmatched(pos)),
                c => text.push(c),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            segments,
            partials: BTreeMap::new(),
        })
    }

    /// Placeholders still waiting for a value, in order of first use
    pub fn variables(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for segment in &self.segments {
            let Segment::Var(name) = segment else {
                continue;
            };
            if !self.partials.contains_key(name) && !seen.contains(&name.as_str()) {
                seen.push(name);
            }
        }
        seen
    }

    /// Whether the template mentions a placeholder, bound or not
    pub fn contains(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Var(var) if var == name))
    }

    /// Bind a placeholder ahead of time
    pub fn partial(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.partials.insert(name.into(), value.into());
        self
    }

    /// Check the template against the placeholders a caller supplies.
    ///
    /// Every name in `required` must appear, and every placeholder must be
    /// listed in `required` or `optional`.
    pub fn validate(&self, required: &[&str], optional: &[&str]) -> Result<(), TemplateError> {
        if let Some(missing) = required.iter().find(|name| !self.contains(name)) {
            return Err(TemplateError::Required((*missing).to_owned()));
        }

        for segment in &self.segments {
            if let Segment::Var(name) = segment {
                let name = name.as_str();
                if !required.contains(&name) && !optional.contains(&name) {
                    return Err(TemplateError::Unknown(name.to_owned()));
                }
            }
        }
        Ok(())
    }

    /// Render the template, looking up placeholders in `values` then in the
    /// partials.
    pub fn format(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .or_else(|| self.partials.get(name).map(String::as_str))
                        .ok_or_else(|| TemplateError::Missing(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
