//! Template rendering of task inputs against a run-scoped context.

use std::collections::HashMap;
use thiserror::Error;

/// Error rendering a templated input field.  The expression is the portion of
/// the input that could not be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unresolved template expression `{expression}`: {reason}")]
pub struct RenderError {
    pub expression: String,
    pub reason: String,
}

impl RenderError {
    pub fn new<E: Into<String>, R: Into<String>>(expression: E, reason: R) -> Self {
        Self {
            expression: expression.into(),
            reason: reason.into(),
        }
    }
}

/// A TemplateRenderer resolves embedded expressions in input strings against
/// a run-scoped context.  The task engine supplies one per run; tests and
/// simple embeddings can use [`ContextRenderer`].  Rendering is synchronous
/// and must fully resolve before any I/O begins.
pub trait TemplateRenderer: Sync + Send {
    /// Render a single input string to a concrete value.
    fn render(&self, raw: &str) -> Result<String, RenderError>;

    /// Render an optional input.  Absent inputs stay absent; present inputs
    /// are rendered even if empty.
    fn render_opt(&self, raw: Option<&str>) -> Result<Option<String>, RenderError> {
        raw.map(|r| self.render(r)).transpose()
    }
}

/// A renderer backed by a flat map of variables, resolving `{{ name }}`
/// expressions.  Text outside expressions passes through unchanged.
#[derive(Default, Clone)]
pub struct ContextRenderer {
    vars: HashMap<String, String>,
}

impl ContextRenderer {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Add a variable, builder-style.
    pub fn var<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl TemplateRenderer for ContextRenderer {
    fn render(&self, raw: &str) -> Result<String, RenderError> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                RenderError::new(&rest[start..], "expression is not terminated")
            })?;
            let name = after[..end].trim();
            match self.vars.get(name) {
                Some(value) => out.push_str(value),
                None => {
                    return Err(RenderError::new(
                        &rest[start..start + end + 4],
                        format!("no variable named `{}` in context", name),
                    ))
                }
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
