//! Placeholder substitution shared by schematics and the template pipeline.

use std::collections::BTreeMap;

/// Context for placeholder rendering.
///
/// A **Value Object** mapping placeholder names to their values. Rendering
/// replaces every `{{name}}` occurrence with the value; placeholders without
/// a value are left as-is.
///
/// ## Edge Cases
///
/// - `{{unknown}}` → remains as literal `{{unknown}}` (no error)
/// - `{{a}}{{a}}` → both replaced
/// - `{{{a}}}` → outer braces preserved, inner replaced (JSX expressions
///   such as `key={{{id}}}` rely on this)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    // BTreeMap keeps rendering order deterministic.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, consuming self and returning a new context.
    ///
    /// ```rust
    /// use honest_core::domain::RenderContext;
    ///
    /// let ctx = RenderContext::new()
    ///     .with_variable("projectName", "blog")
    ///     .with_variable("packageManager", "npm");
    /// assert_eq!(ctx.render("{{projectName}} via {{packageManager}}"), "blog via npm");
    /// ```
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Render a template string by replacing `{{VARIABLE}}` placeholders.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            if result.contains(&placeholder) {
                result = result.replace(&placeholder, value);
            }
        }
        result
    }
}
