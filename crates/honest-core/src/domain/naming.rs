//! Name derivation for generated artifacts.
//!
//! A user types `user`, `users`, or `User` and expects the same family of
//! identifiers back: `User` for the class, `users` for files and routes,
//! `UsersModule` for the module, and so on. [`Naming`] computes every form
//! once from the raw input.

use inflector::Inflector;

/// Identifier forms derived from a free-form name.
///
/// Pure value object: no validation, no failure modes. Malformed input
/// simply yields a best-effort transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    singular: String,
    plural: String,
}

impl Naming {
    pub fn new(name: impl Into<String>) -> Self {
        let raw = name.into();
        Self {
            singular: singularize(&raw),
            plural: pluralize(&raw),
        }
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Capitalised singular: `users` → `User`.
    pub fn class_name(&self) -> String {
        capitalize(&self.singular)
    }

    /// Capitalised plural: `user` → `Users`.
    pub fn plural_class_name(&self) -> String {
        capitalize(&self.plural)
    }

    /// Lower-case plural used for generated file names.
    pub fn file_name(&self) -> String {
        self.plural_file_name()
    }

    pub fn plural_file_name(&self) -> String {
        self.plural.to_lowercase()
    }

    pub fn plural_variable_name(&self) -> String {
        self.plural.to_lowercase()
    }

    pub fn singular_variable_name(&self) -> String {
        self.singular.to_lowercase()
    }

    /// `<ClassName><suffix>`, e.g. `UserGuard`.
    pub fn suffixed(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.class_name())
    }

    /// Modules are named after the plural: `UsersModule`.
    pub fn module_name(&self) -> String {
        format!("{}Module", self.plural_class_name())
    }

    pub fn service_name(&self) -> String {
        self.suffixed("Service")
    }

    pub fn controller_name(&self) -> String {
        self.suffixed("Controller")
    }

    pub fn view_name(&self) -> String {
        self.suffixed("View")
    }
}

/// Irregular nouns Inflector gets wrong, as `(singular, plural)`.
const IRREGULAR: [(&str, &str); 10] = [
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
    ("quiz", "quizzes"),
];

/// Words with a single form.
const UNCOUNTABLE: [&str; 10] = [
    "data",
    "metadata",
    "information",
    "equipment",
    "feedback",
    "media",
    "news",
    "series",
    "species",
    "sheep",
];

/// Plural form, idempotent for inputs that are already plural.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(fixed) = irregular(word, true) {
        return fixed;
    }
    let plural = word.to_plural();
    if plural.is_empty() { word.to_string() } else { plural }
}

/// Singular form, idempotent for inputs that are already singular.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(fixed) = irregular(word, false) {
        return fixed;
    }
    let singular = word.to_singular();
    if singular.is_empty() {
        word.to_string()
    } else {
        singular
    }
}

/// Whole-word lookup in the irregular and uncountable tables, keeping a
/// leading capital.
fn irregular(word: &str, plural: bool) -> Option<String> {
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return Some(word.to_string());
    }
    let &(one, many) = IRREGULAR
        .iter()
        .find(|(one, many)| *one == lower || *many == lower)?;
    let form = if plural { many } else { one };
    if word.starts_with(char::is_uppercase) {
        Some(capitalize(form))
    } else {
        Some(form.to_string())
    }
}

/// Upper-case the first character, keep the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
