//! Declarative per-field rule tables.
//!
//! A [`Schema`] lists the fields of one record shape. Each [`FieldSpec`]
//! carries a default value, a kind (used by front ends to pick an editor),
//! an optional trim transform, and a list of [`Rule`]s. Validation is a pure
//! batch over the whole draft: nothing here knows about rendering.
//!
//! ```rust
//! use recordbook::schema::{FieldSpec, Rule, Schema, Values};
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::text("title").trim(true).rule(Rule::required("title is required")),
//!     FieldSpec::date("due").rule(Rule::date("use YYYY-MM-DD")),
//! ]);
//!
//! let mut values = schema.defaults();
//! values.set("due", "2024/01/05");
//! let errors = schema.validate(&values);
//! assert_eq!(errors.get("title").map(String::as_str), Some("title is required"));
//! assert_eq!(errors.get("due").map(String::as_str), Some("use YYYY-MM-DD"));
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Matches an empty string or a `YYYY-MM-DD` shaped date.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^$|^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// The shared date pattern: empty, or four digits, two digits, two digits
/// separated by hyphens. Calendar validity is not checked.
#[must_use]
pub fn date_pattern() -> &'static Regex {
    &DATE_PATTERN
}

/// Field name to error message, one entry per invalid field.
pub type FieldErrors = BTreeMap<&'static str, String>;

// -----------------------------------------------------------------------------
// Rules
// -----------------------------------------------------------------------------

/// A single constraint on a field's text value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be non-blank after trimming.
    Required { message: String },
    /// Value must be empty or one of `options`.
    OneOf {
        options: Vec<String>,
        message: String,
    },
    /// Value must match `regex`.
    Pattern { regex: Regex, message: String },
}

impl Rule {
    /// Creates a non-blank rule.
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// Creates an optional set-membership rule.
    pub fn one_of<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
        message: impl Into<String>,
    ) -> Self {
        Self::OneOf {
            options: options.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Creates a pattern rule from a compiled regex.
    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Self::Pattern {
            regex,
            message: message.into(),
        }
    }

    /// Creates a rule accepting `""` or `YYYY-MM-DD`.
    pub fn date(message: impl Into<String>) -> Self {
        Self::pattern(date_pattern().clone(), message)
    }

    /// Returns the error message if `value` violates this rule.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<String> {
        let ok = match self {
            Self::Required { .. } => !value.trim().is_empty(),
            Self::OneOf { options, .. } => value.is_empty() || options.iter().any(|o| o == value),
            Self::Pattern { regex, .. } => regex.is_match(value),
        };
        if ok { None } else { Some(self.message().to_string()) }
    }

    /// Returns the message reported on failure.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::OneOf { message, .. }
            | Self::Pattern { message, .. } => message,
        }
    }
}

// -----------------------------------------------------------------------------
// Fields
// -----------------------------------------------------------------------------

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Stored value.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl Choice {
    /// Creates a choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How a field is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    LongText,
    /// One value from a fixed list.
    Choice(Vec<Choice>),
    /// A calendar date typed as text.
    Date,
}

/// A field declaration.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name, the key used by records and error maps.
    pub name: &'static str,
    /// Human-readable label.
    pub label: String,
    /// Editor kind.
    pub kind: FieldKind,
    /// Value the draft resets to.
    pub default: String,
    /// Whether the stored value is trimmed.
    pub trim: bool,
    /// Rules, checked in order.
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    fn with_kind(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label: name.to_string(),
            kind,
            default: String::new(),
            trim: false,
            rules: Vec::new(),
        }
    }

    /// Creates a single-line text field.
    pub fn text(name: &'static str) -> Self {
        Self::with_kind(name, FieldKind::Text)
    }

    /// Creates a multi-line text field.
    pub fn long_text(name: &'static str) -> Self {
        Self::with_kind(name, FieldKind::LongText)
    }

    /// Creates a choice field.
    pub fn choice(name: &'static str, choices: Vec<Choice>) -> Self {
        Self::with_kind(name, FieldKind::Choice(choices))
    }

    /// Creates a date field.
    pub fn date(name: &'static str) -> Self {
        Self::with_kind(name, FieldKind::Date)
    }

    /// Sets the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = value.into();
        self
    }

    /// Sets whether the stored value is trimmed.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Appends a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns true if a `Required` rule is present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required { .. }))
    }

    /// Applies the field's transform to a raw input value.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        if self.trim {
            raw.trim().to_string()
        } else {
            raw.to_string()
        }
    }

    /// Runs the rules against `value`, returning the first failure.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<String> {
        let value = self.normalize(value);
        self.rules.iter().find_map(|rule| rule.check(&value))
    }

    /// Returns the choice after (or before) `current`, wrapping around.
    ///
    /// Returns `None` for non-choice fields. An unknown current value moves
    /// to the first (or last) option.
    #[must_use]
    pub fn cycle_choice(&self, current: &str, forward: bool) -> Option<String> {
        let FieldKind::Choice(choices) = &self.kind else {
            return None;
        };
        if choices.is_empty() {
            return None;
        }
        let len = choices.len();
        let next = match choices.iter().position(|c| c.value == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(choices[next].value.clone())
    }

    /// Returns the display label for a stored choice value.
    #[must_use]
    pub fn choice_label<'a>(&'a self, value: &'a str) -> &'a str {
        match &self.kind {
            FieldKind::Choice(choices) => choices
                .iter()
                .find(|c| c.value == value)
                .map_or(value, |c| c.label.as_str()),
            _ => value,
        }
    }
}

// -----------------------------------------------------------------------------
// Values
// -----------------------------------------------------------------------------

/// Field values in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Values {
    entries: Vec<(&'static str, String)>,
}

impl Values {
    /// Returns the value of `name`, or `""` if the field is unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map_or("", |(_, v)| v.as_str())
    }

    /// Sets the value of `name`. Returns false if the field is unknown.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => {
                *v = value.into();
                true
            }
            None => false,
        }
    }

    /// Iterates `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

// -----------------------------------------------------------------------------
// Schema
// -----------------------------------------------------------------------------

/// The rule table for one record shape.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a schema from field declarations.
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns a value set holding every field's default.
    #[must_use]
    pub fn defaults(&self) -> Values {
        Values {
            entries: self
                .fields
                .iter()
                .map(|f| (f.name, f.default.clone()))
                .collect(),
        }
    }

    /// Validates every field, collecting one message per invalid field.
    #[must_use]
    pub fn validate(&self, values: &Values) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|f| f.check(values.get(f.name)).map(|msg| (f.name, msg)))
            .collect()
    }

    /// Applies each field's transform, producing the values a record is built from.
    #[must_use]
    pub fn normalize(&self, values: &Values) -> Values {
        Values {
            entries: self
                .fields
                .iter()
                .map(|f| (f.name, f.normalize(values.get(f.name))))
                .collect(),
        }
    }
}
