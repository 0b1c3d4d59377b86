//! Declarative Modal Forms
//!
//! Field descriptors and client-side validation rules for the create/edit
//! modal. Values live in a JSON object keyed by backend field name so that
//! submitted fields can shallow-merge over the record being edited.

use leptos::prelude::*;
use serde_json::{Map, Value};

/// Form values, keyed by backend field name.
pub type FormModel = Map<String, Value>;

/// One option of a select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Input widget backing a form field.
#[derive(Clone)]
pub enum FieldKind {
    Text,
    Password,
    Number { min: Option<f64> },
    Date,
    Switch,
    /// Not rendered; carried through submission (record id, fixed bill id).
    Hidden,
    Select {
        options: Signal<Vec<SelectOption>>,
        on_change: Option<Callback<Value>>,
    },
}

impl FieldKind {
    pub fn select(options: Signal<Vec<SelectOption>>) -> Self {
        FieldKind::Select {
            options,
            on_change: None,
        }
    }

    pub fn select_with(options: Signal<Vec<SelectOption>>, on_change: Callback<Value>) -> Self {
        FieldKind::Select {
            options,
            on_change: Some(on_change),
        }
    }
}

/// Declarative validation rule, checked before anything reaches the
/// network.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    MinLen(usize),
    Email,
    Min(f64),
    /// Value must equal another field's value (password confirmation).
    Matches(&'static str),
}

#[derive(Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }
}

// ========================
// Validation
// ========================

/// Validate every field; returns one `(field name, message)` per violating
/// field, in declaration order.
pub fn validate(fields: &[FormField], model: &FormModel) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|field| {
            field
                .rules
                .iter()
                .find_map(|rule| check(rule, field, model))
                .map(|message| (field.name.to_string(), message))
        })
        .collect()
}

fn check(rule: &Rule, field: &FormField, model: &FormModel) -> Option<String> {
    let value = model.get(field.name);
    match rule {
        Rule::Required => {
            if is_absent(value) {
                let verb = if matches!(field.kind, FieldKind::Select { .. }) {
                    "select"
                } else {
                    "input"
                };
                Some(format!("Please {verb} {}!", field.label.to_lowercase()))
            } else {
                None
            }
        }
        Rule::MinLen(min) => match value.and_then(Value::as_str) {
            Some(text) if !text.is_empty() && text.chars().count() < *min => Some(format!(
                "{} must be at least {min} characters!",
                field.label
            )),
            _ => None,
        },
        Rule::Email => match value.and_then(Value::as_str) {
            Some(text) if !text.is_empty() && !looks_like_email(text) => {
                Some("Please enter a valid email!".to_string())
            }
            _ => None,
        },
        Rule::Min(min) => match value.and_then(Value::as_f64) {
            Some(number) if number < *min => {
                Some(format!("{} must be at least {min}!", field.label))
            }
            _ => None,
        },
        Rule::Matches(other) => {
            if !is_absent(value) && value != model.get(*other) {
                Some(format!("{} does not match {other}!", field.label))
            } else {
                None
            }
        }
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Minimal email shape check: non-empty local part and a dotted domain.
pub fn looks_like_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.split_once('.').is_some_and(|(host, tld)| {
                    !host.is_empty() && !tld.is_empty()
                })
        }
        None => false,
    }
}

// ========================
// Model Accessors
// ========================

/// Restrict the model to declared fields, dropping absent values. This is
/// what a submission sends.
pub fn collect_values(fields: &[FormField], model: &FormModel) -> FormModel {
    let mut values = FormModel::new();
    for field in fields {
        if let Some(value) = model.get(field.name) {
            if !value.is_null() {
                values.insert(field.name.to_string(), value.clone());
            }
        }
    }
    values
}

/// Display string for a text-ish input.
pub fn text_value(model: &FormModel, name: &str) -> String {
    match model.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub fn bool_value(model: &FormModel, name: &str) -> bool {
    model.get(name).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(entries: &[(&str, Value)]) -> FormModel {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn required_rejects_missing_null_and_empty() {
        let field = FormField::new("name", "Name", FieldKind::Text).required();

        assert_eq!(validate(&[field.clone()], &model(&[])).len(), 1);
        assert_eq!(
            validate(&[field.clone()], &model(&[("name", Value::Null)])).len(),
            1
        );
        assert_eq!(
            validate(&[field.clone()], &model(&[("name", json!(""))])).len(),
            1
        );
        assert!(validate(&[field], &model(&[("name", json!("ok"))])).is_empty());
    }

    #[test]
    fn required_passes_a_false_switch() {
        let field = FormField::new("active", "Active", FieldKind::Switch).required();
        assert!(validate(&[field], &model(&[("active", json!(false))])).is_empty());
    }

    #[test]
    fn min_len_counts_characters() {
        let field =
            FormField::new("password", "Password", FieldKind::Password).rule(Rule::MinLen(6));

        let errors = validate(&[field.clone()], &model(&[("password", json!("short"))]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].1.contains("at least 6"));

        assert!(validate(&[field], &model(&[("password", json!("longenough"))])).is_empty());
    }

    #[test]
    fn email_rule_checks_shape() {
        let field = FormField::new("email", "Email", FieldKind::Text).rule(Rule::Email);

        assert_eq!(
            validate(&[field.clone()], &model(&[("email", json!("nope"))])).len(),
            1
        );
        assert_eq!(
            validate(&[field.clone()], &model(&[("email", json!("a@b"))])).len(),
            1
        );
        assert!(validate(&[field], &model(&[("email", json!("a@b.co"))])).is_empty());
    }

    #[test]
    fn min_rule_bounds_numbers() {
        let field = FormField::new("quantity", "Quantity", FieldKind::Number { min: Some(1.0) })
            .rule(Rule::Min(1.0));

        assert_eq!(
            validate(&[field.clone()], &model(&[("quantity", json!(0))])).len(),
            1
        );
        assert!(validate(&[field], &model(&[("quantity", json!(3))])).is_empty());
    }

    #[test]
    fn matches_rule_compares_fields() {
        let field = FormField::new("confirmPassword", "Confirm Password", FieldKind::Password)
            .rule(Rule::Matches("password"));

        let mismatched = model(&[
            ("password", json!("secret1")),
            ("confirmPassword", json!("secret2")),
        ]);
        assert_eq!(validate(&[field.clone()], &mismatched).len(), 1);

        let matched = model(&[
            ("password", json!("secret1")),
            ("confirmPassword", json!("secret1")),
        ]);
        assert!(validate(&[field], &matched).is_empty());
    }

    #[test]
    fn first_violated_rule_wins_per_field() {
        let field = FormField::new("email", "Email", FieldKind::Text)
            .required()
            .rule(Rule::Email);

        let errors = validate(&[field], &model(&[]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].1.starts_with("Please input"));
    }

    #[test]
    fn collect_values_keeps_only_declared_present_fields() {
        let fields = vec![
            FormField::new("id", "Id", FieldKind::Hidden),
            FormField::new("name", "Name", FieldKind::Text),
        ];
        let model = model(&[
            ("name", json!("x")),
            ("stray", json!("dropped")),
            ("id", Value::Null),
        ]);

        let values = collect_values(&fields, &model);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("name"), Some(&json!("x")));
    }

    #[test]
    fn text_value_renders_strings_and_numbers() {
        let model = model(&[("name", json!("x")), ("total", json!(12.5))]);
        assert_eq!(text_value(&model, "name"), "x");
        assert_eq!(text_value(&model, "total"), "12.5");
        assert_eq!(text_value(&model, "missing"), "");
    }
}
