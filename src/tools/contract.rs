// ABOUTME: Field tables describing each tool's input and the validator that checks them.
// ABOUTME: Reports every violation at once and renders the same table as JSON Schema.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fmt;

/// Shape a single input value must have.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Boolean,
    Integer,
    Null,
    /// Exactly this string.
    Literal(&'static str),
    List(Box<FieldType>),
    /// Mapping from string keys to values of the inner type.
    Map(Box<FieldType>),
    /// Fixed-length list with one type per position.
    Tuple(Vec<FieldType>),
    AnyOf(Vec<FieldType>),
}

impl FieldType {
    pub fn list(item: FieldType) -> Self {
        FieldType::List(Box::new(item))
    }

    pub fn map(value: FieldType) -> Self {
        FieldType::Map(Box::new(value))
    }

    /// `self` or null.
    pub fn nullable(self) -> Self {
        match self {
            FieldType::AnyOf(mut variants) => {
                if !variants.contains(&FieldType::Null) {
                    variants.push(FieldType::Null);
                }
                FieldType::AnyOf(variants)
            }
            FieldType::Null => FieldType::Null,
            other => FieldType::AnyOf(vec![other, FieldType::Null]),
        }
    }

    fn matches(&self, value: &Value) -> bool {
        let mut sink = Vec::new();
        self.check(value, "", &mut sink);
        sink.is_empty()
    }

    fn check(&self, value: &Value, path: &str, violations: &mut Vec<Violation>) {
        let mismatch = |violations: &mut Vec<Violation>| {
            violations.push(Violation::new(
                path,
                format!("expected {}, got {}", self, describe_value(value)),
            ));
        };

        match self {
            FieldType::String => {
                if !value.is_string() {
                    mismatch(violations);
                }
            }
            FieldType::Boolean => {
                if !value.is_boolean() {
                    mismatch(violations);
                }
            }
            FieldType::Integer => {
                if !(value.is_i64() || value.is_u64()) {
                    mismatch(violations);
                }
            }
            FieldType::Null => {
                if !value.is_null() {
                    mismatch(violations);
                }
            }
            FieldType::Literal(expected) => {
                if value.as_str() != Some(expected) {
                    mismatch(violations);
                }
            }
            FieldType::List(item) => match value.as_array() {
                Some(items) => {
                    for (index, element) in items.iter().enumerate() {
                        item.check(element, &format!("{path}[{index}]"), violations);
                    }
                }
                None => mismatch(violations),
            },
            FieldType::Map(inner) => match value.as_object() {
                Some(entries) => {
                    for (key, element) in entries {
                        inner.check(element, &format!("{path}.{key}"), violations);
                    }
                }
                None => mismatch(violations),
            },
            FieldType::Tuple(positions) => match value.as_array() {
                Some(items) if items.len() == positions.len() => {
                    for (index, (ty, element)) in positions.iter().zip(items).enumerate() {
                        ty.check(element, &format!("{path}[{index}]"), violations);
                    }
                }
                _ => mismatch(violations),
            },
            FieldType::AnyOf(variants) => {
                if !variants.iter().any(|variant| variant.matches(value)) {
                    mismatch(violations);
                }
            }
        }
    }

    /// JSON Schema for this type.
    pub fn schema(&self) -> Value {
        match self {
            FieldType::String => json!({ "type": "string" }),
            FieldType::Boolean => json!({ "type": "boolean" }),
            FieldType::Integer => json!({ "type": "integer" }),
            FieldType::Null => json!({ "type": "null" }),
            FieldType::Literal(value) => json!({ "const": value, "enum": [value], "type": "string" }),
            FieldType::List(item) => json!({ "type": "array", "items": item.schema() }),
            FieldType::Map(inner) => json!({
                "type": "object",
                "additionalProperties": inner.schema(),
            }),
            FieldType::Tuple(positions) => json!({
                "type": "array",
                "prefixItems": positions.iter().map(FieldType::schema).collect::<Vec<_>>(),
                "minItems": positions.len(),
                "maxItems": positions.len(),
            }),
            FieldType::AnyOf(variants) => json!({
                "anyOf": variants.iter().map(FieldType::schema).collect::<Vec<_>>(),
            }),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => f.write_str("string"),
            FieldType::Boolean => f.write_str("boolean"),
            FieldType::Integer => f.write_str("integer"),
            FieldType::Null => f.write_str("null"),
            FieldType::Literal(value) => write!(f, "{value:?}"),
            FieldType::List(item) => write!(f, "list<{item}>"),
            FieldType::Map(inner) => write!(f, "mapping<string, {inner}>"),
            FieldType::Tuple(positions) => {
                f.write_str("[")?;
                for (index, ty) in positions.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str("]")
            }
            FieldType::AnyOf(variants) => {
                for (index, ty) in variants.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{ty}")?;
                }
                Ok(())
            }
        }
    }
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// One named input field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    /// `None` marks the field as required.
    pub default: Option<Value>,
    pub description: &'static str,
}

impl Field {
    pub fn required(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            default: None,
            description,
        }
    }

    pub fn optional(
        name: &'static str,
        ty: FieldType,
        default: Value,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            ty,
            default: Some(default),
            description,
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// The complete input contract of one tool.
#[derive(Debug, Clone)]
pub struct Contract {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub problem: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

/// All violations found in one set of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub contract: &'static str,
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "{} validation error{} for {}",
            count,
            if count == 1 { "" } else { "s" },
            self.contract
        )?;
        for violation in &self.violations {
            write!(f, "\n{}\n  {}", violation.field, violation.problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl Contract {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Check `args` and return them with defaults filled in.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
        let mut violations = Vec::new();

        for key in args.keys() {
            if self.field(key).is_none() {
                violations.push(Violation::new(key.as_str(), "unexpected field"));
            }
        }

        let mut validated = Map::new();
        for field in &self.fields {
            match (args.get(field.name), &field.default) {
                (Some(value), _) => {
                    field.ty.check(value, field.name, &mut violations);
                    validated.insert(field.name.to_string(), value.clone());
                }
                (None, Some(default)) => {
                    validated.insert(field.name.to_string(), default.clone());
                }
                (None, None) => {
                    violations.push(Violation::new(field.name, "field required"));
                }
            }
        }

        if violations.is_empty() {
            Ok(validated)
        } else {
            Err(ValidationError {
                contract: self.name,
                violations,
            })
        }
    }

    /// JSON Schema advertised in `tools/list`.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut schema = field.ty.schema();
            if let Value::Object(ref mut object) = schema {
                object.insert("title".into(), json!(title_case(field.name)));
                if !field.description.is_empty() {
                    object.insert("description".into(), json!(field.description));
                }
                if let Some(default) = &field.default {
                    object.insert("default".into(), default.clone());
                }
            }
            if field.is_required() {
                required.push(json!(field.name));
            }
            properties.insert(field.name.to_string(), schema);
        }

        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contract {
        Contract::new(
            "Sample",
            vec![
                Field::required("id", FieldType::String, "object id"),
                Field::optional("force", FieldType::Boolean, json!(false), ""),
                Field::optional(
                    "tail",
                    FieldType::AnyOf(vec![FieldType::Integer, FieldType::Literal("all")]),
                    json!(100),
                    "",
                ),
            ],
        )
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn defaults_fill_absent_fields() {
        let validated = sample().validate(&args(json!({ "id": "abc" }))).unwrap();
        assert_eq!(validated["force"], json!(false));
        assert_eq!(validated["tail"], json!(100));
    }

    #[test]
    fn every_violation_is_reported() {
        let err = sample()
            .validate(&args(json!({ "force": "yes", "tail": "some", "extra": 1 })))
            .unwrap_err();

        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["extra", "id", "force", "tail"]);
        assert!(err.to_string().starts_with("4 validation errors for Sample"));
    }

    #[test]
    fn mismatch_names_expected_type() {
        let err = sample()
            .validate(&args(json!({ "id": 7 })))
            .unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::new("id", "expected string, got integer")]
        );
    }

    #[test]
    fn floats_are_not_integers() {
        assert!(!FieldType::Integer.matches(&json!(1.5)));
        assert!(FieldType::Integer.matches(&json!(-3)));
    }

    #[test]
    fn nested_paths_point_at_the_element() {
        let ty = FieldType::map(FieldType::AnyOf(vec![
            FieldType::Integer,
            FieldType::list(FieldType::Integer),
            FieldType::Tuple(vec![FieldType::String, FieldType::Integer]),
            FieldType::Null,
        ]));
        let mut violations = Vec::new();
        ty.check(
            &json!({ "80/tcp": 8080, "53": ["a", 1, 2], "22": ["0.0.0.0", 2222] }),
            "ports",
            &mut violations,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "ports.53");
    }

    #[test]
    fn nullable_does_not_duplicate_null() {
        let ty = FieldType::String.nullable().nullable();
        assert_eq!(ty, FieldType::AnyOf(vec![FieldType::String, FieldType::Null]));
    }

    #[test]
    fn schema_lists_required_and_defaults() {
        let schema = sample().json_schema();
        assert_eq!(schema["required"], json!(["id"]));
        assert_eq!(schema["properties"]["force"]["default"], json!(false));
        assert_eq!(schema["properties"]["tail"]["anyOf"][1]["const"], json!("all"));
        assert_eq!(schema["additionalProperties"], json!(false));
    }
}
