// ABOUTME: Property tests over every tool's input contract.
// ABOUTME: Valid input passes, defaults are idempotent, and stray fields are named.

use docker_mcp::tools::{FieldType, Operation};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// A value that satisfies `ty`, chosen by `seed` where there is a choice.
fn sample(ty: &FieldType, seed: u8) -> Value {
    match ty {
        FieldType::String => json!(format!("value-{seed}")),
        FieldType::Boolean => json!(seed % 2 == 0),
        FieldType::Integer => json!(1 + u64::from(seed)),
        FieldType::Null => Value::Null,
        FieldType::Literal(text) => json!(text),
        FieldType::List(item) => json!([sample(item, seed)]),
        FieldType::Map(value) => {
            let mut map = Map::new();
            map.insert(format!("key{seed}"), sample(value, seed));
            Value::Object(map)
        }
        FieldType::Tuple(items) => Value::Array(items.iter().map(|t| sample(t, seed)).collect()),
        FieldType::AnyOf(variants) => sample(&variants[usize::from(seed) % variants.len()], seed),
    }
}

fn operation() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Required fields only.
fn minimal_args(op: Operation, seed: u8) -> Map<String, Value> {
    op.contract()
        .fields
        .iter()
        .filter(|field| field.is_required())
        .map(|field| (field.name.to_string(), sample(&field.ty, seed)))
        .collect()
}

proptest! {
    #[test]
    fn prop_well_typed_arguments_validate(op in operation(), seed in any::<u8>(), include in any::<u64>()) {
        let contract = op.contract();
        let mut args = minimal_args(op, seed);
        for (index, field) in contract.fields.iter().enumerate() {
            if !field.is_required() && include & (1 << (index % 64)) != 0 {
                args.insert(field.name.to_string(), sample(&field.ty, seed));
            }
        }
        prop_assert!(contract.validate(&args).is_ok(), "{} rejected {:?}", op, args);
    }

    #[test]
    fn prop_omitted_defaults_equal_explicit_defaults(op in operation(), seed in any::<u8>()) {
        let contract = op.contract();
        let minimal = minimal_args(op, seed);

        let mut explicit = minimal.clone();
        for field in &contract.fields {
            if let Some(default) = &field.default {
                explicit.insert(field.name.to_string(), default.clone());
            }
        }

        prop_assert_eq!(contract.validate(&minimal).unwrap(), contract.validate(&explicit).unwrap());
    }

    #[test]
    fn prop_unknown_fields_are_named(op in operation(), seed in any::<u8>(), extra in "[a-z]{3,10}_x") {
        let contract = op.contract();
        prop_assume!(contract.field(&extra).is_none());

        let mut args = minimal_args(op, seed);
        args.insert(extra.clone(), json!(true));

        let err = contract.validate(&args).unwrap_err();
        prop_assert!(err.violations.iter().any(|v| v.field == extra));
        prop_assert!(err.to_string().contains(&extra));
    }
}

#[test]
fn schemas_forbid_additional_properties() {
    for op in Operation::ALL {
        let schema = op.contract().json_schema();
        assert_eq!(schema["additionalProperties"], json!(false), "{op}");
    }
}

#[test]
fn missing_required_fields_are_all_reported() {
    let err = Operation::BuildImage
        .contract()
        .validate(&Map::new())
        .unwrap_err();
    let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, vec!["path", "tag"]);
    assert!(err.to_string().starts_with("2 validation errors for BuildImage"));
}
