//! Recursive conversion of runtime values

use crate::value::{ObjectRef, Value};

use super::{IdentityTracker, JsonValue, Sighting, CLASS_NAME_KEY};

/// Convert the arguments of one logging call
///
/// Uses a fresh tracker, so reference tokens restart at `[1]` for every call.
pub fn convert_args(args: &[Value]) -> JsonValue {
    let mut tracker = IdentityTracker::new();
    JsonValue::Sequence(args.iter().map(|arg| convert(arg, &mut tracker)).collect())
}

/// Convert one value, sharing `tracker` with the rest of the call
pub fn convert(value: &Value, tracker: &mut IdentityTracker) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::Int(*i),
        Value::UInt(u) => JsonValue::UInt(*u),
        Value::Float(f) => JsonValue::Float(*f),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Sequence(items) => {
            JsonValue::Sequence(items.iter().map(|item| convert(item, tracker)).collect())
        }
        Value::Mapping(entries) => JsonValue::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), convert(item, tracker)))
                .collect(),
        ),
        Value::Object(object) => convert_object(object, tracker),
        Value::Handle(handle) => JsonValue::Handle(handle.clone()),
        Value::Opaque(text) => JsonValue::Opaque(text.clone()),
    }
}

fn convert_object(object: &ObjectRef, tracker: &mut IdentityTracker) -> JsonValue {
    // Must register before visiting fields: that is what breaks cycles.
    if let Sighting::Repeat(token) = tracker.track(object) {
        return JsonValue::RefToken(token);
    }

    let fields = object.fields();
    let mut entries = Vec::with_capacity(fields.len() + 1);
    entries.push((
        CLASS_NAME_KEY.to_string(),
        JsonValue::String(object.type_name().to_string()),
    ));
    for field in &fields {
        entries.push((field.label(), convert(&field.value, tracker)));
    }
    JsonValue::Mapping(entries)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use super::*;
    use crate::value::{Field, Inspect};

    /// Three fields, one per visibility
    struct TestClass {
        a: RwLock<Value>,
    }

    impl TestClass {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                a: RwLock::new(Value::Int(1)),
            })
        }

        fn set_a(&self, value: Value) {
            *self.a.write().unwrap() = value;
        }
    }

    impl Inspect for TestClass {
        fn type_name(&self) -> &str {
            "TestClass"
        }

        fn fields(&self) -> Vec<Field> {
            vec![
                Field::public("a", self.a.read().unwrap().clone()),
                Field::protected("b", 2),
                Field::private("c", 3),
            ]
        }
    }

    fn token(n: usize) -> JsonValue {
        JsonValue::RefToken(format!("object (TestClass) [{}]", n))
    }

    #[test]
    fn test_scalars_and_containers() {
        let args = vec![
            Value::from("text"),
            Value::from(vec![1, 2, 3]),
            Value::mapping([("a", 1), ("b", 2)]),
            Value::Sequence(Vec::new()),
            Value::Mapping(Vec::new()),
        ];

        let converted = convert_args(&args);
        assert_eq!(
            converted,
            JsonValue::Sequence(vec![
                JsonValue::String("text".to_string()),
                JsonValue::Sequence(vec![JsonValue::Int(1), JsonValue::Int(2), JsonValue::Int(3)]),
                JsonValue::Mapping(vec![
                    ("a".to_string(), JsonValue::Int(1)),
                    ("b".to_string(), JsonValue::Int(2)),
                ]),
                JsonValue::Sequence(Vec::new()),
                JsonValue::Mapping(Vec::new()),
            ])
        );
    }

    #[test]
    fn test_object_expansion() {
        let object = TestClass::new();
        let converted = convert_args(&[Value::from(object)]);

        assert_eq!(
            converted,
            JsonValue::Sequence(vec![JsonValue::Mapping(vec![
                ("___class_name".to_string(), JsonValue::String("TestClass".to_string())),
                ("public a".to_string(), JsonValue::Int(1)),
                ("protected b".to_string(), JsonValue::Int(2)),
                ("private c".to_string(), JsonValue::Int(3)),
            ])])
        );
    }

    #[test]
    fn test_self_reference_terminates() {
        let object = TestClass::new();
        object.set_a(Value::from(object.clone()));

        let converted = convert_args(&[Value::from(object.clone())]);
        let expanded = converted.index(0).unwrap();
        assert_eq!(expanded.get("public a"), Some(&token(1)));

        // Break the cycle so the test does not leak.
        object.set_a(Value::Null);
    }

    #[test]
    fn test_repeat_within_call() {
        let x = TestClass::new();
        let converted = convert_args(&[Value::from(x.clone()), Value::from(x)]);

        assert!(matches!(converted.index(0), Some(JsonValue::Mapping(_))));
        assert_eq!(converted.index(1), Some(&token(1)));
    }

    #[test]
    fn test_independent_calls() {
        let x = TestClass::new();
        let first = convert_args(&[Value::from(x.clone()), Value::from(x.clone())]);
        let second = convert_args(&[Value::from(x)]);

        assert_eq!(first.index(1), Some(&token(1)));
        assert_eq!(second.index(0), first.index(0));
    }

    #[test]
    fn test_tokens_follow_first_sighting() {
        let x = TestClass::new();
        let y = TestClass::new();
        let args = vec![
            Value::from(x.clone()),
            Value::from(y.clone()),
            Value::from(x),
            Value::from(y),
        ];

        let converted = convert_args(&args);
        assert_eq!(converted.index(2), Some(&token(1)));
        assert_eq!(converted.index(3), Some(&token(2)));
    }

    #[test]
    fn test_nested_object_already_seen() {
        let x = TestClass::new();
        let y = TestClass::new();
        y.set_a(Value::from(x.clone()));
        x.set_a(Value::sequence([
            Value::from(x.clone()),
            Value::from(x.clone()),
            Value::from(y.clone()),
            Value::from(y.clone()),
        ]));

        let converted = convert_args(&[Value::from(x.clone())]);
        let a = converted.index(0).and_then(|x| x.get("public a")).unwrap();

        assert_eq!(a.index(0), Some(&token(1)));
        assert_eq!(a.index(1), Some(&token(1)));
        // y is expanded once, and its back-reference to x collapses.
        let y_expanded = a.index(2).unwrap();
        assert_eq!(y_expanded.get("public a"), Some(&token(1)));
        assert_eq!(a.index(3), Some(&token(2)));

        x.set_a(Value::Null);
        y.set_a(Value::Null);
    }

    #[test]
    fn test_leaf_values_kept_for_normalizer() {
        let converted = convert_args(&[
            Value::Float(f64::INFINITY),
            Value::Handle(crate::value::Handle::new(3, "stream")),
            Value::Opaque("dump".to_string()),
        ]);

        assert!(matches!(converted.index(0), Some(JsonValue::Float(f)) if f.is_infinite()));
        assert!(matches!(converted.index(1), Some(JsonValue::Handle(_))));
        assert_eq!(converted.index(2), Some(&JsonValue::Opaque("dump".to_string())));
    }
}
