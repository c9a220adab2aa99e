//! Request model: one operation per request body, decoded by key presence

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::math::MAX_FIBONACCI_TERMS;

/// Recognised body fields, in dispatch priority order
pub const OPERATION_FIELDS: [&str; 5] = ["fibonacci", "prime", "lcm", "hcf", "AI"];

/// A decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// First `n` Fibonacci terms, `1 <= n <= MAX_FIBONACCI_TERMS`
    Fibonacci(usize),
    /// Keep the primes of the list
    Prime(Vec<i64>),
    /// Least common multiple of a non-empty list
    Lcm(Vec<i64>),
    /// Highest common factor of a non-empty list
    Hcf(Vec<i64>),
    /// Free-text question for the AI provider
    Ai(String),
}

/// Result payload placed in the envelope's `data` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Sequence(Vec<u64>),
    Integers(Vec<i64>),
    Number(u64),
    Text(String),
}

impl Operation {
    /// Decode a JSON body.
    ///
    /// The first present (non-null) field in [`OPERATION_FIELDS`] order wins; any
    /// other recognised fields are ignored. No recognised field, or a body that is
    /// not an object, is [`Error::InvalidKey`].
    pub fn from_body(body: &Value) -> Result<Self> {
        let fields = body.as_object().ok_or(Error::InvalidKey)?;

        let mut present = OPERATION_FIELDS
            .iter()
            .filter_map(|&key| field(fields, key).map(|value| (key, value)));

        let (key, value) = present.next().ok_or(Error::InvalidKey)?;

        let ignored: Vec<&str> = present.map(|(k, _)| k).collect();
        if !ignored.is_empty() {
            tracing::debug!(selected = key, ?ignored, "Multiple operation fields present");
        }

        match key {
            "fibonacci" => parse_fibonacci(value),
            "prime" => Ok(Operation::Prime(parse_integer_list(key, value)?)),
            "lcm" => Ok(Operation::Lcm(parse_non_empty_list(key, value)?)),
            "hcf" => Ok(Operation::Hcf(parse_non_empty_list(key, value)?)),
            _ => parse_question(value),
        }
    }

    /// Field name this operation was decoded from
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Fibonacci(_) => "fibonacci",
            Operation::Prime(_) => "prime",
            Operation::Lcm(_) => "lcm",
            Operation::Hcf(_) => "hcf",
            Operation::Ai(_) => "AI",
        }
    }
}

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// JSON integers, integral floats and strings holding an integer
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_fibonacci(value: &Value) -> Result<Operation> {
    let n = parse_integer(value)
        .ok_or_else(|| Error::invalid_input("fibonacci must be an integer"))?;
    if n < 1 {
        return Err(Error::invalid_input("fibonacci must be a positive integer"));
    }
    let n = usize::try_from(n)
        .ok()
        .filter(|&n| n <= MAX_FIBONACCI_TERMS)
        .ok_or_else(|| {
            Error::invalid_input(format!(
                "fibonacci must not exceed {}",
                MAX_FIBONACCI_TERMS
            ))
        })?;
    Ok(Operation::Fibonacci(n))
}

fn parse_integer_list(key: &str, value: &Value) -> Result<Vec<i64>> {
    let items = value
        .as_array()
        .ok_or_else(|| Error::invalid_input(format!("{} must be an array", key)))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            parse_integer(item).ok_or_else(|| {
                Error::invalid_input(format!("{}[{}] is not an integer: {}", key, i, item))
            })
        })
        .collect()
}

fn parse_non_empty_list(key: &str, value: &Value) -> Result<Vec<i64>> {
    let items = parse_integer_list(key, value)?;
    if items.is_empty() {
        return Err(Error::invalid_input(format!("{} must not be empty", key)));
    }
    Ok(items)
}

fn parse_question(value: &Value) -> Result<Operation> {
    let question = match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    if question.is_empty() {
        return Err(Error::invalid_input("AI question must not be empty"));
    }
    Ok(Operation::Ai(question))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_field_decodes() {
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": 7})).unwrap(),
            Operation::Fibonacci(7)
        );
        assert_eq!(
            Operation::from_body(&json!({"prime": [2, 4, 7]})).unwrap(),
            Operation::Prime(vec![2, 4, 7])
        );
        assert_eq!(
            Operation::from_body(&json!({"lcm": [4, 6]})).unwrap(),
            Operation::Lcm(vec![4, 6])
        );
        assert_eq!(
            Operation::from_body(&json!({"hcf": [12, 18]})).unwrap(),
            Operation::Hcf(vec![12, 18])
        );
        assert_eq!(
            Operation::from_body(&json!({"AI": " Capital of France? "})).unwrap(),
            Operation::Ai("Capital of France?".into())
        );
    }

    #[test]
    fn test_priority_order() {
        let body = json!({"AI": "hi", "hcf": [2], "prime": [3], "fibonacci": 2});
        assert_eq!(Operation::from_body(&body).unwrap(), Operation::Fibonacci(2));

        let body = json!({"AI": "hi", "hcf": [2], "lcm": [3]});
        assert_eq!(Operation::from_body(&body).unwrap(), Operation::Lcm(vec![3]));
    }

    #[test]
    fn test_null_field_counts_as_absent() {
        let body = json!({"fibonacci": null, "prime": [5]});
        assert_eq!(Operation::from_body(&body).unwrap(), Operation::Prime(vec![5]));
    }

    #[test]
    fn test_unrecognised_body_is_invalid_key() {
        for body in [json!({}), json!({"ai": "lowercase"}), json!([1, 2]), json!("text")] {
            let err = Operation::from_body(&body).unwrap_err();
            assert!(matches!(err, Error::InvalidKey), "body {}", body);
        }
    }

    #[test]
    fn test_fibonacci_coercion() {
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": "5"})).unwrap(),
            Operation::Fibonacci(5)
        );
        assert_eq!(
            Operation::from_body(&json!({"fibonacci": 3.0})).unwrap(),
            Operation::Fibonacci(3)
        );
        for bad in [json!("abc"), json!(0), json!(-3), json!(2.5), json!(true), json!(95)] {
            let err = Operation::from_body(&json!({ "fibonacci": bad.clone() })).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "value {}", bad);
        }
    }

    #[test]
    fn test_list_validation() {
        let err = Operation::from_body(&json!({"prime": 7})).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Operation::from_body(&json!({"prime": [2, "x"]})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: prime[1] is not an integer: \"x\"");

        assert_eq!(
            Operation::from_body(&json!({"prime": []})).unwrap(),
            Operation::Prime(vec![])
        );
        assert_eq!(
            Operation::from_body(&json!({"prime": ["11", 4]})).unwrap(),
            Operation::Prime(vec![11, 4])
        );

        for key in ["lcm", "hcf"] {
            let err = Operation::from_body(&json!({ key: [] })).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "key {}", key);
        }
    }

    #[test]
    fn test_question_coercion() {
        assert_eq!(
            Operation::from_body(&json!({"AI": 42})).unwrap(),
            Operation::Ai("42".into())
        );
        let err = Operation::from_body(&json!({"AI": "   "})).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_output_serialises_untagged() {
        assert_eq!(serde_json::to_value(Output::Number(12)).unwrap(), json!(12));
        assert_eq!(
            serde_json::to_value(Output::Sequence(vec![0, 1, 1])).unwrap(),
            json!([0, 1, 1])
        );
        assert_eq!(serde_json::to_value(Output::Text("Paris".into())).unwrap(), json!("Paris"));
    }
}
