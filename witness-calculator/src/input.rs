//! Typed view of a circuit input file.
//!
//! The on-disk shape is a JSON object mapping signal names to values, where a
//! value is an integer (a JSON number or a decimal/hex string) or an
//! arbitrarily nested array of integers. Scalars are kept as arbitrary
//! precision [`BigInt`]s; field reduction is the calculator's business, not
//! ours, so negative values pass through untouched.

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// A single signal assignment: a scalar or a nested array of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalValue {
    Scalar(BigInt),
    Array(Vec<SignalValue>),
}

impl SignalValue {
    pub fn scalar(value: impl Into<BigInt>) -> Self {
        SignalValue::Scalar(value.into())
    }

    pub fn array(items: impl IntoIterator<Item = SignalValue>) -> Self {
        SignalValue::Array(items.into_iter().collect())
    }

    /// Appends the scalars of this value to `out` in depth-first order, the
    /// flat shape calculators consume vector signals in.
    pub fn flatten_into(&self, out: &mut Vec<BigInt>) {
        match self {
            SignalValue::Scalar(n) => out.push(n.clone()),
            SignalValue::Array(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    pub fn flatten(&self) -> Vec<BigInt> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

/// The full input assignment: signal name to value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputAssignment(BTreeMap<String, SignalValue>);

impl InputAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document. The top level must be an object; anything else
    /// is rejected by the map deserializer.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: SignalValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&SignalValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignalValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, SignalValue)> for InputAssignment {
    fn from_iter<I: IntoIterator<Item = (String, SignalValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses a decimal or `0x`-prefixed hex integer, optionally negated.
fn parse_scalar_str(s: &str) -> Result<BigInt, String> {
    let trimmed = s.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    // parse_bytes would accept a second sign of its own; keep the grammar to
    // one optional leading minus.
    if digits.starts_with(['+', '-']) {
        return Err(format!("`{s}` is not a decimal or 0x-prefixed integer"));
    }
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        BigInt::parse_bytes(hex.as_bytes(), 16)
    } else {
        BigInt::parse_bytes(digits.as_bytes(), 10)
    };
    match magnitude {
        Some(n) => Ok(if negative { -n } else { n }),
        None => Err(format!("`{s}` is not a decimal or 0x-prefixed integer")),
    }
}

impl Serialize for SignalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Decimal strings survive any JSON reader regardless of its
            // number precision, which is how circom input files are written.
            SignalValue::Scalar(n) => serializer.serialize_str(&n.to_string()),
            SignalValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for SignalValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SignalValueVisitor)
    }
}

struct SignalValueVisitor;

impl<'de> Visitor<'de> for SignalValueVisitor {
    type Value = SignalValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer, an integer string, or an array of these")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SignalValue::Scalar(BigInt::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SignalValue::Scalar(BigInt::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // serde_json falls back to f64 for fractional literals and for
        // integers beyond 64 bits, where precision is already lost. Large
        // values must therefore arrive as strings.
        Err(E::custom(format!(
            "signal value {v} is not an exact integer; \
             write values above 64 bits as decimal strings"
        )))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        parse_scalar_str(s)
            .map(SignalValue::Scalar)
            .map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<SignalValue>()? {
            items.push(item);
        }
        Ok(SignalValue::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(n: i64) -> SignalValue {
        SignalValue::scalar(n)
    }

    #[test]
    fn parses_numbers_strings_and_arrays() {
        let inputs = InputAssignment::from_json_str(
            r#"{"a": 5, "b": "12", "c": [1, "2", [3, 4]], "d": -7}"#,
        )
        .unwrap();

        assert_eq!(inputs.len(), 4);
        assert_eq!(inputs.get("a"), Some(&scalar(5)));
        assert_eq!(inputs.get("b"), Some(&scalar(12)));
        assert_eq!(
            inputs.get("c"),
            Some(&SignalValue::array([
                scalar(1),
                scalar(2),
                SignalValue::array([scalar(3), scalar(4)]),
            ]))
        );
        assert_eq!(inputs.get("d"), Some(&scalar(-7)));
    }

    #[test]
    fn parses_large_decimal_and_hex_strings() {
        // A bn254-sized value, well past u64.
        let big = "21888242871839275222246405745257275088548364400416034343698204186575808495616";
        let inputs = InputAssignment::from_json_str(&format!(
            r#"{{"p": "{big}", "h": "0xdeadBEEF", "n": "-0x10"}}"#
        ))
        .unwrap();

        assert_eq!(
            inputs.get("p"),
            Some(&SignalValue::Scalar(big.parse::<BigInt>().unwrap()))
        );
        assert_eq!(inputs.get("h"), Some(&scalar(0xdead_beef)));
        assert_eq!(inputs.get("n"), Some(&scalar(-16)));
    }

    #[test]
    fn rejects_fractional_numbers() {
        let err = InputAssignment::from_json_str(r#"{"a": 1.5}"#).unwrap_err();
        assert!(err.to_string().contains("not an exact integer"), "{err}");
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(InputAssignment::from_json_str(r#"{"a": "12z"}"#).is_err());
        assert!(InputAssignment::from_json_str(r#"{"a": ""}"#).is_err());
        assert!(InputAssignment::from_json_str(r#"{"a": "0x"}"#).is_err());
    }

    #[test]
    fn rejects_non_object_top_level() {
        assert!(InputAssignment::from_json_str("[1, 2, 3]").is_err());
        assert!(InputAssignment::from_json_str("42").is_err());
        assert!(InputAssignment::from_json_str("{not json").is_err());
    }

    #[test]
    fn rejects_null_and_bool_values() {
        assert!(InputAssignment::from_json_str(r#"{"a": null}"#).is_err());
        assert!(InputAssignment::from_json_str(r#"{"a": true}"#).is_err());
        assert!(InputAssignment::from_json_str(r#"{"a": {"b": 1}}"#).is_err());
    }

    #[test]
    fn flatten_walks_depth_first() {
        let value = SignalValue::array([
            scalar(1),
            SignalValue::array([scalar(2), scalar(3)]),
            scalar(4),
        ]);
        let flat: Vec<i64> = value
            .flatten()
            .into_iter()
            .map(|n| i64::try_from(n).unwrap())
            .collect();
        assert_eq!(flat, vec![1, 2, 3, 4]);
    }

    #[test]
    fn serializes_scalars_as_decimal_strings() {
        let mut inputs = InputAssignment::new();
        inputs.insert("in", SignalValue::array([scalar(255), scalar(-1)]));
        let json = serde_json::to_string(&inputs).unwrap();
        assert_eq!(json, r#"{"in":["255","-1"]}"#);

        // What we write, we can read back.
        assert_eq!(InputAssignment::from_json_str(&json).unwrap(), inputs);
    }
}
