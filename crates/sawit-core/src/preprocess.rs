//! Argument preprocessing.
//!
//! Some chaincode functions take a positional argument that must arrive as a
//! string-encoded JSON value rather than a native one. Rather than branching
//! on function names at the call sites, the rewrites live in an explicit rule
//! table keyed by function name; `AddFarmer` is currently the only entry (its
//! `farmsInput` parameter at position 6 is a string-encoded array of farm ids).

use crate::error::{GatewayError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Rewrites one positional argument before dispatch.
type ArgTransform = fn(&Value) -> Result<Value>;

/// A single registered rewrite: which position, and how.
#[derive(Clone, Copy)]
pub struct ArgumentRule {
    pub index: usize,
    transform: ArgTransform,
}

/// Name-keyed table of per-function argument rewrites.
pub struct ArgumentPreprocessor {
    rules: HashMap<&'static str, ArgumentRule>,
}

impl Default for ArgumentPreprocessor {
    fn default() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            "AddFarmer",
            ArgumentRule {
                index: 6,
                transform: stringify,
            },
        );
        Self { rules }
    }
}

impl ArgumentPreprocessor {
    /// Apply the registered rewrite for `function`, if any.
    ///
    /// A rule only fires when the argument sequence extends past its index;
    /// every other function and shape passes through unchanged. A failed
    /// transform rejects the whole request before any network I/O.
    pub fn apply(&self, function: &str, mut args: Vec<Value>) -> Result<Vec<Value>> {
        if let Some(rule) = self.rules.get(function) {
            if args.len() > rule.index {
                let rewritten = (rule.transform)(&args[rule.index]).map_err(|e| {
                    GatewayError::Json {
                        message: format!(
                            "failed to encode argument {} of {}: {}",
                            rule.index, function, e
                        ),
                        source: None,
                    }
                })?;
                args[rule.index] = rewritten;
            }
        }
        Ok(args)
    }

    /// Whether a rewrite is registered for `function`.
    pub fn has_rule(&self, function: &str) -> bool {
        self.rules.contains_key(function)
    }
}

fn stringify(value: &Value) -> Result<Value> {
    Ok(Value::String(serde_json::to_string(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seven_args(last: Value) -> Vec<Value> {
        let mut args: Vec<Value> = (0..6).map(|i| json!(format!("arg{}", i))).collect();
        args.push(last);
        args
    }

    #[test]
    fn test_add_farmer_seventh_argument_is_stringified() {
        let pre = ArgumentPreprocessor::default();
        let out = pre
            .apply("AddFarmer", seven_args(json!({"a": 1})))
            .unwrap();
        assert_eq!(out[6], json!("{\"a\":1}"));
        // Earlier positions are untouched
        assert_eq!(out[0], json!("arg0"));
    }

    #[test]
    fn test_array_argument_is_stringified() {
        let pre = ArgumentPreprocessor::default();
        let out = pre
            .apply("AddFarmer", seven_args(json!(["F001", "F002"])))
            .unwrap();
        assert_eq!(out[6], json!("[\"F001\",\"F002\"]"));
    }

    #[test]
    fn test_string_argument_is_quoted() {
        // Matches JSON.stringify semantics: an already-string value gets
        // serialized again, quotes included.
        let pre = ArgumentPreprocessor::default();
        let out = pre.apply("AddFarmer", seven_args(json!("plain"))).unwrap();
        assert_eq!(out[6], json!("\"plain\""));
    }

    #[test]
    fn test_six_or_fewer_arguments_pass_through() {
        let pre = ArgumentPreprocessor::default();
        let args: Vec<Value> = (0..6).map(|i| json!(i)).collect();
        let out = pre.apply("AddFarmer", args.clone()).unwrap();
        assert_eq!(out, args);
    }

    #[test]
    fn test_other_functions_pass_through() {
        let pre = ArgumentPreprocessor::default();
        let args = seven_args(json!({"a": 1}));
        let out = pre.apply("QueryFarmProfile", args.clone()).unwrap();
        assert_eq!(out, args);
    }

    #[test]
    fn test_empty_arguments_pass_through() {
        let pre = ArgumentPreprocessor::default();
        assert_eq!(pre.apply("AddFarmer", vec![]).unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn test_rule_lookup() {
        let pre = ArgumentPreprocessor::default();
        assert!(pre.has_rule("AddFarmer"));
        assert!(!pre.has_rule("QueryAllFarmers"));
    }
}
