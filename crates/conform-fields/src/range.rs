//! # Range Operators
//!
//! Integer bound checking shared by every field whose value reduces to an
//! orderable scalar. The enclosing field extracts the integer; this module
//! only compares it.

use conform_core::{ConfigError, ValidationError};
use serde::{Deserialize, Serialize};

/// Pointer attached to every range violation.
const RANGE_POINTER: &str = "value";

/// Optional integer bounds. `gt`/`lt` are strict, `gte`/`lte` inclusive.
///
/// At most one lower operator (`gt` or `gte`) and one upper operator
/// (`lt` or `lte`) may be set. An empty interval such as `gt=10, lt=5` is
/// accepted and rejects every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gte: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lte: Option<i64>,
}

impl RangeBounds {
    /// Build bounds from all four operators at once.
    pub fn new(
        gt: Option<i64>,
        gte: Option<i64>,
        lt: Option<i64>,
        lte: Option<i64>,
    ) -> Result<Self, ConfigError> {
        Self { gt, gte, lt, lte }.validated()
    }

    /// Set the strict lower bound.
    pub fn gt(mut self, bound: i64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Set the inclusive lower bound.
    pub fn gte(mut self, bound: i64) -> Self {
        self.gte = Some(bound);
        self
    }

    /// Set the strict upper bound.
    pub fn lt(mut self, bound: i64) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Set the inclusive upper bound.
    pub fn lte(mut self, bound: i64) -> Self {
        self.lte = Some(bound);
        self
    }

    /// Check the operator combination, returning the bounds unchanged.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.gt.is_some() && self.gte.is_some() {
            return Err(ConfigError::ConflictingBounds { first: "gt", second: "gte" });
        }
        if self.lt.is_some() && self.lte.is_some() {
            return Err(ConfigError::ConflictingBounds { first: "lt", second: "lte" });
        }
        Ok(self)
    }

    /// True when no bound is configured.
    pub fn is_unbounded(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }

    /// One error per violated bound, checked in `gt`, `gte`, `lt`, `lte` order.
    pub fn errors(&self, value: i64) -> Vec<ValidationError> {
        let checks: [(Option<i64>, &str, fn(i64, i64) -> bool); 4] = [
            (self.gt, ">", |v, b| v > b),
            (self.gte, ">=", |v, b| v >= b),
            (self.lt, "<", |v, b| v < b),
            (self.lte, "<=", |v, b| v <= b),
        ];
        checks
            .into_iter()
            .filter_map(|(bound, op, holds)| {
                let bound = bound?;
                (!holds(value, bound)).then(|| {
                    ValidationError::invalid(format!("Value not {op} {bound}"))
                        .with_pointer(RANGE_POINTER)
                })
            })
            .collect()
    }

    /// Add the configured bounds to an introspection object.
    pub fn introspect_into(&self, map: &mut serde_json::Map<String, serde_json::Value>) {
        for (name, bound) in [("gt", self.gt), ("gte", self.gte), ("lt", self.lt), ("lte", self.lte)] {
            if let Some(bound) = bound {
                map.insert(name.into(), bound.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::ErrorCode;

    fn messages(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_unbounded_accepts_everything() {
        let bounds = RangeBounds::default();
        assert!(bounds.is_unbounded());
        assert!(bounds.errors(i64::MIN).is_empty());
        assert!(bounds.errors(i64::MAX).is_empty());
    }

    #[test]
    fn test_gt_is_strict() {
        let bounds = RangeBounds::default().gt(100);
        assert!(bounds.errors(101).is_empty());
        let errors = bounds.errors(100);
        assert_eq!(messages(&errors), ["Value not > 100"]);
        assert_eq!(errors[0].code, ErrorCode::Invalid);
        assert_eq!(errors[0].pointer.as_deref(), Some("value"));
    }

    #[test]
    fn test_gte_is_inclusive() {
        let bounds = RangeBounds::default().gte(100);
        assert!(bounds.errors(100).is_empty());
        assert_eq!(messages(&bounds.errors(99)), ["Value not >= 100"]);
    }

    #[test]
    fn test_lt_is_strict() {
        let bounds = RangeBounds::default().lt(100);
        assert!(bounds.errors(99).is_empty());
        assert_eq!(messages(&bounds.errors(100)), ["Value not < 100"]);
    }

    #[test]
    fn test_lte_is_inclusive() {
        let bounds = RangeBounds::default().lte(99);
        assert!(bounds.errors(99).is_empty());
        assert_eq!(messages(&bounds.errors(100)), ["Value not <= 99"]);
    }

    #[test]
    fn test_gt_and_lte_window() {
        let bounds = RangeBounds::new(Some(99), None, None, Some(100)).unwrap();
        assert!(bounds.errors(100).is_empty());
        assert_eq!(messages(&bounds.errors(99)), ["Value not > 99"]);
        assert_eq!(messages(&bounds.errors(101)), ["Value not <= 100"]);
    }

    #[test]
    fn test_empty_interval_reports_both_bounds() {
        let bounds = RangeBounds::default().gt(10).lt(5);
        assert_eq!(
            messages(&bounds.errors(7)),
            ["Value not > 10", "Value not < 5"]
        );
    }

    #[test]
    fn test_conflicting_lower_bounds_rejected() {
        assert_eq!(
            RangeBounds::new(Some(1), Some(2), None, None),
            Err(ConfigError::ConflictingBounds { first: "gt", second: "gte" })
        );
    }

    #[test]
    fn test_conflicting_upper_bounds_rejected() {
        assert_eq!(
            RangeBounds::default().lt(1).lte(2).validated(),
            Err(ConfigError::ConflictingBounds { first: "lt", second: "lte" })
        );
    }

    #[test]
    fn test_deserialize_rejects_non_integer_bound() {
        assert!(serde_json::from_value::<RangeBounds>(serde_json::json!({"gt": "not an int"})).is_err());
        assert!(serde_json::from_value::<RangeBounds>(serde_json::json!({"lte": 1.5})).is_err());
        let ok: RangeBounds = serde_json::from_value(serde_json::json!({"gte": 3})).unwrap();
        assert_eq!(ok, RangeBounds::default().gte(3));
    }

    #[test]
    fn test_introspect_into_omits_unset() {
        let mut map = serde_json::Map::new();
        RangeBounds::default().gt(1).lte(9).introspect_into(&mut map);
        assert_eq!(serde_json::Value::Object(map), serde_json::json!({"gt": 1, "lte": 9}));
    }
}
