//! Test assertions for message contexts.

use crate::context::MessageContext;
use crate::core::TransformResult;
use std::collections::HashMap;

/// Asserts that a property holds the expected value.
pub fn assert_property_eq(ctx: &MessageContext, key: &str, expected: &serde_json::Value) {
    let actual = ctx.get(key);
    assert_eq!(
        actual,
        Some(expected),
        "Expected value {:?} for property '{}', got {:?}",
        expected,
        key,
        actual
    );
}

/// Asserts that a property is absent.
pub fn assert_property_absent(ctx: &MessageContext, key: &str) {
    assert!(
        !ctx.contains_key(key),
        "Expected property '{}' to be absent, found {:?}",
        key,
        ctx.get(key)
    );
}

/// Asserts that a property holds a status record (in either wire form)
/// with the expected status text.
pub fn assert_status(ctx: &MessageContext, key: &str, expected_status: &str) {
    let parsed = ctx.get(key).and_then(TransformResult::from_wire);
    assert_eq!(
        parsed.as_ref().map(|r| r.status.as_str()),
        Some(expected_status),
        "Expected status '{}' in property '{}', got {:?}",
        expected_status,
        key,
        ctx.get(key)
    );
}

/// Asserts that `ctx` equals `before` except for `key`.
pub fn assert_only_property_changed(
    before: &HashMap<String, serde_json::Value>,
    ctx: &MessageContext,
    key: &str,
) {
    let mut after = ctx.to_dict();
    let mut before = before.clone();
    after.remove(key);
    before.remove(key);

    assert_eq!(
        after, before,
        "Expected only property '{}' to change",
        key
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StageHarness;
    use serde_json::json;

    #[test]
    fn test_assert_property_eq() {
        let ctx = MessageContext::new().with_property("a", json!(1));
        assert_property_eq(&ctx, "a", &json!(1));
    }

    #[test]
    #[should_panic(expected = "Expected value")]
    fn test_assert_property_eq_fails() {
        let ctx = MessageContext::new();
        assert_property_eq(&ctx, "a", &json!(1));
    }

    #[test]
    fn test_assert_property_absent() {
        assert_property_absent(&MessageContext::new(), "missing");
    }

    #[test]
    fn test_assert_status_after_run() {
        let run = StageHarness::order_status().run_with(&[
            ("orderId", json!("S-3")),
            ("other", json!({"keep": true})),
        ]);

        assert_status(&run.context, "responseBody", "Order got fulfilled for order id S-3");
        assert_only_property_changed(&run.before, &run.context, "responseBody");
    }

    #[test]
    #[should_panic(expected = "Expected only property")]
    fn test_assert_only_property_changed_fails() {
        let before = MessageContext::new().with_property("a", json!(1)).to_dict();
        let after = MessageContext::new().with_property("a", json!(2));
        assert_only_property_changed(&before, &after, "b");
    }
}
