//! End-to-end tests for stage invocation.

#[cfg(test)]
mod tests {
    use crate::config::{SerializationPolicy, StageConfig};
    use crate::context::{MessageContext, PropertyStore};
    use crate::core::TransformResult;
    use crate::observability::{CollectingStageLogger, NoOpStageLogger};
    use crate::pipeline::{FaultPolicy, StageInvoker};
    use crate::stages::{OrderStatusStage, TransformStage};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn order_stage() -> Arc<OrderStatusStage> {
        Arc::new(OrderStatusStage::new(Arc::new(NoOpStageLogger)))
    }

    #[test]
    fn test_end_to_end_order_42() {
        let mut params = HashMap::new();
        params.insert("inputProperty".to_string(), "orderId".to_string());
        params.insert("outputProperty".to_string(), "responseBody".to_string());
        params.insert("serialization".to_string(), "structured".to_string());
        let config = StageConfig::from_params(&params).unwrap();

        let invoker = StageInvoker::new(order_stage(), config).unwrap();
        let mut ctx = MessageContext::new().with_property("orderId", json!("ORD-42"));

        assert!(invoker.invoke(&mut ctx).is_completed());

        let mut expected = HashMap::new();
        expected.insert("orderId".to_string(), json!("ORD-42"));
        expected.insert(
            "responseBody".to_string(),
            json!({"status": "Order got fulfilled for order id ORD-42"}),
        );
        assert_eq!(ctx.to_dict(), expected);
    }

    #[test]
    fn test_both_policies_carry_same_result() {
        let stage = order_stage();
        let mut text_ctx = MessageContext::new().with_property("orderId", json!("Z"));
        let mut obj_ctx = text_ctx.clone();

        stage.execute(&mut text_ctx, &StageConfig::default()).unwrap();
        stage
            .execute(
                &mut obj_ctx,
                &StageConfig::new().with_serialization(SerializationPolicy::Structured),
            )
            .unwrap();

        let from_text = TransformResult::from_wire(&text_ctx.property("responseBody").unwrap());
        let from_obj = TransformResult::from_wire(&obj_ctx.property("responseBody").unwrap());
        assert_eq!(from_text, from_obj);
        assert_eq!(from_text, Some(TransformResult::order_fulfilled("Z")));
    }

    #[test]
    fn test_body_and_parameters_untouched() {
        let stage = order_stage();
        let mut ctx = MessageContext::new()
            .with_property("orderId", json!("B"))
            .with_body(br#"{"orderId":"B"}"#.to_vec())
            .with_parameter("generated_param", "demo");

        stage.execute(&mut ctx, &StageConfig::default()).unwrap();

        assert_eq!(ctx.body(), br#"{"orderId":"B"}"#);
        assert_eq!(ctx.parameter("generated_param"), Some("demo".to_string()));
    }

    #[test]
    fn test_shared_stage_across_threads() {
        let logger = Arc::new(CollectingStageLogger::new());
        let stage = OrderStatusStage::new(logger.clone());
        let config = StageConfig::new().with_serialization(SerializationPolicy::Structured);

        let results: Vec<MessageContext> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..128)
                .map(|i| {
                    let stage = &stage;
                    let config = &config;
                    scope.spawn(move || {
                        let mut ctx =
                            MessageContext::new().with_property("orderId", json!(format!("T-{i}")));
                        stage.execute(&mut ctx, config).map(|()| ctx)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        for (i, ctx) in results.iter().enumerate() {
            assert_eq!(
                ctx.get("responseBody"),
                Some(&json!({ "status": format!("Order got fulfilled for order id T-{i}") }))
            );
            assert_eq!(ctx.len(), 2);
        }
        assert_eq!(logger.len(), 128 * 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_dispatch_all_no_cross_contamination() {
        let config = StageConfig::new().with_serialization(SerializationPolicy::Structured);
        let invoker = Arc::new(StageInvoker::new(order_stage(), config).unwrap());

        let contexts: Vec<MessageContext> = (0..256)
            .map(|i| {
                MessageContext::new()
                    .with_property("orderId", json!(format!("ORD-{i}")))
                    .with_property("seq", json!(i))
            })
            .collect();
        let ids: Vec<_> = contexts.iter().map(|c| c.identity().message_id).collect();

        let results = invoker.dispatch_all(contexts).await.unwrap();

        assert_eq!(results.len(), 256);
        for (i, (ctx, disposition)) in results.iter().enumerate() {
            assert!(disposition.is_completed());
            assert_eq!(ctx.identity().message_id, ids[i]);
            assert_eq!(ctx.get("seq"), Some(&json!(i)));
            assert_eq!(
                ctx.get("responseBody"),
                Some(&json!({ "status": format!("Order got fulfilled for order id ORD-{i}") }))
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_dispatch_all_mixed_outcomes() {
        let invoker = Arc::new(
            StageInvoker::new(order_stage(), StageConfig::default())
                .unwrap()
                .with_fault_policy(FaultPolicy::ErrorProperty("fault".to_string())),
        );

        let contexts: Vec<MessageContext> = (0..100)
            .map(|i| {
                let value = if i % 2 == 0 { json!(format!("E-{i}")) } else { json!([i]) };
                MessageContext::new().with_property("orderId", value)
            })
            .collect();

        let results = invoker.dispatch_all(contexts).await.unwrap();

        for (i, (ctx, disposition)) in results.iter().enumerate() {
            if i % 2 == 0 {
                assert!(disposition.is_completed());
                assert_eq!(
                    ctx.get("responseBody"),
                    Some(&json!(format!(
                        r#"{{"status":"Order got fulfilled for order id E-{i}"}}"#
                    )))
                );
                assert!(!ctx.contains_key("fault"));
            } else {
                assert!(!disposition.is_completed());
                assert!(!ctx.contains_key("responseBody"));
                assert_eq!(ctx.get("fault").map(|f| f["found"].clone()), Some(json!("array")));
            }
        }
    }
}
