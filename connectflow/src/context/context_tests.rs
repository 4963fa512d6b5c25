//! Cross-type tests for the context module.

#[cfg(test)]
mod tests {
    use crate::context::{MessageContext, MessageIdentity, PropertyStore};
    use crate::errors::ContextError;
    use serde_json::json;
    use uuid::Uuid;

    fn write_through(store: &mut dyn PropertyStore, key: &str, value: serde_json::Value) -> Result<(), ContextError> {
        store.set_property(key, value)
    }

    #[test]
    fn test_message_context_as_trait_object() {
        let mut ctx = MessageContext::new();
        write_through(&mut ctx, "k", json!("v")).unwrap();
        assert_eq!(ctx.get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_identity_is_kept() {
        let id = Uuid::new_v4();
        let ctx = MessageContext::new().with_identity(MessageIdentity::with_message_id(id));
        assert_eq!(ctx.identity().message_id, id);
    }

    #[test]
    fn test_distinct_contexts_get_distinct_ids() {
        let a = MessageContext::new();
        let b = MessageContext::new();
        assert_ne!(a.identity().message_id, b.identity().message_id);
    }

    #[test]
    fn test_finalize_blocks_trait_writes() {
        let mut ctx = MessageContext::new();
        ctx.finalize();
        assert_eq!(
            write_through(&mut ctx, "k", json!(1)),
            Err(ContextError::Finalized)
        );
    }

    #[test]
    fn test_null_property_is_present() {
        let ctx = MessageContext::new().with_property("orderId", serde_json::Value::Null);
        assert_eq!(ctx.property("orderId"), Some(serde_json::Value::Null));
    }

    #[test]
    fn test_mock_store_records_writes() {
        let mut store = crate::context::MockPropertyStore::new();
        store
            .expect_set_property()
            .withf(|key, value| key == "out" && value == &json!(true))
            .times(1)
            .returning(|_, _| Ok(()));

        write_through(&mut store, "out", json!(true)).unwrap();
    }
}
