pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_to_status_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(
            serde_json::to_value(&h).unwrap(),
            serde_json::json!({"status": "ok"})
        );
    }
}
