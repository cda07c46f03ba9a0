use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Resource;

/// Generic snapshot of a remote domain object (customer, subscription, ...)
///
/// Fields are kept as raw JSON so any object kind can be polled without a
/// dedicated type. Status is detected structurally: only objects carrying a
/// string `status` field have one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiObject {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApiObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Object kind, e.g. `customer`
    pub fn object(&self) -> Option<&str> {
        self.get_str("object")
    }

    /// Id of the test clock this object is attached to
    pub fn test_clock(&self) -> Option<&str> {
        self.get_str("test_clock")
    }
}

impl Resource for ApiObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        self.get_str("status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_detected_structurally() {
        let subscription = ApiObject::new("sub_1").with_field("status", "active");
        let customer = ApiObject::new("cus_1").with_field("balance", 0);

        assert_eq!(subscription.status(), Some("active"));
        assert_eq!(customer.status(), None);
    }

    #[test]
    fn test_non_string_status_is_not_a_status() {
        let odd = ApiObject::new("x_1").with_field("status", 3);
        assert_eq!(odd.status(), None);
    }

    #[test]
    fn test_deserialize_flattens_fields() {
        let object: ApiObject = serde_json::from_value(json!({
            "id": "sub_42",
            "object": "subscription",
            "status": "trialing",
            "test_clock": "clock_9"
        }))
        .unwrap();

        assert_eq!(object.id, "sub_42");
        assert_eq!(object.object(), Some("subscription"));
        assert_eq!(object.test_clock(), Some("clock_9"));
        assert_eq!(object.status(), Some("trialing"));
    }
}
