use serde::{Deserialize, Serialize};
use service::storage::Record;

/// The demo record served by the binary.
///
/// Every field defaults, so create requests may omit `id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

impl Record for Item {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let item: Item = serde_json::from_str(r#"{"title":"Learn Go"}"#).unwrap();
        assert_eq!(item, Item { id: 0, title: "Learn Go".into(), done: false });
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let item: Item = serde_json::from_str(r#"{"title":"t","done":true,"owner":"x"}"#).unwrap();
        assert!(item.done);
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<Item>(r#"{"done":"yes"}"#).is_err());
    }
}
