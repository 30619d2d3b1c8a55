//! Typed projections of backend state and write outcomes.

use crate::validate::Quantity;
use serde::{Deserialize, Serialize};

/// Units of a component a user currently has out on loan.
///
/// Always fetched live; never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub component: String,
    pub outstanding: u64,
}

/// Units of a component currently on the shelf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub component: String,
    pub stock: u64,
}

/// Outcome of a write operation.
///
/// `success == false` means the backend understood the request and refused
/// it; `message` then carries the backend's reason verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    pub success: bool,
    pub message: String,
}

impl TransactionResult {
    pub fn accepted(message: impl Into<String>) -> Self {
        TransactionResult {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        TransactionResult {
            success: false,
            message: message.into(),
        }
    }
}

/// Wire shape of a write reply: `{success: true}` or `{error: "..."}`.
#[derive(Deserialize)]
struct RawWriteReply {
    #[allow(dead_code)]
    success: Option<bool>,
    error: Option<String>,
}

/// Write reply as seen past the transport boundary.
///
/// The presence of `error` alone decides the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawWriteReply")]
pub(crate) enum WriteReply {
    Accepted,
    Rejected(String),
}

impl From<RawWriteReply> for WriteReply {
    fn from(raw: RawWriteReply) -> Self {
        match raw.error {
            Some(reason) => WriteReply::Rejected(reason),
            None => WriteReply::Accepted,
        }
    }
}

/// POST bodies understood by the backend.
#[derive(Debug, Serialize)]
#[serde(
    tag = "action",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub(crate) enum WriteRequest<'a> {
    Borrow {
        user_id: &'a str,
        case_name: &'a str,
        component: &'a str,
        quantity: Quantity,
    },
    Return {
        user_id: &'a str,
        component: &'a str,
        quantity: Quantity,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_reply_success() {
        let reply: WriteReply = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(reply, WriteReply::Accepted);
    }

    #[test]
    fn test_write_reply_error_wins() {
        let reply: WriteReply =
            serde_json::from_value(json!({"error": "Not enough stock available"})).unwrap();
        assert_eq!(
            reply,
            WriteReply::Rejected("Not enough stock available".to_string())
        );
    }

    #[test]
    fn test_write_reply_empty_object_is_accepted() {
        let reply: WriteReply = serde_json::from_value(json!({})).unwrap();
        assert_eq!(reply, WriteReply::Accepted);
    }

    #[test]
    fn test_borrow_request_body() {
        let body = WriteRequest::Borrow {
            user_id: "u1",
            case_name: "Case A",
            component: "Widget",
            quantity: Quantity::try_from(2).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "action": "borrow",
                "userId": "u1",
                "caseName": "Case A",
                "component": "Widget",
                "quantity": 2
            })
        );
    }

    #[test]
    fn test_return_request_body() {
        let body = WriteRequest::Return {
            user_id: "u1",
            component: "Widget",
            quantity: Quantity::try_from(1).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "action": "return",
                "userId": "u1",
                "component": "Widget",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_stock_item_decodes() {
        let items: Vec<StockItem> =
            serde_json::from_value(json!([{"component": "Widget", "stock": 3}])).unwrap();
        assert_eq!(
            items,
            vec![StockItem {
                component: "Widget".to_string(),
                stock: 3
            }]
        );
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let result: Result<Vec<StockItem>, _> =
            serde_json::from_value(json!([{"component": "Widget", "stock": -1}]));
        assert!(result.is_err());
    }
}
