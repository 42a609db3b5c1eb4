//! Wire format types for the Solana Actions protocol.
//!
//! All types serialize with camelCase field names to match what action
//! clients (wallets, blink renderers) expect.

use serde::{Deserialize, Serialize};

/// Discovery manifest served at `/actions.json`.
///
/// Maps website paths to the action API paths that back them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsJson {
    /// Ordered routing rules; the first matching rule wins.
    pub rules: Vec<ActionRule>,
}

impl ActionsJson {
    /// The fixed manifest: every top-level path maps into the actions API
    /// namespace, and the actions API namespace maps onto itself.
    #[must_use]
    pub fn payments() -> Self {
        Self {
            rules: vec![
                ActionRule::new("/*", "/api/actions/*"),
                // idempotent rule as the fallback
                ActionRule::new("/api/actions/**", "/api/actions/**"),
            ],
        }
    }
}

/// A single `pathPattern` → `apiPath` routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRule {
    /// Website path pattern (supports `*` and `**` wildcards).
    pub path_pattern: String,
    /// Action API path the pattern resolves to.
    pub api_path: String,
}

impl ActionRule {
    /// Creates a new routing rule.
    pub fn new(path_pattern: impl Into<String>, api_path: impl Into<String>) -> Self {
        Self {
            path_pattern: path_pattern.into(),
            api_path: api_path.into(),
        }
    }
}

/// Kind of payload returned by an action endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Metadata describing an action (GET response).
    Action,
    /// Transaction to sign (POST response).
    Transaction,
}

/// Metadata returned by `GET` on an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGetResponse {
    /// Always [`ActionType::Action`].
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// Absolute URL of the image rendered by the client.
    pub icon: String,
    /// Action title.
    pub title: String,
    /// Free-form, possibly multi-line, description.
    pub description: String,
    /// Default button label.
    pub label: String,
    /// Selectable linked actions.
    pub links: ActionLinks,
}

/// Container for the linked actions of a GET payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLinks {
    /// Buttons shown to the user, in display order.
    pub actions: Vec<LinkedAction>,
}

/// A button that POSTs to `href` when selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAction {
    /// Button label.
    pub label: String,
    /// Absolute URL the client POSTs to.
    pub href: String,
}

/// Body sent by the client on `POST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPostRequest {
    /// Base58 public key of the account that will sign the transaction.
    pub account: String,
}

/// Response to a `POST`: an unsigned transaction for the wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPostResponse {
    /// Always [`ActionType::Transaction`].
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// Base64-encoded serialized transaction.
    pub transaction: String,
    /// Message shown to the user alongside the signing prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionPostResponse {
    /// Wraps a base64 transaction into a POST response.
    pub fn transaction(transaction: impl Into<String>, message: Option<String>) -> Self {
        Self {
            kind: ActionType::Transaction,
            transaction: transaction.into(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actions_json_wire_shape() {
        let value = serde_json::to_value(ActionsJson::payments()).unwrap();
        assert_eq!(
            value,
            json!({
                "rules": [
                    { "pathPattern": "/*", "apiPath": "/api/actions/*" },
                    { "pathPattern": "/api/actions/**", "apiPath": "/api/actions/**" },
                ]
            })
        );
    }

    #[test]
    fn test_get_response_uses_type_tag() {
        let response = ActionGetResponse {
            kind: ActionType::Action,
            icon: "https://example.com/logo.png".into(),
            title: "Title".into(),
            description: "line one\nline two".into(),
            label: "Pay".into(),
            links: ActionLinks {
                actions: vec![LinkedAction {
                    label: "1SOL".into(),
                    href: "https://example.com/api/actions/payments?amount=1".into(),
                }],
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "action");
        assert_eq!(value["links"]["actions"][0]["label"], "1SOL");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_post_response_omits_missing_message() {
        let value = serde_json::to_value(ActionPostResponse::transaction("AQID", None)).unwrap();
        assert_eq!(value, json!({ "type": "transaction", "transaction": "AQID" }));
    }

    #[test]
    fn test_post_request_ignores_unknown_fields() {
        let req: ActionPostRequest =
            serde_json::from_str(r#"{"account":"abc","data":{"x":1}}"#).unwrap();
        assert_eq!(req.account, "abc");
    }
}
