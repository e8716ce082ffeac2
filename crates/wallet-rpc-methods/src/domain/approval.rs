//! Approval requests sent to the user-facing approval authority.

use crate::domain::network::NetworkDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request for the user to confirm an action on behalf of an origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub origin: String,
    /// Method tag, e.g. `wallet_switchEthereumChain`
    #[serde(rename = "type")]
    pub request_type: String,
    /// Network the origin wants to switch to
    pub request_data: NetworkDescriptor,
}

/// An approval waiting for a decision
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApproval {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: ApprovalRequest,
    pub created_at: DateTime<Utc>,
}

impl PendingApproval {
    pub fn new(request: ApprovalRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain_id::ChainId;

    #[test]
    fn test_pending_approval_json_shape() {
        let request = ApprovalRequest {
            origin: "https://dapp.example".into(),
            request_type: "wallet_switchEthereumChain".into(),
            request_data: NetworkDescriptor::custom(
                ChainId::parse("0x89").unwrap(),
                "MATIC",
                "Polygon",
                "https://polygon.example",
            ),
        };
        let pending = PendingApproval::new(request);
        let json = serde_json::to_value(&pending).unwrap();

        assert_eq!(json["origin"], "https://dapp.example");
        assert_eq!(json["type"], "wallet_switchEthereumChain");
        assert_eq!(json["requestData"]["chainId"], "0x89");
        assert!(json["id"].is_string());
        assert!(json["createdAt"].is_string());
    }
}
