/// Postal addresses embedded in user and pub documents
///
/// Both shapes are stored as JSONB columns and serialized in camelCase on
/// the wire (`postalCode`).

use serde::{Deserialize, Serialize};

/// Address attached to a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Address of a pub, with optional coordinates kept as the strings the
/// venue owner entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubAddress {
    pub street: String,
    pub city: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}
