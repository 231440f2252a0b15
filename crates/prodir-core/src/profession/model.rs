//! Profession domain model.
//!
//! A `Profession` is one professional's service listing in the directory.
//! It is owned by exactly one user and is looked up by its service name.

use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Payload keys of every profession field, as they appear on the wire.
pub mod field {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const MOBILE_NO: &str = "mobileNo";
    pub const SECONDARY_MOBILE_NO: &str = "secondaryMobileNo";
    pub const STATE: &str = "state";
    pub const DISTRICT: &str = "district";
    pub const CITY: &str = "city";
    pub const SERVICE_CATEGORY: &str = "serviceCategory";
    pub const SERVICE_NAME: &str = "serviceName";
    pub const DESIGNATION: &str = "designation";
    pub const EXPERIENCE: &str = "experience";
    pub const SERVICE_PRICE: &str = "servicePrice";
    pub const PRICE_UNIT: &str = "priceUnit";
    pub const NEED_SUPPORT: &str = "needSupport";
    pub const PROFESSION_DESCRIPTION: &str = "professionDescription";
}

/// Default `priceUnit` applied by stores when a creation payload omits it.
pub const DEFAULT_PRICE_UNIT: &str = "per-service";

/// A professional service-provider profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    /// Store-assigned identifier (UUID format), immutable
    pub id: String,
    /// Owning user, taken from the authenticated caller at creation
    pub user: UserId,

    pub name: String,
    pub email: String,
    pub mobile_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_mobile_no: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    pub service_category: String,
    /// Directory lookup key
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,

    /// Price amount; `None` means not specified, which is not the same as zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession_description: Option<String>,

    /// Creation timestamp (RFC 3339), set by the store
    pub created_at: String,
    /// Last write timestamp (RFC 3339), refreshed by the store on every save
    pub updated_at: String,
}

impl Profession {
    /// Returns true when this profile belongs to `user`.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user == user
    }
}
