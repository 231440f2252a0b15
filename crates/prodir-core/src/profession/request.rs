//! Profession creation and update requests built from raw payloads.

use super::coercion::{PriceInput, RawFields, flag_field, price_field, text_field};
use super::model::{Profession, field};
use super::patch::Patch;
use super::schema::{ProfessionSchema, SchemaFields};
use crate::error::{ProdirError, Result};
use crate::user::UserId;

/// A validated candidate profile, ready to be handed to a store.
///
/// The owner always comes from the authenticated caller; `user`,
/// `ownerUserId` and `id` keys in the payload are never read.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfession {
    pub user: UserId,
    pub name: String,
    pub email: String,
    pub mobile_no: String,
    pub secondary_mobile_no: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub service_category: String,
    pub service_name: String,
    pub designation: Option<String>,
    pub experience: Option<String>,
    pub service_price: Option<f64>,
    /// Kept as a `Patch` so the store can tell omission (default applies)
    /// from an explicit value or `null`.
    pub price_unit: Patch<String>,
    pub need_support: Option<bool>,
    pub profession_description: Option<String>,
}

impl NewProfession {
    /// Builds a candidate from a creation payload.
    ///
    /// Cast failures and missing required fields are collected together and
    /// returned as a single validation error. A blank or unparseable
    /// `servicePrice` is dropped without error.
    pub fn from_raw(owner: UserId, raw: &RawFields) -> Result<Self> {
        let mut errors = Vec::new();
        let mut text = |key: &str| text_field(raw, key, &mut errors);

        let name = text(field::NAME).into_option().unwrap_or_default();
        let email = text(field::EMAIL).into_option().unwrap_or_default();
        let mobile_no = text(field::MOBILE_NO).into_option().unwrap_or_default();
        let secondary_mobile_no = text(field::SECONDARY_MOBILE_NO).into_option();
        let state = text(field::STATE).into_option();
        let district = text(field::DISTRICT).into_option();
        let city = text(field::CITY).into_option();
        let service_category = text(field::SERVICE_CATEGORY).into_option().unwrap_or_default();
        let service_name = text(field::SERVICE_NAME).into_option().unwrap_or_default();
        let designation = text(field::DESIGNATION).into_option();
        let experience = text(field::EXPERIENCE).into_option();
        let price_unit = text(field::PRICE_UNIT);
        let profession_description = text(field::PROFESSION_DESCRIPTION).into_option();
        let need_support = flag_field(raw, field::NEED_SUPPORT, &mut errors).into_option();

        let service_price = match price_field(raw, field::SERVICE_PRICE) {
            PriceInput::Amount(amount) => Some(amount),
            PriceInput::Absent | PriceInput::Blank | PriceInput::Unparseable(_) => None,
        };

        let candidate = Self {
            user: owner,
            name,
            email,
            mobile_no,
            secondary_mobile_no,
            state,
            district,
            city,
            service_category,
            service_name,
            designation,
            experience,
            service_price,
            price_unit,
            need_support,
            profession_description,
        };

        errors.extend(ProfessionSchema::violations(&candidate));
        if errors.is_empty() {
            Ok(candidate)
        } else {
            Err(ProdirError::Validation { messages: errors })
        }
    }

    /// Materializes the stored profile.
    ///
    /// Called by stores, which own id assignment, timestamps and the
    /// `priceUnit` default.
    pub fn into_profession(
        self,
        id: String,
        default_price_unit: &str,
        timestamp: String,
    ) -> Profession {
        let price_unit = match self.price_unit {
            Patch::Absent => Some(default_price_unit.to_string()),
            explicit => explicit.into_option(),
        };

        Profession {
            id,
            user: self.user,
            name: self.name,
            email: self.email,
            mobile_no: self.mobile_no,
            secondary_mobile_no: self.secondary_mobile_no,
            state: self.state,
            district: self.district,
            city: self.city,
            service_category: self.service_category,
            service_name: self.service_name,
            designation: self.designation,
            experience: self.experience,
            service_price: self.service_price,
            price_unit,
            need_support: self.need_support,
            profession_description: self.profession_description,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

impl SchemaFields for NewProfession {
    fn required_values(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.mobile_no.as_str(),
            self.service_category.as_str(),
            self.service_name.as_str(),
        ]
    }

    fn service_price(&self) -> Option<f64> {
        self.service_price
    }
}

/// A sparse set of changes to an existing profile.
///
/// Every field records whether its key was present in the payload. Owner and
/// id are not part of the patch, so no payload can change them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfessionPatch {
    pub name: Patch<String>,
    pub email: Patch<String>,
    pub mobile_no: Patch<String>,
    pub secondary_mobile_no: Patch<String>,
    pub state: Patch<String>,
    pub district: Patch<String>,
    pub city: Patch<String>,
    pub service_category: Patch<String>,
    pub service_name: Patch<String>,
    pub designation: Patch<String>,
    pub experience: Patch<String>,
    pub service_price: Option<PriceInput>,
    pub price_unit: Patch<String>,
    pub need_support: Patch<bool>,
    pub profession_description: Patch<String>,
}

impl ProfessionPatch {
    /// Builds a patch from an update payload.
    ///
    /// Only cast failures are errors here; constraint checks run against the
    /// merged profile when it is saved.
    pub fn from_raw(raw: &RawFields) -> Result<Self> {
        let mut errors = Vec::new();
        let mut text = |key: &str| text_field(raw, key, &mut errors);

        let mut patch = Self {
            name: text(field::NAME),
            email: text(field::EMAIL),
            mobile_no: text(field::MOBILE_NO),
            secondary_mobile_no: text(field::SECONDARY_MOBILE_NO),
            state: text(field::STATE),
            district: text(field::DISTRICT),
            city: text(field::CITY),
            service_category: text(field::SERVICE_CATEGORY),
            service_name: text(field::SERVICE_NAME),
            designation: text(field::DESIGNATION),
            experience: text(field::EXPERIENCE),
            service_price: None,
            price_unit: text(field::PRICE_UNIT),
            need_support: Patch::Absent,
            profession_description: text(field::PROFESSION_DESCRIPTION),
        };
        patch.need_support = flag_field(raw, field::NEED_SUPPORT, &mut errors);
        patch.service_price = match price_field(raw, field::SERVICE_PRICE) {
            PriceInput::Absent => None,
            present => Some(present),
        };

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(ProdirError::Validation { messages: errors })
        }
    }

    /// Returns true when the patch would not touch any field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the patch into `profession`.
    ///
    /// Absent keys leave the stored value alone; present keys overwrite it,
    /// even with an empty string or `null`. For `servicePrice`, a blank value
    /// clears the field and an unparseable one keeps the stored amount.
    pub fn apply_to(self, profession: &mut Profession) {
        self.name.apply_to_required(&mut profession.name);
        self.email.apply_to_required(&mut profession.email);
        self.mobile_no.apply_to_required(&mut profession.mobile_no);
        self.secondary_mobile_no
            .apply_to(&mut profession.secondary_mobile_no);
        self.state.apply_to(&mut profession.state);
        self.district.apply_to(&mut profession.district);
        self.city.apply_to(&mut profession.city);
        self.service_category
            .apply_to_required(&mut profession.service_category);
        self.service_name
            .apply_to_required(&mut profession.service_name);
        self.designation.apply_to(&mut profession.designation);
        self.experience.apply_to(&mut profession.experience);

        match self.service_price {
            None | Some(PriceInput::Absent) => {}
            Some(PriceInput::Blank) => profession.service_price = None,
            Some(PriceInput::Amount(amount)) => profession.service_price = Some(amount),
            Some(PriceInput::Unparseable(raw)) => {
                tracing::debug!(
                    "[ProfessionPatch] Ignoring unparseable servicePrice {:?}, keeping {:?}",
                    raw,
                    profession.service_price
                );
            }
        }

        self.price_unit.apply_to(&mut profession.price_unit);
        self.need_support.apply_to(&mut profession.need_support);
        self.profession_description
            .apply_to(&mut profession.profession_description);
    }
}
