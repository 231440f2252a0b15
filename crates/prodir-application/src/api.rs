//! Envelope adapters for the HTTP boundary.
//!
//! Wraps each `ProfessionUseCase` operation so transport code only has to
//! serialize the returned `ApiResponse` and copy its status.

use crate::profession_usecase::ProfessionUseCase;
use prodir_core::error::ProdirError;
use prodir_core::profession::{Profession, RawFields};
use prodir_core::response::ApiResponse;
use prodir_core::user::UserId;

pub const PROFILE_NOT_FOUND: &str = "Professional profile not found. Please add one first.";
pub const PROFILE_UPDATED: &str = "Professional profile updated successfully";
pub const CREATE_FAILED: &str = "Failed to add profession.";
pub const FETCH_FAILED: &str = "Server error while fetching professionals";
pub const UPDATE_FAILED: &str = "Server error while updating profile";

/// Request handlers returning response envelopes.
pub struct ProfessionApi<'a> {
    use_case: &'a ProfessionUseCase,
}

impl<'a> ProfessionApi<'a> {
    pub fn new(use_case: &'a ProfessionUseCase) -> Self {
        Self { use_case }
    }

    /// 201 with the created profile.
    pub async fn add_profession(
        &self,
        caller: Option<&UserId>,
        raw: &RawFields,
    ) -> ApiResponse<Profession> {
        match self.use_case.create(caller, raw).await {
            Ok(profession) => ApiResponse::created(profession),
            Err(e) => ApiResponse::from_error(&e, CREATE_FAILED),
        }
    }

    /// 200 with the matching profiles, possibly none.
    pub async fn professionals_by_service(
        &self,
        service_name: Option<&str>,
    ) -> ApiResponse<Vec<Profession>> {
        match self.use_case.find_by_service_name(service_name).await {
            Ok(professions) => ApiResponse::ok(professions),
            Err(e) => ApiResponse::from_error(&e, FETCH_FAILED),
        }
    }

    /// 200 with the updated profile.
    pub async fn update_professional_profile(
        &self,
        caller: Option<&UserId>,
        raw: &RawFields,
    ) -> ApiResponse<Profession> {
        match self.use_case.update_own_profile(caller, raw).await {
            Ok(profession) => ApiResponse::ok(profession).with_message(PROFILE_UPDATED),
            Err(e @ ProdirError::NotFound { .. }) => {
                let mut response = ApiResponse::from_error(&e, UPDATE_FAILED);
                response.error = Some(PROFILE_NOT_FOUND.to_string());
                response
            }
            Err(e) => ApiResponse::from_error(&e, UPDATE_FAILED),
        }
    }
}
