//! In-memory document collections shared by every store backend.
//!
//! Backends differ only in where a collection lives between calls; the
//! document rules (id assignment, timestamps, schema checks, revisions)
//! are implemented once here.

use chrono::Utc;
use prodir_core::error::{ProdirError, Result};
use prodir_core::profession::{NewProfession, Profession, ProfessionSchema, ServiceNameQuery};
use prodir_core::user::{User, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profession document as stored, with its internal revision counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfession {
    #[serde(flatten)]
    pub profession: Profession,
    /// Incremented on every save. Never returned to callers.
    #[serde(default)]
    pub revision: u64,
}

/// The `professions` collection, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionCollection {
    #[serde(default)]
    professions: Vec<StoredProfession>,
}

impl ProfessionCollection {
    /// Materializes, validates and appends a new document.
    pub fn insert(
        &mut self,
        candidate: NewProfession,
        default_price_unit: &str,
    ) -> Result<Profession> {
        let profession = candidate.into_profession(
            Uuid::new_v4().to_string(),
            default_price_unit,
            Utc::now().to_rfc3339(),
        );
        ProfessionSchema::validate(&profession)?;

        self.professions.push(StoredProfession {
            profession: profession.clone(),
            revision: 0,
        });
        Ok(profession)
    }

    /// First document owned by `user`.
    pub fn find_by_owner(&self, user: &UserId) -> Option<Profession> {
        self.professions
            .iter()
            .find(|stored| stored.profession.is_owned_by(user))
            .map(|stored| stored.profession.clone())
    }

    pub fn find_matching(&self, query: &ServiceNameQuery) -> Vec<Profession> {
        self.professions
            .iter()
            .filter(|stored| query.matches(&stored.profession.service_name))
            .map(|stored| stored.profession.clone())
            .collect()
    }

    /// Replaces the document with the same id.
    ///
    /// Owner and creation time are taken from the stored document, not from
    /// `profession`.
    pub fn replace(&mut self, profession: &Profession) -> Result<Profession> {
        ProfessionSchema::validate(profession)?;

        let stored = self
            .professions
            .iter_mut()
            .find(|stored| stored.profession.id == profession.id)
            .ok_or_else(|| ProdirError::not_found("Profession", &profession.id))?;

        let mut next = profession.clone();
        next.user = stored.profession.user.clone();
        next.created_at = stored.profession.created_at.clone();
        next.updated_at = Utc::now().to_rfc3339();

        stored.profession = next.clone();
        stored.revision += 1;
        Ok(next)
    }

    pub fn all(&self) -> Vec<Profession> {
        self.professions
            .iter()
            .map(|stored| stored.profession.clone())
            .collect()
    }

    /// Revision of the document with `id`, for diagnostics and tests.
    pub fn revision_of(&self, id: &str) -> Option<u64> {
        self.professions
            .iter()
            .find(|stored| stored.profession.id == id)
            .map(|stored| stored.revision)
    }
}

/// The `users` collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCollection {
    #[serde(default)]
    users: Vec<User>,
}

impl UserCollection {
    pub fn find(&self, id: &UserId) -> Option<User> {
        self.users.iter().find(|user| &user.id == id).cloned()
    }

    pub fn upsert(&mut self, user: &User) {
        match self.users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => self.users.push(user.clone()),
        }
    }

    /// Returns false when the user does not exist.
    pub fn set_profession_flag(&mut self, id: &UserId, is_profession: bool) -> bool {
        match self.users.iter_mut().find(|user| &user.id == id) {
            Some(user) => {
                user.is_profession = is_profession;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodir_core::profession::RawFields;
    use serde_json::{Value, json};

    fn candidate(owner: &str, service_name: &str) -> NewProfession {
        let raw: RawFields = match json!({
            "name": "Asha",
            "email": "asha@example.com",
            "mobileNo": "9000000000",
            "serviceCategory": "Home",
            "serviceName": service_name,
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        NewProfession::from_raw(UserId::new(owner), &raw).unwrap()
    }

    #[test]
    fn test_insert_assigns_id_and_default_unit() {
        let mut collection = ProfessionCollection::default();
        let profession = collection.insert(candidate("u1", "Plumber"), "per-job").unwrap();

        assert!(Uuid::parse_str(&profession.id).is_ok());
        assert_eq!(profession.price_unit.as_deref(), Some("per-job"));
        assert_eq!(profession.created_at, profession.updated_at);
        assert_eq!(collection.revision_of(&profession.id), Some(0));
    }

    #[test]
    fn test_replace_keeps_owner_and_bumps_revision() {
        let mut collection = ProfessionCollection::default();
        let profession = collection.insert(candidate("u1", "Plumber"), "per-job").unwrap();

        let mut changed = profession.clone();
        changed.user = UserId::new("intruder");
        changed.created_at = "1970-01-01T00:00:00Z".into();
        changed.city = Some("Pune".into());

        let saved = collection.replace(&changed).unwrap();
        assert_eq!(saved.user, UserId::new("u1"));
        assert_eq!(saved.created_at, profession.created_at);
        assert_eq!(saved.city.as_deref(), Some("Pune"));
        assert_eq!(collection.revision_of(&profession.id), Some(1));
    }

    #[test]
    fn test_replace_rejects_schema_violation() {
        let mut collection = ProfessionCollection::default();
        let profession = collection.insert(candidate("u1", "Plumber"), "per-job").unwrap();

        let mut broken = profession.clone();
        broken.email = String::new();
        assert!(collection.replace(&broken).unwrap_err().is_validation());
        assert_eq!(collection.find_by_owner(&UserId::new("u1")), Some(profession));
    }

    #[test]
    fn test_revision_not_in_profession_projection() {
        let mut collection = ProfessionCollection::default();
        collection.insert(candidate("u1", "Plumber"), "per-job").unwrap();

        let stored = serde_json::to_value(&collection).unwrap();
        assert_eq!(stored["professions"][0]["revision"], json!(0));

        let projected = serde_json::to_value(collection.all()).unwrap();
        assert!(projected[0].get("revision").is_none());
    }

    #[test]
    fn test_find_by_owner_returns_first() {
        let mut collection = ProfessionCollection::default();
        let first = collection.insert(candidate("u1", "Plumber"), "per-job").unwrap();
        collection.insert(candidate("u1", "Electrician"), "per-job").unwrap();

        assert_eq!(collection.find_by_owner(&UserId::new("u1")).unwrap().id, first.id);
        assert!(collection.find_by_owner(&UserId::new("u2")).is_none());
    }

    #[test]
    fn test_user_flag() {
        let mut users = UserCollection::default();
        let id = UserId::new("u1");
        assert!(!users.set_profession_flag(&id, true));

        users.upsert(&User::new(id.clone(), Some("Asha".into())));
        assert!(users.set_profession_flag(&id, true));
        assert!(users.find(&id).unwrap().is_profession);
    }
}
