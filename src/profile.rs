//! User profiles.
//!
//! Profiles are keyed by user id and kept in memory. The chat API reads the
//! stored [`UserType`] to pick the advisor's audience.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guidance::UserType;

/// Seniority of a user's experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    /// Every level, in display order.
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];

    /// Wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Executive => "executive",
        }
    }

    /// Parse a wire name, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// A stored profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub user_type: UserType,
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub industry_interests: Vec<String>,
    #[serde(default)]
    pub career_goals: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileCreate {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub industry_interests: Vec<String>,
    #[serde(default)]
    pub career_goals: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub industry_interests: Option<Vec<String>>,
    #[serde(default)]
    pub career_goals: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl UserProfileUpdate {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.user_type.is_none()
            && self.experience_level.is_none()
            && self.industry_interests.is_none()
            && self.career_goals.is_none()
            && self.skills.is_none()
            && self.location.is_none()
            && self.bio.is_none()
    }
}

/// Profile store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("User profile already exists")]
    AlreadyExists,

    #[error("User profile not found")]
    NotFound,

    #[error("No valid fields to update")]
    EmptyUpdate,

    #[error("{0}")]
    Invalid(String),
}

fn build_profile(
    user_id: &str,
    data: UserProfileCreate,
    id: String,
    created_at: DateTime<Utc>,
) -> UserProfile {
    UserProfile {
        id,
        user_id: user_id.to_string(),
        full_name: data.full_name.trim().to_string(),
        email: data.email.trim().to_string(),
        user_type: data.user_type,
        experience_level: data.experience_level,
        industry_interests: data.industry_interests,
        career_goals: data.career_goals,
        skills: data.skills,
        location: data.location,
        bio: data.bio,
        created_at,
        updated_at: Utc::now(),
    }
}

fn validate(full_name: &str, email: &str) -> Result<(), ProfileError> {
    if full_name.trim().is_empty() {
        return Err(ProfileError::Invalid("full_name cannot be empty".to_string()));
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(ProfileError::Invalid(format!("invalid email address: {email}")));
    }
    Ok(())
}

/// Thread-safe profile store keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    inner: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl ProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile for `user_id`.
    pub fn create(
        &self,
        user_id: &str,
        data: UserProfileCreate,
    ) -> Result<UserProfile, ProfileError> {
        validate(&data.full_name, &data.email)?;

        let mut guard = self.inner.write().unwrap();
        if guard.contains_key(user_id) {
            return Err(ProfileError::AlreadyExists);
        }

        let profile = build_profile(user_id, data, Uuid::new_v4().to_string(), Utc::now());
        guard.insert(user_id.to_string(), profile.clone());
        Ok(profile)
    }

    /// Create the profile, or overwrite it if one exists. Keeps the original
    /// id and creation time.
    pub fn upsert(
        &self,
        user_id: &str,
        data: UserProfileCreate,
    ) -> Result<UserProfile, ProfileError> {
        validate(&data.full_name, &data.email)?;

        let mut guard = self.inner.write().unwrap();
        let profile = match guard.get(user_id) {
            Some(existing) => {
                let (id, created_at) = (existing.id.clone(), existing.created_at);
                build_profile(user_id, data, id, created_at)
            }
            None => build_profile(user_id, data, Uuid::new_v4().to_string(), Utc::now()),
        };
        guard.insert(user_id.to_string(), profile.clone());
        Ok(profile)
    }

    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.inner.read().unwrap().get(user_id).cloned()
    }

    /// Audience for a user; [`UserType::Student`] when no profile exists.
    #[must_use]
    pub fn user_type_of(&self, user_id: &str) -> UserType {
        self.get(user_id).map(|p| p.user_type).unwrap_or_default()
    }

    /// Apply a partial update.
    pub fn update(
        &self,
        user_id: &str,
        update: UserProfileUpdate,
    ) -> Result<UserProfile, ProfileError> {
        if update.is_empty() {
            return Err(ProfileError::EmptyUpdate);
        }
        if let Some(name) = &update.full_name
            && name.trim().is_empty()
        {
            return Err(ProfileError::Invalid("full_name cannot be empty".to_string()));
        }

        let mut guard = self.inner.write().unwrap();
        let profile = guard.get_mut(user_id).ok_or(ProfileError::NotFound)?;

        if let Some(v) = update.full_name {
            profile.full_name = v.trim().to_string();
        }
        if let Some(v) = update.user_type {
            profile.user_type = v;
        }
        if let Some(v) = update.experience_level {
            profile.experience_level = Some(v);
        }
        if let Some(v) = update.industry_interests {
            profile.industry_interests = v;
        }
        if let Some(v) = update.career_goals {
            profile.career_goals = v;
        }
        if let Some(v) = update.skills {
            profile.skills = v;
        }
        if let Some(v) = update.location {
            profile.location = Some(v);
        }
        if let Some(v) = update.bio {
            profile.bio = Some(v);
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }

    pub fn delete(&self, user_id: &str) -> Result<(), ProfileError> {
        self.inner
            .write()
            .unwrap()
            .remove(user_id)
            .map(|_| ())
            .ok_or(ProfileError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserProfileCreate {
        UserProfileCreate {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            user_type: UserType::Professional,
            skills: vec!["math".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = ProfileStore::new();
        let profile = store.create("u1", sample()).unwrap();
        assert_eq!(profile.user_id, "u1");
        assert_eq!(store.get("u1").unwrap(), profile);
        assert_eq!(store.user_type_of("u1"), UserType::Professional);
        assert_eq!(store.user_type_of("nobody"), UserType::Student);
    }

    #[test]
    fn test_create_twice_conflicts() {
        let store = ProfileStore::new();
        store.create("u1", sample()).unwrap();
        assert_eq!(
            store.create("u1", sample()).unwrap_err(),
            ProfileError::AlreadyExists
        );
    }

    #[test]
    fn test_create_validates_fields() {
        let store = ProfileStore::new();
        let mut bad = sample();
        bad.email = "not-an-email".to_string();
        assert!(matches!(
            store.create("u1", bad),
            Err(ProfileError::Invalid(_))
        ));

        let mut blank = sample();
        blank.full_name = "  ".to_string();
        assert!(store.create("u1", blank).is_err());
    }

    #[test]
    fn test_partial_update() {
        let store = ProfileStore::new();
        let created = store.create("u1", sample()).unwrap();

        let updated = store
            .update(
                "u1",
                UserProfileUpdate {
                    bio: Some("Analyst".to_string()),
                    experience_level: Some(ExperienceLevel::Senior),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.full_name, created.full_name);
        assert_eq!(updated.bio.as_deref(), Some("Analyst"));
        assert_eq!(updated.experience_level, Some(ExperienceLevel::Senior));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_empty_update_rejected() {
        let store = ProfileStore::new();
        store.create("u1", sample()).unwrap();
        assert_eq!(
            store.update("u1", UserProfileUpdate::default()).unwrap_err(),
            ProfileError::EmptyUpdate
        );
    }

    #[test]
    fn test_update_and_delete_missing() {
        let store = ProfileStore::new();
        let update = UserProfileUpdate {
            bio: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update("ghost", update).unwrap_err(), ProfileError::NotFound);
        assert_eq!(store.delete("ghost").unwrap_err(), ProfileError::NotFound);
    }

    #[test]
    fn test_upsert_keeps_identity() {
        let store = ProfileStore::new();
        let first = store.upsert("u1", sample()).unwrap();

        let mut changed = sample();
        changed.user_type = UserType::Entrepreneur;
        let second = store.upsert("u1", changed).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.user_type, UserType::Entrepreneur);
    }

    #[test]
    fn test_concurrent_upserts_share_one_profile() {
        let store = ProfileStore::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.upsert("u1", sample()))
            })
            .collect();
        let ids: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap().id)
            .collect();

        assert!(ids.iter().all(|id| id == &ids[0]));
        assert_eq!(store.get("u1").unwrap().id, ids[0]);
    }

    #[test]
    fn test_experience_level_parse() {
        assert_eq!(ExperienceLevel::parse("Senior"), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::parse("guru"), None);
    }
}
