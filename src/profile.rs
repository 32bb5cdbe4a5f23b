use chrono::Local;

use crate::error::{require, Result, TrackerError};
use crate::models::Profile;
use crate::storage::{load_json, save_json, KeyValueStore, AUTH_KEY, USER_KEY};

pub const MIN_PASSWORD_LEN: usize = 6;
const AUTH_SENTINEL: &str = "true";

/// Data entered on the registration form.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validates the form, stores a fresh profile and marks the session as authenticated.
/// The password is only checked, never stored.
pub fn register(store: &mut dyn KeyValueStore, form: Registration) -> Result<Profile> {
    require("name", &form.name)?;
    require("email", &form.email)?;
    require("password", &form.password)?;
    require("password confirmation", &form.confirm_password)?;
    if form.password != form.confirm_password {
        return Err(TrackerError::Validation("passwords do not match".into()));
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TrackerError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let profile = Profile {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: None,
        location: None,
        job_title: None,
        bio: None,
        joined_date: Local::now().to_rfc3339(),
    };
    store.set_many(&[
        (USER_KEY, serde_json::to_string(&profile)?),
        (AUTH_KEY, AUTH_SENTINEL.to_string()),
    ])?;
    tracing::info!(email = %profile.email, "user registered");
    Ok(profile)
}

/// The stored profile, or `None` when absent or unreadable.
pub fn load_profile(store: &dyn KeyValueStore) -> Option<Profile> {
    load_json(store, USER_KEY)
}

/// Replaces the stored profile. Name and email are required; blank optional
/// fields are stored as absent.
pub fn save_profile(store: &mut dyn KeyValueStore, mut profile: Profile) -> Result<Profile> {
    require("name", &profile.name)?;
    require("email", &profile.email)?;
    for field in [
        &mut profile.phone,
        &mut profile.location,
        &mut profile.job_title,
        &mut profile.bio,
    ] {
        if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
            *field = None;
        }
    }
    save_json(store, USER_KEY, &profile)?;
    tracing::debug!(email = %profile.email, "profile saved");
    Ok(profile)
}

pub fn is_authenticated(store: &dyn KeyValueStore) -> bool {
    match store.get(AUTH_KEY) {
        Ok(v) => v.as_deref() == Some(AUTH_SENTINEL),
        Err(e) => {
            tracing::warn!(error = %e, "could not read authentication flag");
            false
        }
    }
}

/// Forgets the profile and the authentication flag.
pub fn logout(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove(USER_KEY)?;
    store.remove(AUTH_KEY)?;
    tracing::info!("logged out");
    Ok(())
}
