//! Stored JSON shapes.
//!
//! Field names match documents written by earlier deployments: the
//! credential digest lives under `password`, and meals written before
//! subscriptions existed have no `subscribers` field.

use serde::{Deserialize, Serialize};

use crate::domain::{Credential, Meal, NewMeal, UserName, UserValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredCredential {
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub admin: bool,
}

impl From<&Credential> for StoredCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            user_name: credential.user_name().to_string(),
            email: credential.email().to_owned(),
            password: credential.password_hash().to_owned(),
            admin: credential.is_admin(),
        }
    }
}

impl TryFrom<StoredCredential> for Credential {
    type Error = UserValidationError;

    fn try_from(stored: StoredCredential) -> Result<Self, Self::Error> {
        Ok(Credential::new(
            UserName::new(stored.user_name)?,
            stored.email,
            stored.password,
            stored.admin,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct StoredMeal {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    #[serde(default)]
    pub subscribers: Vec<String>,
}

impl From<&Meal> for StoredMeal {
    fn from(meal: &Meal) -> Self {
        Self {
            breakfast: meal.breakfast().to_owned(),
            lunch: meal.lunch().to_owned(),
            dinner: meal.dinner().to_owned(),
            subscribers: meal.subscribers().iter().map(ToString::to_string).collect(),
        }
    }
}

impl TryFrom<StoredMeal> for Meal {
    type Error = UserValidationError;

    fn try_from(stored: StoredMeal) -> Result<Self, Self::Error> {
        let subscribers = stored
            .subscribers
            .into_iter()
            .map(UserName::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Meal::from_parts(
            NewMeal {
                breakfast: stored.breakfast,
                lunch: stored.lunch,
                dinner: stored.dinner,
            },
            subscribers,
        ))
    }
}
