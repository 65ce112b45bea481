//! Driving port for meal read use-cases.

use async_trait::async_trait;

use crate::domain::{CallerIdentity, Error, Meal, MealSummary};

/// Read access to the meal collection on behalf of a caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealsQuery: Send + Sync {
    /// Every meal with the caller's subscription flag; subscriber lists stay
    /// hidden.
    async fn list_meals(&self, caller: &CallerIdentity) -> Result<Vec<MealSummary>, Error>;

    /// Full records including subscribers. Admin callers only.
    async fn list_meals_with_subscribers(&self, caller: &CallerIdentity)
    -> Result<Vec<Meal>, Error>;
}
