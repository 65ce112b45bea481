//! Driving port for meal mutation use-cases.

use async_trait::async_trait;

use crate::domain::{CallerIdentity, Error, MealIndex, NewMeal};

/// Mutations of the meal collection on behalf of a caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealsCommand: Send + Sync {
    /// Append a meal with no subscribers and return its position.
    async fn add_meal(&self, caller: &CallerIdentity, meal: NewMeal) -> Result<MealIndex, Error>;

    /// Subscribe the caller to the meal at `index`. Repeat calls are no-ops.
    async fn subscribe(&self, caller: &CallerIdentity, index: MealIndex) -> Result<(), Error>;

    /// Remove the caller from the meal at `index`.
    async fn unsubscribe(&self, caller: &CallerIdentity, index: MealIndex) -> Result<(), Error>;
}
