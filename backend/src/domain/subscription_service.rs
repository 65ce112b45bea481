//! Meal listing, creation and subscription use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{MealRepository, MealsCommand, MealsQuery};
use crate::domain::{
    CallerIdentity, Error, Meal, MealIndex, MealStore, MealSummary, Mutation, NewMeal,
};

/// Meal service implementing the meal driving ports over a [`MealStore`].
pub struct SubscriptionService<R> {
    store: Arc<MealStore<R>>,
}

impl<R> SubscriptionService<R> {
    /// Create a service over a shared store.
    pub fn new(store: Arc<MealStore<R>>) -> Self {
        Self { store }
    }
}

fn meal_not_found(index: MealIndex) -> Error {
    Error::not_found(format!("meal {index} not found"))
}

#[async_trait]
impl<R> MealsQuery for SubscriptionService<R>
where
    R: MealRepository + 'static,
{
    async fn list_meals(&self, caller: &CallerIdentity) -> Result<Vec<MealSummary>, Error> {
        let meals = self.store.load_all().await?;
        Ok(meals
            .iter()
            .map(|meal| meal.summary_for(caller.user_name()))
            .collect())
    }

    async fn list_meals_with_subscribers(
        &self,
        caller: &CallerIdentity,
    ) -> Result<Vec<Meal>, Error> {
        if !caller.is_admin() {
            return Err(Error::forbidden("admin access required"));
        }
        self.store.load_all().await
    }
}

#[async_trait]
impl<R> MealsCommand for SubscriptionService<R>
where
    R: MealRepository + 'static,
{
    async fn add_meal(&self, caller: &CallerIdentity, meal: NewMeal) -> Result<MealIndex, Error> {
        let index = self
            .store
            .mutate(move |meals| {
                meals.push(Meal::new(meal));
                Ok(Mutation::Changed(MealIndex::new(meals.len() - 1)))
            })
            .await?;
        debug!(user_name = %caller.user_name(), %index, "meal added");
        Ok(index)
    }

    async fn subscribe(&self, caller: &CallerIdentity, index: MealIndex) -> Result<(), Error> {
        let user_name = caller.user_name();
        self.store
            .mutate(|meals| {
                let meal = meals
                    .get_mut(index.get())
                    .ok_or_else(|| meal_not_found(index))?;
                if meal.subscribe(user_name) {
                    Ok(Mutation::Changed(()))
                } else {
                    Ok(Mutation::Unchanged(()))
                }
            })
            .await?;
        debug!(%user_name, %index, "subscribed");
        Ok(())
    }

    async fn unsubscribe(&self, caller: &CallerIdentity, index: MealIndex) -> Result<(), Error> {
        let user_name = caller.user_name();
        self.store
            .mutate(|meals| {
                let meal = meals
                    .get_mut(index.get())
                    .ok_or_else(|| meal_not_found(index))?;
                if meal.unsubscribe(user_name) {
                    Ok(Mutation::Changed(()))
                } else {
                    Err(Error::not_found(format!(
                        "{user_name} is not subscribed to meal {index}"
                    )))
                }
            })
            .await?;
        debug!(%user_name, %index, "unsubscribed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;
