//! Meal collection stored as one JSON array.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Meal;
use crate::domain::ports::{KeyValueStore, KeyValueStoreError, MealRepository, MealRepositoryError};

use super::records::StoredMeal;

/// Key holding the whole meal collection.
pub const MEALS_KEY: &str = "meals";

/// Persists the meal collection as a single document under [`MEALS_KEY`].
#[derive(Clone)]
pub struct KeyValueMealRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueMealRepository {
    /// Create a repository over the `meals` namespace store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

fn map_store_error(err: KeyValueStoreError) -> MealRepositoryError {
    match err {
        KeyValueStoreError::NotFound { .. } => MealRepositoryError::not_found(),
        KeyValueStoreError::Storage { message } => MealRepositoryError::storage(message),
    }
}

#[async_trait]
impl MealRepository for KeyValueMealRepository {
    async fn load_all(&self) -> Result<Vec<Meal>, MealRepositoryError> {
        let document = self.store.get(MEALS_KEY).await.map_err(map_store_error)?;
        let stored: Vec<StoredMeal> = serde_json::from_value(document)
            .map_err(|err| MealRepositoryError::storage(format!("corrupt meal collection: {err}")))?;
        stored
            .into_iter()
            .map(Meal::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| MealRepositoryError::storage(format!("corrupt meal collection: {err}")))
    }

    async fn save_all(&self, meals: &[Meal]) -> Result<(), MealRepositoryError> {
        let stored: Vec<StoredMeal> = meals.iter().map(StoredMeal::from).collect();
        let document = serde_json::to_value(stored)
            .map_err(|err| MealRepositoryError::storage(err.to_string()))?;
        self.store
            .put(MEALS_KEY, document)
            .await
            .map_err(map_store_error)
    }
}
