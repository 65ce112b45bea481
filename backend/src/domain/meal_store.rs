//! Serialized access to the persisted meal collection.
//!
//! The collection is one stored document, so every mutation is a
//! load → transform → save cycle. [`MealStore`] runs those cycles inside a
//! single async mutex (the mutation section) so two concurrent writers can
//! never interleave and lose each other's update. Plain reads skip the
//! mutex; they observe either the state before or after a mutation.
//!
//! A save runs on its own task that owns the section guard. When the caller
//! stops waiting for a slow save, the section stays closed until the write
//! has really finished, so a later cycle always loads on top of it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::error;

use crate::domain::deadline::with_deadline;
use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{Error, Meal};

/// Outcome of a transform run inside [`MealStore::mutate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<T> {
    /// The collection changed and must be saved.
    Changed(T),
    /// Nothing changed; the save is skipped.
    Unchanged(T),
}

/// Meal collection access with a mutation section and storage timeouts.
pub struct MealStore<R> {
    repository: Arc<R>,
    mutation: Arc<Mutex<()>>,
    timeout: Duration,
}

impl<R> MealStore<R> {
    /// Wrap `repository`, bounding each storage call by `timeout`.
    pub fn new(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            mutation: Arc::new(Mutex::new(())),
            timeout,
        }
    }
}

impl<R> MealStore<R>
where
    R: MealRepository + 'static,
{
    /// Load the collection, treating a never-written collection as empty.
    pub async fn load_all(&self) -> Result<Vec<Meal>, Error> {
        let loaded = with_deadline(self.timeout, "meals.load", self.repository.load_all()).await?;
        match loaded {
            Ok(meals) => Ok(meals),
            Err(MealRepositoryError::NotFound) => Ok(Vec::new()),
            Err(err) => Err(map_repository_error(err)),
        }
    }

    /// Run `transform` over the current collection inside the mutation
    /// section and persist the result when it reports a change.
    ///
    /// A failed or [`Mutation::Unchanged`] transform writes nothing. A save
    /// that outlives the timeout reports `service_unavailable`; it may still
    /// land, and the section is held until it does.
    pub async fn mutate<T, F>(&self, transform: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Vec<Meal>) -> Result<Mutation<T>, Error>,
    {
        let section = with_deadline(
            self.timeout,
            "meals.lock",
            Arc::clone(&self.mutation).lock_owned(),
        )
        .await?;
        let mut meals = self.load_all().await?;
        match transform(&mut meals)? {
            Mutation::Unchanged(value) => Ok(value),
            Mutation::Changed(value) => {
                let repository = Arc::clone(&self.repository);
                let save = tokio::spawn(async move {
                    let outcome = repository.save_all(&meals).await;
                    drop(section);
                    outcome
                });
                with_deadline(self.timeout, "meals.save", save)
                    .await?
                    .map_err(|err| {
                        error!(error = %err, "meal save task failed");
                        Error::internal(format!("meal save task failed: {err}"))
                    })?
                    .map_err(map_repository_error)?;
                Ok(value)
            }
        }
    }
}

fn map_repository_error(err: MealRepositoryError) -> Error {
    error!(error = %err, "meal store failure");
    Error::internal(err.to_string())
}

#[cfg(test)]
mod tests {
    //! Mutation-section and error-mapping coverage.

    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockMealRepository;
    use crate::domain::{ErrorCode, NewMeal, UserName};

    fn offering(name: &str) -> NewMeal {
        NewMeal {
            breakfast: format!("{name} breakfast"),
            lunch: format!("{name} lunch"),
            dinner: format!("{name} dinner"),
        }
    }

    fn store<R>(repo: R) -> MealStore<R> {
        MealStore::new(Arc::new(repo), Duration::from_secs(5))
    }

    /// Repository that yields between every read and write so concurrent
    /// cycles interleave unless something serializes them.
    #[derive(Default)]
    struct YieldingRepository {
        meals: StdMutex<Option<Vec<Meal>>>,
    }

    impl YieldingRepository {
        fn seeded(meals: Vec<Meal>) -> Self {
            Self {
                meals: StdMutex::new(Some(meals)),
            }
        }

        fn snapshot(&self) -> Option<Vec<Meal>> {
            self.meals.lock().expect("meals lock").clone()
        }
    }

    #[async_trait]
    impl MealRepository for YieldingRepository {
        async fn load_all(&self) -> Result<Vec<Meal>, MealRepositoryError> {
            let loaded = self.snapshot();
            tokio::task::yield_now().await;
            loaded.ok_or(MealRepositoryError::NotFound)
        }

        async fn save_all(&self, meals: &[Meal]) -> Result<(), MealRepositoryError> {
            tokio::task::yield_now().await;
            *self.meals.lock().expect("meals lock") = Some(meals.to_vec());
            Ok(())
        }
    }

    /// Repository whose writes run on the blocking pool, the first one
    /// slowly. Dropping the awaiting future does not cancel the write.
    struct DetachedWriteRepository {
        meals: Arc<StdMutex<Option<Vec<Meal>>>>,
        first_write_delay: Duration,
        writes: AtomicUsize,
    }

    impl DetachedWriteRepository {
        fn seeded(meals: Vec<Meal>, first_write_delay: Duration) -> Self {
            Self {
                meals: Arc::new(StdMutex::new(Some(meals))),
                first_write_delay,
                writes: AtomicUsize::new(0),
            }
        }

        fn snapshot(&self) -> Option<Vec<Meal>> {
            self.meals.lock().expect("meals lock").clone()
        }
    }

    #[async_trait]
    impl MealRepository for DetachedWriteRepository {
        async fn load_all(&self) -> Result<Vec<Meal>, MealRepositoryError> {
            self.snapshot().ok_or(MealRepositoryError::NotFound)
        }

        async fn save_all(&self, meals: &[Meal]) -> Result<(), MealRepositoryError> {
            let delay = if self.writes.fetch_add(1, Ordering::SeqCst) == 0 {
                self.first_write_delay
            } else {
                Duration::ZERO
            };
            let target = Arc::clone(&self.meals);
            let meals = meals.to_vec();
            tokio::task::spawn_blocking(move || {
                std::thread::sleep(delay);
                *target.lock().expect("meals lock") = Some(meals);
            })
            .await
            .map_err(|err| MealRepositoryError::storage(err.to_string()))
        }
    }

    struct StalledRepository;

    #[async_trait]
    impl MealRepository for StalledRepository {
        async fn load_all(&self) -> Result<Vec<Meal>, MealRepositoryError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }

        async fn save_all(&self, _meals: &[Meal]) -> Result<(), MealRepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_all_treats_missing_collection_as_empty() {
        let mut repo = MockMealRepository::new();
        repo.expect_load_all()
            .times(1)
            .return_once(|| Err(MealRepositoryError::not_found()));

        let meals = store(repo).load_all().await.expect("empty collection");
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn storage_failures_become_internal_errors() {
        let mut repo = MockMealRepository::new();
        repo.expect_load_all()
            .times(1)
            .return_once(|| Err(MealRepositoryError::storage("disk on fire")));

        let err = store(repo).load_all().await.expect_err("storage failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn unchanged_mutations_skip_the_save() {
        let mut repo = MockMealRepository::new();
        repo.expect_load_all().times(1).return_once(|| Ok(Vec::new()));
        repo.expect_save_all().never();

        let len = store(repo)
            .mutate(|meals| Ok(Mutation::Unchanged(meals.len())))
            .await
            .expect("mutation succeeds");
        assert_eq!(len, 0);
    }

    #[tokio::test]
    async fn failed_transforms_skip_the_save() {
        let mut repo = MockMealRepository::new();
        repo.expect_load_all().times(1).return_once(|| Ok(Vec::new()));
        repo.expect_save_all().never();

        let err = store(repo)
            .mutate::<(), _>(|_| Err(Error::not_found("meal not found")))
            .await
            .expect_err("transform fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn changed_mutations_are_saved() {
        let repo = YieldingRepository::default();
        let store = store(repo);

        store
            .mutate(|meals| {
                meals.push(Meal::new(offering("first")));
                Ok(Mutation::Changed(()))
            })
            .await
            .expect("mutation succeeds");

        let saved = store.repository.snapshot().expect("collection written");
        assert_eq!(saved.len(), 1);
    }

    #[rstest]
    #[case(2)]
    #[case(8)]
    #[tokio::test]
    async fn concurrent_subscribes_are_all_kept(#[case] users: usize) {
        let store = store(YieldingRepository::seeded(vec![Meal::new(offering("shared"))]));
        let names: Vec<UserName> = (0..users)
            .map(|i| UserName::new(format!("user{i}")).expect("valid user name"))
            .collect();

        let cycles = names.iter().map(|name| {
            store.mutate(move |meals| {
                let changed = meals
                    .get_mut(0)
                    .map(|meal| meal.subscribe(name))
                    .unwrap_or(false);
                Ok(Mutation::Changed(changed))
            })
        });
        let outcomes = futures::future::join_all(cycles).await;
        assert!(outcomes.into_iter().all(|outcome| outcome.is_ok()));

        let saved = store.repository.snapshot().expect("collection written");
        for name in &names {
            assert!(saved[0].has_subscriber(name), "{name} lost its subscription");
        }
    }

    #[tokio::test]
    async fn slow_storage_surfaces_as_unavailable() {
        let store = MealStore::new(Arc::new(StalledRepository), Duration::from_millis(20));
        let err = store.load_all().await.expect_err("timed out");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn timed_out_save_lands_before_the_next_mutation() {
        let store = MealStore::new(
            Arc::new(DetachedWriteRepository::seeded(
                vec![Meal::new(offering("shared"))],
                Duration::from_millis(300),
            )),
            Duration::from_millis(200),
        );
        let subscribe = |raw: &str| {
            let user = UserName::new(raw).expect("valid user name");
            store.mutate(move |meals| {
                meals[0].subscribe(&user);
                Ok(Mutation::Changed(()))
            })
        };

        let ada = subscribe("ada").await.expect_err("slow save times out");
        assert_eq!(ada.code(), ErrorCode::ServiceUnavailable);
        subscribe("bob").await.expect("second subscribe succeeds");

        let saved = store.repository.snapshot().expect("collection written");
        let bob = UserName::new("bob").expect("valid user name");
        assert!(saved[0].has_subscriber(&bob), "acknowledged subscribe was lost");
    }
}
