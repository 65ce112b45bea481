//! Tests for the meal subscription service.

use std::sync::Mutex as StdMutex;
use std::time::Duration;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MealRepositoryError, MockMealRepository};
use crate::domain::{ErrorCode, UserName};

#[derive(Default)]
struct MemoryMeals {
    meals: StdMutex<Option<Vec<Meal>>>,
}

impl MemoryMeals {
    fn snapshot(&self) -> Vec<Meal> {
        self.meals
            .lock()
            .expect("meals lock")
            .clone()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MealRepository for MemoryMeals {
    async fn load_all(&self) -> Result<Vec<Meal>, MealRepositoryError> {
        self.meals
            .lock()
            .expect("meals lock")
            .clone()
            .ok_or(MealRepositoryError::NotFound)
    }

    async fn save_all(&self, meals: &[Meal]) -> Result<(), MealRepositoryError> {
        *self.meals.lock().expect("meals lock") = Some(meals.to_vec());
        Ok(())
    }
}

fn service_over<R: MealRepository>(repo: Arc<R>) -> SubscriptionService<R> {
    SubscriptionService::new(Arc::new(MealStore::new(repo, Duration::from_secs(5))))
}

fn caller(name: &str, admin: bool) -> CallerIdentity {
    CallerIdentity::new(
        UserName::new(name).expect("valid user name"),
        format!("{name}@example.com"),
        admin,
    )
}

fn offering(tag: &str) -> NewMeal {
    NewMeal {
        breakfast: format!("{tag}-b"),
        lunch: format!("{tag}-l"),
        dinner: format!("{tag}-d"),
    }
}

#[fixture]
fn repo() -> Arc<MemoryMeals> {
    Arc::new(MemoryMeals::default())
}

#[rstest]
#[tokio::test]
async fn listing_an_uninitialised_collection_is_empty(repo: Arc<MemoryMeals>) {
    let service = service_over(repo);
    let meals = service
        .list_meals(&caller("ada", false))
        .await
        .expect("list succeeds");
    assert!(meals.is_empty());
}

#[rstest]
#[tokio::test]
async fn add_meal_appends_with_empty_subscribers(repo: Arc<MemoryMeals>) {
    let service = service_over(repo.clone());
    let ada = caller("ada", false);

    let first = service.add_meal(&ada, offering("one")).await.expect("added");
    let second = service.add_meal(&ada, offering("two")).await.expect("added");

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
    let stored = repo.snapshot();
    assert_eq!(stored.len(), 2);
    assert!(stored[1].subscribers().is_empty());
    assert_eq!(stored[1].breakfast(), "two-b");
}

#[rstest]
#[tokio::test]
async fn listing_projects_the_callers_subscription(repo: Arc<MemoryMeals>) {
    let service = service_over(repo);
    let ada = caller("ada", false);
    let bob = caller("bob", false);
    service.add_meal(&ada, offering("one")).await.expect("added");
    service.add_meal(&ada, offering("two")).await.expect("added");
    service
        .subscribe(&ada, MealIndex::new(1))
        .await
        .expect("subscribed");

    let for_ada = service.list_meals(&ada).await.expect("listed");
    let for_bob = service.list_meals(&bob).await.expect("listed");

    let flags = |summaries: &[MealSummary]| -> Vec<bool> {
        summaries.iter().map(|summary| summary.subscribed).collect()
    };
    assert_eq!(flags(&for_ada), vec![false, true]);
    assert_eq!(flags(&for_bob), vec![false, false]);
}

#[rstest]
#[tokio::test]
async fn repeated_subscribes_are_idempotent(repo: Arc<MemoryMeals>) {
    let service = service_over(repo.clone());
    let ada = caller("ada", false);
    service.add_meal(&ada, offering("one")).await.expect("added");

    for _ in 0..3 {
        service
            .subscribe(&ada, MealIndex::new(0))
            .await
            .expect("subscribed");
    }

    assert_eq!(repo.snapshot()[0].subscribers().len(), 1);
}

#[rstest]
#[tokio::test]
async fn subscribe_then_unsubscribe_restores_subscribers(repo: Arc<MemoryMeals>) {
    let service = service_over(repo.clone());
    let ada = caller("ada", false);
    let bob = caller("bob", false);
    service.add_meal(&ada, offering("one")).await.expect("added");
    service
        .subscribe(&bob, MealIndex::new(0))
        .await
        .expect("subscribed");
    let before = repo.snapshot()[0].subscribers().to_vec();

    service
        .subscribe(&ada, MealIndex::new(0))
        .await
        .expect("subscribed");
    service
        .unsubscribe(&ada, MealIndex::new(0))
        .await
        .expect("unsubscribed");

    assert_eq!(repo.snapshot()[0].subscribers(), before.as_slice());
}

#[tokio::test]
async fn subscribing_out_of_range_is_not_found_and_writes_nothing() {
    let mut repo = MockMealRepository::new();
    repo.expect_load_all()
        .times(1)
        .return_once(|| Ok(vec![Meal::new(offering("only"))]));
    repo.expect_save_all().never();

    let service = service_over(Arc::new(repo));
    let err = service
        .subscribe(&caller("ada", false), MealIndex::new(1))
        .await
        .expect_err("out of range");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(0, "ada is not subscribed")]
#[case(5, "meal 5 not found")]
#[tokio::test]
async fn unsubscribe_rejects_unknown_targets(
    repo: Arc<MemoryMeals>,
    #[case] index: usize,
    #[case] expected_message: &str,
) {
    let service = service_over(repo.clone());
    let ada = caller("ada", false);
    service.add_meal(&ada, offering("one")).await.expect("added");
    service
        .subscribe(&caller("bob", false), MealIndex::new(0))
        .await
        .expect("subscribed");

    let err = service
        .unsubscribe(&ada, MealIndex::new(index))
        .await
        .expect_err("nothing to remove");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(err.message().starts_with(expected_message));
    assert_eq!(repo.snapshot()[0].subscribers().len(), 1);
}

#[rstest]
#[case(true, true)]
#[case(false, false)]
#[tokio::test]
async fn full_view_is_admin_only(
    repo: Arc<MemoryMeals>,
    #[case] admin: bool,
    #[case] allowed: bool,
) {
    let service = service_over(repo);
    let ada = caller("ada", false);
    service.add_meal(&ada, offering("one")).await.expect("added");
    service
        .subscribe(&ada, MealIndex::new(0))
        .await
        .expect("subscribed");

    let result = service
        .list_meals_with_subscribers(&caller("root", admin))
        .await;

    match (allowed, result) {
        (true, Ok(meals)) => assert_eq!(meals[0].subscribers(), ada_subscribers().as_slice()),
        (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Forbidden),
        (true, Err(err)) => panic!("expected full view, got error: {err:?}"),
        (false, Ok(meals)) => panic!("expected forbidden, got {} meals", meals.len()),
    }
}

fn ada_subscribers() -> Vec<UserName> {
    vec![UserName::new("ada").expect("valid user name")]
}
