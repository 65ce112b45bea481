//! Meal records and the caller-facing projections derived from them.
//!
//! Meals live in one ordered collection and are addressed by position. There
//! is no deletion, so a [`MealIndex`] stays valid once issued; nothing in the
//! type system enforces that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserName;

/// Validation error for a new meal offering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealValidationError {
    /// The named course was missing or blank once trimmed.
    EmptyCourse(&'static str),
}

impl fmt::Display for MealValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCourse(course) => write!(f, "{course} must not be empty"),
        }
    }
}

impl std::error::Error for MealValidationError {}

/// Breakfast, lunch and dinner offering supplied when adding a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl NewMeal {
    /// Build an offering from caller input, rejecting blank courses.
    ///
    /// # Examples
    /// ```
    /// use meals::domain::{MealValidationError, NewMeal};
    ///
    /// assert!(NewMeal::try_from_parts("Porridge", "Soup", "Risotto").is_ok());
    /// assert_eq!(
    ///     NewMeal::try_from_parts("Porridge", " ", "Risotto"),
    ///     Err(MealValidationError::EmptyCourse("lunch")),
    /// );
    /// ```
    pub fn try_from_parts(
        breakfast: &str,
        lunch: &str,
        dinner: &str,
    ) -> Result<Self, MealValidationError> {
        let course = |name: &'static str, value: &str| {
            if value.trim().is_empty() {
                Err(MealValidationError::EmptyCourse(name))
            } else {
                Ok(value.to_owned())
            }
        };
        Ok(Self {
            breakfast: course("breakfast", breakfast)?,
            lunch: course("lunch", lunch)?,
            dinner: course("dinner", dinner)?,
        })
    }
}

/// One day's offering plus the users subscribed to it.
///
/// ## Invariants
/// - `subscribers` holds no duplicate user names; [`Meal::subscribe`] and
///   [`Meal::from_parts`] both enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    breakfast: String,
    lunch: String,
    dinner: String,
    #[schema(value_type = Vec<String>)]
    subscribers: Vec<UserName>,
}

impl Meal {
    /// Build a meal with no subscribers.
    pub fn new(offering: NewMeal) -> Self {
        let NewMeal {
            breakfast,
            lunch,
            dinner,
        } = offering;
        Self {
            breakfast,
            lunch,
            dinner,
            subscribers: Vec::new(),
        }
    }

    /// Rebuild a stored meal, dropping repeated subscriber entries while
    /// keeping first-occurrence order.
    pub fn from_parts(offering: NewMeal, subscribers: Vec<UserName>) -> Self {
        let mut meal = Self::new(offering);
        for subscriber in subscribers {
            meal.subscribe(&subscriber);
        }
        meal
    }

    /// Breakfast dish.
    pub fn breakfast(&self) -> &str {
        self.breakfast.as_str()
    }

    /// Lunch dish.
    pub fn lunch(&self) -> &str {
        self.lunch.as_str()
    }

    /// Dinner dish.
    pub fn dinner(&self) -> &str {
        self.dinner.as_str()
    }

    /// Subscribers in subscription order.
    pub fn subscribers(&self) -> &[UserName] {
        self.subscribers.as_slice()
    }

    /// Whether `user` is subscribed.
    pub fn has_subscriber(&self, user: &UserName) -> bool {
        self.subscribers.contains(user)
    }

    /// Add `user` unless already present. Returns `true` when the list changed.
    pub fn subscribe(&mut self, user: &UserName) -> bool {
        if self.has_subscriber(user) {
            return false;
        }
        self.subscribers.push(user.clone());
        true
    }

    /// Remove the first occurrence of `user`. Returns `false` when absent.
    pub fn unsubscribe(&mut self, user: &UserName) -> bool {
        match self.subscribers.iter().position(|s| s == user) {
            Some(position) => {
                self.subscribers.remove(position);
                true
            }
            None => false,
        }
    }

    /// Project the meal for `caller`, hiding the subscriber list.
    pub fn summary_for(&self, caller: &UserName) -> MealSummary {
        MealSummary {
            breakfast: self.breakfast.clone(),
            lunch: self.lunch.clone(),
            dinner: self.dinner.clone(),
            subscribed: self.has_subscriber(caller),
        }
    }
}

/// Caller-facing meal view: the offering plus whether the caller subscribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub subscribed: bool,
}

/// Errors raised while parsing a [`MealIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealIndexParseError;

impl fmt::Display for MealIndexParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meal index must be a non-negative integer")
    }
}

impl std::error::Error for MealIndexParseError {}

/// Position of a meal in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealIndex(usize);

impl MealIndex {
    /// Wrap a raw position.
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Raw position.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for MealIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MealIndex {
    type Err = MealIndexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self).map_err(|_| MealIndexParseError)
    }
}
