//! Meal listing, creation and subscription handlers.
//!
//! ```text
//! GET    /meals
//! POST   /meals          {"breakfast":"Porridge","lunch":"Soup","dinner":"Risotto"}
//! PUT    /meals/{index}  subscribe
//! DELETE /meals/{index}  unsubscribe
//! GET    /admin/meals    admin only
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Meal, MealIndex, MealSummary, MealValidationError, NewMeal};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::responses::{MealCreatedResponse, MessageResponse};
use crate::inbound::http::state::HttpState;

/// Meal body for `POST /meals`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMealRequest {
    #[schema(example = "Porridge")]
    pub breakfast: String,
    #[schema(example = "Lentil soup")]
    pub lunch: String,
    #[schema(example = "Risotto")]
    pub dinner: String,
}

impl TryFrom<AddMealRequest> for NewMeal {
    type Error = MealValidationError;

    fn try_from(value: AddMealRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.breakfast, &value.lunch, &value.dinner)
    }
}

fn map_meal_validation_error(err: MealValidationError) -> Error {
    let message = err.to_string();
    match err {
        MealValidationError::EmptyCourse(course) => Error::invalid_request(message)
            .with_details(json!({ "field": course, "code": "empty_field" })),
    }
}

/// Parse a path segment; anything that is not a position names no meal.
fn parse_index(raw: &str) -> Result<MealIndex, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("meal {raw} not found")))
}

/// List meals with the caller's subscription flag.
#[utoipa::path(
    get,
    path = "/meals",
    responses(
        (status = 200, description = "Meals in positional order", body = [MealSummary]),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["meals"],
    operation_id = "listMeals",
    security(("bearer" = []))
)]
#[get("/meals")]
pub async fn list_meals(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<MealSummary>>> {
    let meals = state.meals_query.list_meals(caller.identity()).await?;
    Ok(web::Json(meals))
}

/// Append a meal to the collection.
#[utoipa::path(
    post,
    path = "/meals",
    request_body = AddMealRequest,
    responses(
        (status = 200, description = "Meal added", body = MealCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["meals"],
    operation_id = "addMeal",
    security(("bearer" = []))
)]
#[post("/meals")]
pub async fn add_meal(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<AddMealRequest>,
) -> ApiResult<web::Json<MealCreatedResponse>> {
    let offering = NewMeal::try_from(payload.into_inner()).map_err(map_meal_validation_error)?;
    let index = state
        .meals_command
        .add_meal(caller.identity(), offering)
        .await?;
    Ok(web::Json(MealCreatedResponse {
        ok: true,
        message: "meal added".to_owned(),
        index: index.get(),
    }))
}

/// Subscribe the caller to a meal. Repeat subscriptions are no-ops.
#[utoipa::path(
    put,
    path = "/meals/{index}",
    params(("index" = usize, Path, description = "Meal position")),
    responses(
        (status = 200, description = "Subscribed", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 404, description = "Unknown meal", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["meals"],
    operation_id = "subscribe",
    security(("bearer" = []))
)]
#[put("/meals/{index}")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let index = parse_index(&path)?;
    state
        .meals_command
        .subscribe(caller.identity(), index)
        .await?;
    Ok(web::Json(MessageResponse::ok("subscribed")))
}

/// Remove the caller from a meal's subscribers.
#[utoipa::path(
    delete,
    path = "/meals/{index}",
    params(("index" = usize, Path, description = "Meal position")),
    responses(
        (status = 200, description = "Unsubscribed", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 404, description = "Unknown meal or not subscribed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["meals"],
    operation_id = "unsubscribe",
    security(("bearer" = []))
)]
#[delete("/meals/{index}")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let index = parse_index(&path)?;
    state
        .meals_command
        .unsubscribe(caller.identity(), index)
        .await?;
    Ok(web::Json(MessageResponse::ok("unsubscribed")))
}

/// Full meal records including subscribers.
#[utoipa::path(
    get,
    path = "/admin/meals",
    responses(
        (status = 200, description = "Meals with subscribers", body = [Meal]),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["admin"],
    operation_id = "listMealsWithSubscribers",
    security(("bearer" = []))
)]
#[get("/admin/meals")]
pub async fn list_meals_with_subscribers(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<Meal>>> {
    let meals = state
        .meals_query
        .list_meals_with_subscribers(caller.identity())
        .await?;
    Ok(web::Json(meals))
}

#[cfg(test)]
#[path = "meals_tests.rs"]
mod tests;
