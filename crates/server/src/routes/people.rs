use axum::extract::{rejection::QueryRejection, Query, State};
use models::{person::require, Person};
use service::ServiceError;

use crate::errors::ApiError;
use crate::response::JsonUtf8;
use crate::startup::AppState;

/// Raw query pairs in request order; a repeated key keeps its first value.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// `GET /createPerson?name=..&age=..`
pub async fn create_person(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<JsonUtf8<Person>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let person = Person::from_params(first(&pairs, "name"), first(&pairs, "age")).map_err(ServiceError::from)?;
    let created = state.store.create(person).await?;
    Ok(JsonUtf8(created))
}

/// `GET /findPerson?name=..`
pub async fn find_person(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<JsonUtf8<Person>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let name = require(first(&pairs, "name"), "name").map_err(ServiceError::from)?;
    let person = state.store.find(name).await?;
    Ok(JsonUtf8(person))
}
