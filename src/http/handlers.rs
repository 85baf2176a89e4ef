//! Endpoint handlers for `/country`.
//!
//! Each handler extracts its input, calls one catalog operation, and maps the
//! outcome onto the response envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::CatalogError;
use crate::http::request::{ListParams, SortParams};
use crate::http::response::{internal_error, not_found, Envelope, COUNTRY_NOT_FOUND};
use crate::http::server::AppState;
use crate::models::NewCountry;

/// Body of `POST /country`: one payload or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CountryPayload {
    Many(Vec<NewCountry>),
    One(NewCountry),
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /country?page&limit&sort_by&search`
pub async fn list_countries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let request = params.into_page_request(&state.pagination);
    match state.catalog.list_page(&request) {
        Ok(page) => Envelope::new("Country list", page).respond(StatusCode::OK),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list countries");
            internal_error(None)
        }
    }
}

/// `GET /country/sorted?sort_by`
pub async fn list_countries_sorted(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Response {
    match state.catalog.list_sorted(params.sort_key()) {
        Ok(list) => Envelope::new("Country list", json!({ "list": list })).respond(StatusCode::OK),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list sorted countries");
            internal_error(None)
        }
    }
}

/// `GET /country/{id}`
pub async fn get_country(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog.get(&id) {
        Ok(country) => {
            Envelope::new("Country detail", json!({ "country": country })).respond(StatusCode::OK)
        }
        Err(CatalogError::NotFound) => not_found(COUNTRY_NOT_FOUND),
        Err(e) => {
            tracing::error!(country_id = %id, error = %e, "Failed to load country");
            internal_error(None)
        }
    }
}

/// `POST /country`
pub async fn add_countries(
    State(state): State<AppState>,
    body: Result<Json<CountryPayload>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Unreadable country payload");
            return internal_error(None);
        }
    };

    let (single, payloads) = match payload {
        CountryPayload::One(country) => (true, vec![country]),
        CountryPayload::Many(countries) => (false, countries),
    };

    match state.catalog.add_countries(payloads) {
        Ok(saved) => {
            let (message, data) = match saved.as_slice() {
                [country] if single => ("Country added successfully", json!({ "country": country })),
                _ => ("Countries added successfully", json!({ "countries": saved })),
            };
            Envelope::new(message, data).respond(StatusCode::CREATED)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to add countries");
            internal_error(None)
        }
    }
}

/// `GET /country/{id}/neighbour`
pub async fn get_country_neighbors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.neighbors_of(&id) {
        Ok(list) => {
            Envelope::new("Country neighbors", json!({ "list": list })).respond(StatusCode::OK)
        }
        Err(CatalogError::NotFound) => not_found(COUNTRY_NOT_FOUND),
        Err(e) => {
            tracing::error!(country_id = %id, error = %e, "Failed to load neighbors");
            internal_error(Some(e.to_string()))
        }
    }
}

/// `POST /country/{id}/neighbors` with a JSON array of candidate ids.
pub async fn add_neighbors(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Vec<String>>, JsonRejection>,
) -> Response {
    let candidates = match body {
        Ok(Json(candidates)) => candidates,
        Err(rejection) => {
            tracing::warn!(country_id = %id, error = %rejection.body_text(), "Unreadable neighbor list");
            return internal_error(Some(rejection.body_text()));
        }
    };

    match state.catalog.add_neighbors(&id, candidates) {
        Ok(outcome) if outcome.is_rejected() => Envelope::new(
            "Failed to add neighbors",
            json!({ "neighbors": [], "errors": outcome.errors }),
        )
        .respond(StatusCode::BAD_REQUEST),
        Ok(outcome) => Envelope::new(
            "Neighbors added successfully",
            json!({ "neighbors": outcome.added }),
        )
        .with_errors(outcome.errors)
        .respond(StatusCode::OK),
        Err(CatalogError::NotFound) => not_found(COUNTRY_NOT_FOUND),
        Err(e) => {
            tracing::error!(country_id = %id, error = %e, "Failed to add neighbors");
            internal_error(Some(e.to_string()))
        }
    }
}

/// Any path outside the route table.
pub async fn route_not_found() -> impl IntoResponse {
    not_found("Route not found")
}
