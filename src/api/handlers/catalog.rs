use crate::{
    catalog::{
        self, Counselor, CounselorQuery, EventListing, EventQuery, FilterOptions, Resource,
        ResourceQuery,
    },
    types::{AppError, Result},
};
use axum::{
    extract::{Path, Query},
    Json,
};

/// Filter choices for the counselor, event and resource listings
#[utoipa::path(
    get,
    path = "/api/catalog/filters",
    responses((status = 200, description = "Filter options", body = FilterOptions)),
    tag = "catalog"
)]
pub async fn filters() -> Json<FilterOptions> {
    Json(catalog::filter_options())
}

/// List counselors
#[utoipa::path(
    get,
    path = "/api/counselors",
    params(CounselorQuery),
    responses((status = 200, description = "Matching counselors", body = [Counselor])),
    tag = "catalog"
)]
pub async fn list_counselors(Query(query): Query<CounselorQuery>) -> Json<Vec<Counselor>> {
    Json(
        query
            .apply(catalog::counselors())
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// Get one counselor
#[utoipa::path(
    get,
    path = "/api/counselors/{id}",
    params(("id" = String, Path, description = "Counselor id")),
    responses(
        (status = 200, description = "Counselor", body = Counselor),
        (status = 404, description = "Not found")
    ),
    tag = "catalog"
)]
pub async fn get_counselor(Path(id): Path<String>) -> Result<Json<Counselor>> {
    catalog::find_counselor(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Counselor {} not found", id)))
}

/// List events
#[utoipa::path(
    get,
    path = "/api/events",
    params(EventQuery),
    responses((status = 200, description = "Matching events", body = [EventListing])),
    tag = "catalog"
)]
pub async fn list_events(Query(query): Query<EventQuery>) -> Json<Vec<EventListing>> {
    Json(
        query
            .apply(catalog::events())
            .into_iter()
            .map(EventListing::from)
            .collect(),
    )
}

/// List resources
#[utoipa::path(
    get,
    path = "/api/resources",
    params(ResourceQuery),
    responses((status = 200, description = "Matching resources", body = [Resource])),
    tag = "catalog"
)]
pub async fn list_resources(Query(query): Query<ResourceQuery>) -> Json<Vec<Resource>> {
    Json(
        query
            .apply(catalog::resources())
            .into_iter()
            .cloned()
            .collect(),
    )
}
