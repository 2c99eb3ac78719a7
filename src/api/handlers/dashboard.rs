use crate::{
    dashboard::{AdminTab, CounselorTab, DashboardPage, DashboardQuery, DashboardTab, UserTab},
    types::Result,
};
use axum::{extract::Query, Json};

fn render<T: DashboardTab>(query: &DashboardQuery) -> Result<Json<DashboardPage<T>>> {
    Ok(Json(query.view::<T>()?.page()))
}

/// Member dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/user",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Overview, sessions, progress or profile tab"),
        (status = 303, description = "Not signed in or not a member"),
        (status = 400, description = "Unknown tab")
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn user_dashboard(
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardPage<UserTab>>> {
    render(&query)
}

/// Counselor dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/counselor",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Overview, schedule, clients or earnings tab"),
        (status = 303, description = "Not signed in or not a counselor"),
        (status = 400, description = "Unknown tab")
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn counselor_dashboard(
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardPage<CounselorTab>>> {
    render(&query)
}

/// Admin dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Overview, users, content or reports tab"),
        (status = 303, description = "Not signed in or not an admin"),
        (status = 400, description = "Unknown tab")
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn admin_dashboard(
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardPage<AdminTab>>> {
    render(&query)
}
