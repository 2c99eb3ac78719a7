use crate::{
    auth::middleware::AuthUser,
    booking::{BookingConfirmation, BookingRequest, BookingSelector, BookingSummary},
    catalog,
    types::Result,
};
use axum::Json;
use tracing::info;

/// Price and completeness of a selection
#[utoipa::path(
    post,
    path = "/api/bookings/quote",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Current selection", body = BookingSummary),
        (status = 400, description = "Slot or medium not offered"),
        (status = 404, description = "Unknown counselor")
    ),
    security(("bearer_auth" = [])),
    tag = "bookings"
)]
pub async fn quote(Json(payload): Json<BookingRequest>) -> Result<Json<BookingSummary>> {
    let selector = BookingSelector::from_request(catalog::counselors(), &payload)?;
    Ok(Json(selector.summary()))
}

/// Confirm a booking
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking confirmed", body = BookingConfirmation),
        (status = 400, description = "Incomplete or invalid selection"),
        (status = 404, description = "Unknown counselor")
    ),
    security(("bearer_auth" = [])),
    tag = "bookings"
)]
pub async fn confirm(
    AuthUser(principal): AuthUser,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>> {
    let confirmation =
        BookingSelector::from_request(catalog::counselors(), &payload)?.confirm()?;

    info!(
        user_id = %principal.id(),
        counselor_id = %confirmation.counselor_id,
        time = %confirmation.time,
        "booking confirmed"
    );
    Ok(Json(confirmation))
}
