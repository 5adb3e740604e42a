//! Handlers for the appointment API. Each one parses the request, calls the
//! service and shapes the JSON reply.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDateTime;

use super::dto::{BookingForm, CancelQuery, DataResponse, DatesQuery, HealthResponse, SlotQuery};
use super::error::AppError;
use super::state::AppState;
use crate::core::slots::MAX_AVAILABLE_DAYS;
use crate::domain::model::{AppointmentType, BookingRequest, SLOT_FORMAT};

pub type HandlerResult<T> = Result<Json<DataResponse<T>>, AppError>;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = state.service.now();
    Json(HealthResponse {
        status: "ok".to_string(),
        timezone: state.service.timezone().name().to_string(),
        now: now.format(SLOT_FORMAT).to_string(),
    })
}

/// GET /api/termins?date=YYYY-MM-DD
pub async fn get_time_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> HandlerResult<Vec<String>> {
    let date = query
        .date
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Datum ist erforderlich".to_string()))?;

    let slots = state.service.time_slots(&date).map_err(AppError::not_found)?;
    if slots.is_empty() {
        return Err(AppError::NotFound("Keine Termine".to_string()));
    }

    Ok(Json(DataResponse::new(slots)))
}

/// GET /api/dates?days=N
pub async fn get_available_dates(
    State(state): State<AppState>,
    Query(query): Query<DatesQuery>,
) -> HandlerResult<Vec<String>> {
    let days = query.days.unwrap_or(state.available_days);
    if days == 0 || days > MAX_AVAILABLE_DAYS {
        return Err(AppError::BadRequest(format!(
            "days muss zwischen 1 und {} liegen",
            MAX_AVAILABLE_DAYS
        )));
    }

    Ok(Json(DataResponse::new(state.service.available_dates(days))))
}

/// POST /api/termins
pub async fn book_appointment(
    State(state): State<AppState>,
    payload: Result<Json<BookingForm>, JsonRejection>,
) -> HandlerResult<String> {
    let Json(form) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let start = NaiveDateTime::parse_from_str(form.date.trim(), SLOT_FORMAT)
        .map_err(|e| AppError::BadRequest(format!("Ungültiges Datum '{}': {}", form.date, e)))?;
    let appointment_type: AppointmentType = form.kind.parse()?;

    let request = BookingRequest {
        name: form.name,
        email: form.email,
        phone: form.phone,
        description: form.desc,
        appointment_type,
        start,
    };

    let appointment = state.service.book(request).await?;
    Ok(Json(DataResponse::new(appointment.to_string())))
}

/// DELETE /api/termins?key=...
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Query(query): Query<CancelQuery>,
) -> HandlerResult<String> {
    let key = query
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("key ist erforderlich".to_string()))?;

    state
        .service
        .cancel(&key)
        .await
        .map_err(|e| AppError::Engine(StatusCode::BAD_REQUEST, e))?;

    Ok(Json(DataResponse::new("Termin gelöscht".to_string())))
}
