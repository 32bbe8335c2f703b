use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use hotel_store::NewReservation;

use crate::api::ApiError;

async fn list_reservations(State(state): State<crate::ServerState>) -> Result<Response, ApiError> {
    Ok(Json(state.store.reservations().list_all()?).into_response())
}

async fn make_reservation(
    State(state): State<crate::ServerState>,
    Json(body): Json<NewReservation>,
) -> Result<Response, ApiError> {
    let reservation = state.store.reservations().create(&body)?;
    Ok((StatusCode::CREATED, Json(reservation)).into_response())
}

async fn get_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    Ok(Json(state.store.reservations().get(id)?).into_response())
}

async fn edit_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i32>,
    Json(body): Json<NewReservation>,
) -> Result<Response, ApiError> {
    Ok(Json(state.store.reservations().update(id, &body)?).into_response())
}

async fn remove_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.store.reservations().delete(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn router() -> Router<crate::ServerState> {
    Router::new()
        .route("/", get(list_reservations).post(make_reservation))
        .route(
            "/:id",
            get(get_reservation)
                .put(edit_reservation)
                .delete(remove_reservation),
        )
}
