//! hotel-server
//!
//! JSON over HTTP access to the reservations kept in a [`hotel_store::HotelStore`].
//!
//! # Routes
//!
//! - `GET /healthcheck`
//! - `GET /api/v1/reservations` lists every reservation
//! - `POST /api/v1/reservations` makes a reservation
//! - `GET /api/v1/reservations/:id`
//! - `PUT /api/v1/reservations/:id` replaces the reservation's fields
//! - `DELETE /api/v1/reservations/:id`

pub(crate) mod api;
pub mod app;
pub mod error;
pub(crate) mod reservations;

pub use app::{Server, ServerState};
pub use error::Error;

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub url: String,
    pub port: u16,
}
