use crate::database::ConnectionPool;
use crate::schema::reservations;
use crate::Error;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Reservation {
    pub id: i32,
    pub room_number: i32,
    pub client_id: i32,
    pub date_in: NaiveDate,
    pub date_out: NaiveDate,
}

/// The four caller supplied fields of a reservation, used both to create a
/// row and to replace the fields of an existing one.
///
/// Values are bound as-is, nothing checks that `date_out` follows `date_in`
/// or that the room is free.
#[derive(Insertable, AsChangeset, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = reservations)]
pub struct NewReservation {
    pub room_number: i32,
    pub client_id: i32,
    pub date_in: NaiveDate,
    pub date_out: NaiveDate,
}

impl NewReservation {
    pub fn new(room_number: i32, client_id: i32, date_in: NaiveDate, date_out: NaiveDate) -> Self {
        Self {
            room_number,
            client_id,
            date_in,
            date_out,
        }
    }
}

pub struct ReservationRepository {
    pool: ConnectionPool,
}

impl ReservationRepository {
    pub(crate) fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// All reservations in the order the database returns them.
    pub fn list_all(&self) -> Result<Vec<Reservation>, Error> {
        debug!("listing reservations");
        logged("fetching reservations", || {
            let mut conn = self.pool.get()?;
            Ok(reservations::table
                .select(Reservation::as_select())
                .load(&mut conn)?)
        })
    }

    pub fn get(&self, id: i32) -> Result<Reservation, Error> {
        debug!(id, "fetching reservation");
        logged("fetching reservation", || {
            let mut conn = self.pool.get()?;
            reservations::table
                .find(id)
                .select(Reservation::as_select())
                .first(&mut conn)
                .optional()?
                .ok_or(Error::NotFound(id))
        })
    }

    /// Inserts a reservation and returns it with its newly assigned id.
    pub fn create(&self, new: &NewReservation) -> Result<Reservation, Error> {
        debug!(?new, "making reservation");
        let created = logged("making reservation", || {
            let mut conn = self.pool.get()?;
            Ok(diesel::insert_into(reservations::table)
                .values(new)
                .returning(Reservation::as_returning())
                .get_result(&mut conn)?)
        })?;
        info!(id = created.id, "reservation created");
        Ok(created)
    }

    /// Replaces all four fields of reservation `id`.
    pub fn update(&self, id: i32, changes: &NewReservation) -> Result<Reservation, Error> {
        debug!(id, ?changes, "editing reservation");
        let updated = logged("editing reservation", || {
            let mut conn = self.pool.get()?;
            let rows = diesel::update(reservations::table.find(id))
                .set(changes)
                .returning(Reservation::as_returning())
                .get_results(&mut conn)?;
            single_row(id, rows)
        })?;
        info!(id, "reservation updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i32) -> Result<(), Error> {
        debug!(id, "removing reservation");
        logged("removing reservation", || {
            let mut conn = self.pool.get()?;
            let affected = diesel::delete(reservations::table.find(id)).execute(&mut conn)?;
            match affected {
                0 => Err(Error::NotFound(id)),
                1 => Ok(()),
                actual => Err(Error::UnexpectedRowCount {
                    expected: 1,
                    actual,
                }),
            }
        })?;
        info!(id, "reservation removed");
        Ok(())
    }
}

fn single_row(id: i32, mut rows: Vec<Reservation>) -> Result<Reservation, Error> {
    match rows.len() {
        0 => Err(Error::NotFound(id)),
        1 => Ok(rows.remove(0)),
        actual => Err(Error::UnexpectedRowCount {
            expected: 1,
            actual,
        }),
    }
}

/// Runs a store operation and logs its failure before handing it back.
fn logged<T>(operation: &str, f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    f().map_err(|e| {
        error!(error = %e, "error {operation}");
        e
    })
}
