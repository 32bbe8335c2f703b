//! Persistence for hotel reservations.
//!
//! [`HotelStore`] owns the sqlite connection pool and hands out repositories
//! that share it. Every repository operation checks a connection out of the
//! pool for the duration of a single statement.
pub(crate) mod database;
pub mod error;
pub mod reservations;
pub mod schema;

use database::ConnectionPool;
use std::num::NonZeroU32;
pub use error::{Error, ErrorKind};
pub use reservations::{NewReservation, Reservation, ReservationRepository};
use tracing::info;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Config {
    /// Path of the sqlite database file, or `:memory:`
    pub url: String,
    /// Maximum number of pooled connections, r2d2's default when unset
    #[serde(default)]
    pub pool_size: Option<NonZeroU32>,
    /// How long to wait for a pooled connection, r2d2's default when unset
    #[serde(default)]
    pub connection_timeout_ms: Option<u64>,
    /// How long sqlite waits on a locked database before failing
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

impl Config {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            pool_size: None,
            connection_timeout_ms: None,
            busy_timeout_ms: None,
        }
    }
}

pub trait Update {
    fn has_updates(&self) -> Result<bool, Error>;
    fn update(&self) -> Result<(), Error>;
}

#[derive(Clone)]
pub struct HotelStore {
    pool: ConnectionPool,
}

impl HotelStore {
    pub fn open<S: Into<String>>(store_url: S) -> Result<Self, Error> {
        Ok(Self {
            pool: database::connect(&Config::new(store_url))?,
        })
    }

    pub fn open_with(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            pool: database::connect(config)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        Self::open(database::IN_MEMORY)
    }

    pub fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.pool.clone())
    }
}

impl Update for HotelStore {
    fn has_updates(&self) -> Result<bool, Error> {
        database::has_pending_migrations(&mut *self.pool.get()?)
    }

    fn update(&self) -> Result<(), Error> {
        database::run_pending_migrations(&mut *self.pool.get()?)?;
        info!("applied pending store migrations");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_has_updates() {
        let store = HotelStore::open_in_memory().unwrap();
        assert!(store.has_updates().unwrap());

        store.update().unwrap();
        assert!(!store.has_updates().unwrap());
    }

    #[test]
    fn test_open_with_config() {
        let config = Config {
            pool_size: NonZeroU32::new(4),
            ..Config::new(":memory:")
        };
        let store = HotelStore::open_with(&config).unwrap();
        store.update().unwrap();

        assert!(store.reservations().list_all().unwrap().is_empty());
    }

    #[test]
    fn test_unopenable_path_is_connectivity_error() {
        let config = Config {
            connection_timeout_ms: Some(200),
            ..Config::new("/nonexistent_dir/x/hotel.sqlite")
        };
        let Err(err) = HotelStore::open_with(&config) else {
            panic!("expected opening an unreachable store to fail");
        };

        assert_eq!(err.kind(), ErrorKind::Connectivity);
    }

    #[test]
    fn test_concurrent_creates_on_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotel.sqlite");
        let store = HotelStore::open(path.to_string_lossy()).unwrap();
        store.update().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let repo = store.reservations();
                    for i in 0..25 {
                        let new = NewReservation::new(
                            t * 100 + i,
                            t,
                            "2024-03-01".parse().unwrap(),
                            "2024-03-05".parse().unwrap(),
                        );
                        repo.create(&new).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.reservations().list_all().unwrap().len(), 200);
    }
}
