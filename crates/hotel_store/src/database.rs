use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::Config;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
pub(crate) const IN_MEMORY: &str = ":memory:";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) type ConnectionType = SqliteConnection;
pub(crate) type ConnectionPool = Pool<ConnectionManager<ConnectionType>>;

/// Pragmas applied to every connection the pool opens.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
    wal: bool,
}

impl CustomizeConnection<ConnectionType, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut ConnectionType) -> Result<(), diesel::r2d2::Error> {
        // busy_timeout first so switching the journal mode waits on other writers
        let mut pragmas = format!("PRAGMA busy_timeout = {};", self.busy_timeout.as_millis());
        if self.wal {
            pragmas.push_str(" PRAGMA journal_mode = WAL;");
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub(crate) fn connect(config: &Config) -> Result<ConnectionPool, crate::Error> {
    let in_memory = config.url == IN_MEMORY;
    let manager = ConnectionManager::<ConnectionType>::new(config.url.as_str());
    let mut builder = Pool::builder().connection_customizer(Box::new(ConnectionOptions {
        busy_timeout: config
            .busy_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT),
        wal: !in_memory,
    }));

    if in_memory {
        // every sqlite connection to :memory: is its own database, so the
        // pool must hold on to exactly one of them for its whole lifetime
        builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    } else if let Some(size) = config.pool_size {
        builder = builder.max_size(size.get());
    }

    if let Some(ms) = config.connection_timeout_ms {
        builder = builder.connection_timeout(Duration::from_millis(ms));
    }

    Ok(builder.build(manager)?)
}

pub(crate) fn has_pending_migrations(connection: &mut ConnectionType) -> Result<bool, crate::Error> {
    connection
        .has_pending_migration(MIGRATIONS)
        .map_err(|_| crate::Error::Migration("failed to check pending migrations".to_string()))
}

pub(crate) fn run_pending_migrations(connection: &mut ConnectionType) -> Result<(), crate::Error> {
    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|_| crate::Error::Migration("failed to run pending migrations".to_string()))?;

    Ok(())
}
