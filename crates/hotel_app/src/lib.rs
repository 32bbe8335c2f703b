use hotel_server::{Server, ServerState};
use hotel_store::{HotelStore, Update};
use config::{Environment, File};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] hotel_store::Error),

    #[error(transparent)]
    Server(#[from] hotel_server::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("failed to bind listener: {0}")]
    Listen(#[from] std::io::Error),
}

#[derive(serde::Deserialize, Debug)]
pub struct HotelConfig {
    pub server: hotel_server::Config,
    pub store: hotel_store::Config,
}

impl HotelConfig {
    /// Loads `config/default`, then the optional `config/local`, then
    /// `HOTEL_`-prefixed environment variables such as `HOTEL_STORE__URL`.
    pub fn new() -> Result<Self, Error> {
        let c = config::Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("hotel")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(c.try_deserialize()?)
    }
}

/// Facade encompassing all components that make up the `hotel` application.
pub struct HotelApp {
    config: HotelConfig,
}

impl HotelApp {
    pub fn new(config: HotelConfig) -> Self {
        Self { config }
    }

    /// Opens the configured store and applies any pending migrations.
    pub fn open_store(&self) -> Result<HotelStore, Error> {
        let store = HotelStore::open_with(&self.config.store)?;

        if store.has_updates()? {
            info!("applying updates to hotel store");
            store.update()?;
        }

        Ok(store)
    }

    pub async fn run(&self) -> Result<(), Error> {
        let store = self.open_store()?;

        // listenfd is used to enable auto-reloading in development
        // otherwise fallback to standard tcp listener
        let listener = match listenfd::ListenFd::from_env().take_tcp_listener(0)? {
            Some(listener) => listener,
            None => std::net::TcpListener::bind(format!(
                "{}:{}",
                self.config.server.url, self.config.server.port
            ))?,
        };

        info!("listening on {:?}", listener.local_addr()?);

        Ok(Server::serve(listener, ServerState { store }).await?)
    }
}
