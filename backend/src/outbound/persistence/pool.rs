//! Pooled async PostgreSQL connections shared by the Diesel repositories.
//!
//! `diesel-async` drives the connections natively and `bb8` owns checkout,
//! so repository calls never park a runtime worker. Pool failures surface as
//! [`PoolError`] and each repository maps them to its own `Connection`
//! variant.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 1;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available within the checkout timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Checkout failure with `message`.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build failure with `message`.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing and timeouts.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use tenders::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://tenders@localhost/tenders")
///     .with_max_size(4)
///     .with_checkout_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: ten connections, one kept idle, thirty second checkout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(DEFAULT_MIN_IDLE),
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the number of open connections. Zero is raised to one.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Connections kept open while idle.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a checkout waits before failing.
    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// Connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum pool size.
    #[must_use]
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration or the
    /// initial idle connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle.map(|idle| idle.min(config.max_size)))
            .connection_timeout(config.checkout_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        debug!(max_size = config.max_size, "database pool ready");
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// Returns [`PoolError::Checkout`] when the timeout elapses first.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
