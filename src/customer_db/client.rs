use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

use crate::customer_db::{
    connection::CustomerDbConfig,
    directory::CustomerDirectory,
    error::{Error, Result},
    queries::{self, CUSTOMER_KEY},
    types::CustomerProfile,
};

/// One open database connection
///
/// Dropping the session drops the client, which ends the connection task, so
/// the connection is released on every path out of a lookup. [`Session::close`]
/// additionally waits for the teardown to finish.
pub struct Session {
    client: Client,
    connection: JoinHandle<()>,
}

impl Session {
    /// Open a new connection
    pub async fn open(config: &CustomerDbConfig) -> Result<Self> {
        let (client, connection) = config
            .pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| Error::ConnectionError(e.to_string()))?;

        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "customer database connection failed");
            }
        });

        tracing::debug!(host = %config.host, database = %config.database, "opened customer database connection");

        Ok(Self { client, connection })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Close the connection and wait for it to shut down
    pub async fn close(self) {
        drop(self.client);
        if let Err(e) = self.connection.await {
            tracing::warn!(error = %e, "customer database connection task did not finish cleanly");
        }
        tracing::debug!("closed customer database connection");
    }
}

/// Customer directory backed by PostgreSQL, one connection per lookup
#[derive(Debug, Clone)]
pub struct CustomerDb {
    config: CustomerDbConfig,
}

impl CustomerDb {
    /// Create a new customer database client
    ///
    /// No connection is opened until the first lookup.
    pub fn new(config: CustomerDbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CustomerDbConfig {
        &self.config
    }
}

/// Run the three lookups on an open connection
async fn load_profile(client: &Client, digits: &str) -> Result<Option<CustomerProfile>> {
    let customer = match queries::find_customer(client, digits).await? {
        Some(customer) => customer,
        None => return Ok(None),
    };
    tracing::debug!(customer = ?customer, "customer found");

    let key = customer.key_text(CUSTOMER_KEY).ok_or_else(|| {
        Error::DecodeError(format!("customer row has no usable {} column", CUSTOMER_KEY))
    })?;

    let orders = queries::orders_due(client, &key).await?;
    tracing::debug!(customer_key = %key, orders = ?orders, "due orders found");

    let numbers = queries::active_numbers(client, &key).await?;
    tracing::debug!(customer_key = %key, numbers = ?numbers, "active numbers found");

    Ok(Some(CustomerProfile {
        customer,
        orders,
        numbers,
    }))
}

#[async_trait]
impl CustomerDirectory for CustomerDb {
    async fn find_by_phone(&self, digits: &str) -> Result<Option<CustomerProfile>> {
        let session = Session::open(&self.config).await?;
        let result = load_profile(session.client(), digits).await;
        session.close().await;
        result
    }
}
