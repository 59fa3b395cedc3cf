//! SQL against the pre-existing customer schema
//!
//! Table and column names are mixed case, so they are quoted. Rows come back
//! through `row_to_json` (not `jsonb`, which would reorder keys) so every
//! column is carried without the service knowing the schema.

use tokio_postgres::Client;

use crate::customer_db::{
    error::{Error, Result},
    types::Record,
};

/// Customer primary key column
pub const CUSTOMER_KEY: &str = "UID";

/// Status code of an active provisioned number, compared as text so the
/// column's integer width does not matter
pub const ACTIVE_NUMBER_STATUS: &str = "2";

/// Candidate customers whose hyphen-stripped cell number contains the digits.
/// An exact match sorts first, then the lowest key. Two rows are fetched so
/// ambiguity can be reported.
const FIND_CUSTOMER_SQL: &str = r#"
SELECT row_to_json(c) AS record
FROM customer c
WHERE REPLACE(c."CCell", '-', '') LIKE $1
ORDER BY (REPLACE(c."CCell", '-', '') = $2) DESC, c."UID"
LIMIT 2
"#;

const ORDERS_DUE_SQL: &str = r#"
SELECT row_to_json(o) AS record
FROM "OrderDue" o
WHERE o."OID"::text = $1
"#;

const ACTIVE_NUMBERS_SQL: &str = r#"
SELECT d."DIDNumber"::text AS did_number
FROM "DIDS" d
WHERE d."Status"::text = $1 AND d."BOID"::text = $2 AND d."DIDNumber" IS NOT NULL
"#;

/// Find the customer whose stored cell number contains `digits`
///
/// `digits` must be non-empty and digit-only; an empty pattern would match
/// every customer.
pub async fn find_customer(client: &Client, digits: &str) -> Result<Option<Record>> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::ValidationError(format!(
            "phone lookup requires digits only, got {:?}",
            digits
        )));
    }

    let pattern = format!("%{}%", digits);
    let rows = client.query(FIND_CUSTOMER_SQL, &[&pattern, &digits]).await?;

    if rows.len() > 1 {
        tracing::warn!(
            digits = %digits,
            matches = rows.len(),
            "phone number matches more than one customer; using the best match"
        );
    }

    match rows.first() {
        Some(row) => {
            let value: serde_json::Value = row.try_get("record")?;
            Ok(Some(Record::from_json(value)?))
        }
        None => Ok(None),
    }
}

/// All due orders of a customer, one record per row
pub async fn orders_due(client: &Client, customer_key: &str) -> Result<Vec<Record>> {
    let rows = client.query(ORDERS_DUE_SQL, &[&customer_key]).await?;

    rows.iter()
        .map(|row| {
            let value: serde_json::Value = row.try_get("record")?;
            Record::from_json(value)
        })
        .collect()
}

/// Active provisioned numbers owned by a customer
pub async fn active_numbers(client: &Client, customer_key: &str) -> Result<Vec<String>> {
    let rows = client
        .query(ACTIVE_NUMBERS_SQL, &[&ACTIVE_NUMBER_STATUS, &customer_key])
        .await?;

    rows.iter()
        .map(|row| row.try_get::<_, String>("did_number").map_err(Error::from))
        .collect()
}
