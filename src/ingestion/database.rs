//! `SELECT * FROM <table>` ingestion from MySQL-compatible servers.
//!
//! The table name is never interpolated verbatim: it must be a plain identifier, optionally
//! qualified by a schema (`orders`, `shop.orders`), and is backtick-quoted before it reaches
//! the query text.
//!
//! The driver itself (`sqlx`, MySQL backend) sits behind the `mysql` feature; connection
//! parameters and identifier handling are always available.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IngestionError, IngestionResult};

#[cfg(feature = "mysql")]
use crate::types::DataSet;

#[cfg(feature = "mysql")]
use super::unified::IngestionOptions;

/// Host used when a request does not name one.
pub const DEFAULT_HOST: &str = "localhost";

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*(\.[A-Za-z_][A-Za-z0-9_$]*)?$")
        .expect("identifier pattern is valid")
});

/// Connection parameters for a MySQL-compatible server.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseParams {
    /// Database (schema) to connect to.
    pub db_name: String,
    /// Login user.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Server host name.
    pub host: String,
}

impl DatabaseParams {
    /// Create parameters for a server on [`DEFAULT_HOST`].
    pub fn new(
        db_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            db_name: db_name.into(),
            username: username.into(),
            password: password.into(),
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Override the server host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Source label for logs: `mysql://host/db/table`, without credentials.
    pub fn source_label(&self, table_name: &str) -> String {
        format!("mysql://{}/{}/{}", self.host, self.db_name, table_name)
    }
}

impl fmt::Debug for DatabaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseParams")
            .field("db_name", &self.db_name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

/// Validate `name` as a (optionally schema-qualified) identifier and backtick-quote each part.
pub fn quote_table_identifier(name: &str) -> IngestionResult<String> {
    if !IDENTIFIER.is_match(name) {
        return Err(IngestionError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(name
        .split('.')
        .map(|part| format!("`{part}`"))
        .collect::<Vec<_>>()
        .join("."))
}

/// The query used to materialize a whole table.
pub fn select_all_query(table_name: &str) -> IngestionResult<String> {
    Ok(format!("SELECT * FROM {}", quote_table_identifier(table_name)?))
}

/// Connect with `params`, run `SELECT * FROM <table_name>` and materialize every row.
///
/// The connection is opened for this call only and closed before returning. Outcomes are
/// reported to `options.observer` like file ingestion; an invalid `table_name` is rejected
/// before that and never reported.
#[cfg(feature = "mysql")]
pub async fn ingest_mysql_table(
    params: &DatabaseParams,
    table_name: &str,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let query = select_all_query(table_name)?;
    let ctx = super::observability::IngestionContext {
        source: params.source_label(table_name),
        format: super::unified::IngestionFormat::MySql,
    };
    let result = driver::fetch_table(params, &query).await;
    super::unified::report_outcome(options, &ctx, &result);
    result
}

/// Stand-in used when the crate is built without the `mysql` feature.
#[cfg(not(feature = "mysql"))]
pub async fn ingest_mysql_table(
    params: &DatabaseParams,
    table_name: &str,
    _options: &super::unified::IngestionOptions,
) -> IngestionResult<crate::types::DataSet> {
    let _ = (params, select_all_query(table_name)?);
    Err(IngestionError::Malformed {
        message: "mysql ingestion not enabled (enable cargo feature 'mysql')".to_string(),
    })
}

#[cfg(feature = "mysql")]
mod driver {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
    use sqlx::{Column, Connection, Executor, Row, Statement, TypeInfo};

    use crate::error::IngestionResult;
    use crate::ingestion::infer::{Cell, TableBuilder};
    use crate::types::DataSet;

    use super::DatabaseParams;

    /// How a result column is decoded, derived from the server-reported type name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(super) enum SqlKind {
        Int,
        UInt,
        Float,
        Double,
        Decimal,
        Date,
        Time,
        DateTime,
        Timestamp,
        Json,
        Binary,
        Text,
        Other,
    }

    impl SqlKind {
        pub(super) fn from_type_name(name: &str) -> Self {
            match name {
                n if n.ends_with(" UNSIGNED") => Self::UInt,
                // TINYINT(1) is reported as BOOLEAN; it holds integers.
                "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Self::Int,
                "FLOAT" => Self::Float,
                "DOUBLE" => Self::Double,
                "DECIMAL" => Self::Decimal,
                "DATE" => Self::Date,
                "TIME" => Self::Time,
                "DATETIME" => Self::DateTime,
                "TIMESTAMP" => Self::Timestamp,
                "JSON" => Self::Json,
                "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                    Self::Binary
                }
                "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM"
                | "SET" => Self::Text,
                _ => Self::Other,
            }
        }
    }

    /// Run an already validated `SELECT *` query and materialize the result.
    pub(super) async fn fetch_table(
        params: &DatabaseParams,
        query: &str,
    ) -> IngestionResult<DataSet> {
        let connect = MySqlConnectOptions::new()
            .host(&params.host)
            .username(&params.username)
            .password(&params.password)
            .database(&params.db_name);
        let mut conn = MySqlConnection::connect_with(&connect).await?;

        let statement = conn.prepare(query).await?;
        let headers: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let kinds: Vec<SqlKind> = statement
            .columns()
            .iter()
            .map(|c| SqlKind::from_type_name(c.type_info().name()))
            .collect();

        let rows = statement.query().fetch_all(&mut conn).await?;
        conn.close().await?;

        let mut table = TableBuilder::new(headers);
        for (idx0, row) in rows.iter().enumerate() {
            let cells = kinds
                .iter()
                .enumerate()
                .map(|(idx, kind)| decode_cell(row, idx, *kind))
                .collect::<Result<Vec<_>, sqlx::Error>>()?;
            table.push_row(idx0 + 1, cells)?;
        }
        Ok(table.finish())
    }

    fn decode_cell(row: &MySqlRow, idx: usize, kind: SqlKind) -> Result<Cell, sqlx::Error> {
        let cell = match kind {
            SqlKind::Int => row.try_get::<Option<i64>, _>(idx)?.map(Cell::Int),
            SqlKind::UInt => row.try_get::<Option<u64>, _>(idx)?.map(|v| match i64::try_from(v) {
                Ok(v) => Cell::Int(v),
                Err(_) => Cell::Float(v as f64),
            }),
            SqlKind::Float => row
                .try_get::<Option<f32>, _>(idx)?
                .map(|v| Cell::from_f64(f64::from(v))),
            SqlKind::Double => row.try_get::<Option<f64>, _>(idx)?.map(Cell::from_f64),
            // DECIMAL is coerced to float, like other numeric columns.
            SqlKind::Decimal => row.try_get::<Option<Decimal>, _>(idx)?.map(|d| match d.to_f64() {
                Some(v) => Cell::from_f64(v),
                None => Cell::Text(d.to_string()),
            }),
            SqlKind::Date => row
                .try_get::<Option<chrono::NaiveDate>, _>(idx)?
                .map(|v| Cell::Text(v.to_string())),
            SqlKind::Time => row
                .try_get::<Option<chrono::NaiveTime>, _>(idx)?
                .map(|v| Cell::Text(v.to_string())),
            SqlKind::DateTime => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(idx)?
                .map(|v| Cell::Text(v.to_string())),
            SqlKind::Timestamp => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)?
                .map(|v| Cell::Text(v.naive_utc().to_string())),
            SqlKind::Json => row
                .try_get::<Option<serde_json::Value>, _>(idx)?
                .map(|v| Cell::Text(v.to_string())),
            SqlKind::Binary => row
                .try_get::<Option<Vec<u8>>, _>(idx)?
                .map(|v| Cell::Text(String::from_utf8_lossy(&v).into_owned())),
            SqlKind::Text => row.try_get::<Option<String>, _>(idx)?.map(Cell::Text),
            SqlKind::Other => decode_other(row, idx)?,
        };
        Ok(cell.unwrap_or(Cell::Null))
    }

    /// Best effort for types without a dedicated decoder (YEAR, BIT, GEOMETRY, ...).
    fn decode_other(row: &MySqlRow, idx: usize) -> Result<Option<Cell>, sqlx::Error> {
        match row.try_get::<Option<String>, _>(idx) {
            Ok(v) => Ok(v.map(Cell::Text)),
            Err(text_err) => {
                if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
                    return Ok(v.map(Cell::Int));
                }
                if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(idx) {
                    return Ok(v.map(|b| Cell::Text(String::from_utf8_lossy(&b).into_owned())));
                }
                Err(text_err)
            }
        }
    }
}
