// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot reach database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("query against `{table}` failed: {source}")]
    Query {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid data: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    /// Sort a loader failure into connection vs query trouble.
    ///
    /// Missing tables/columns and rows that do not decode into the expected
    /// shape are query errors; everything about reaching the server is a
    /// connection error.
    pub fn from_load(table: &str, err: sqlx::Error) -> Self {
        let is_query = match &err {
            sqlx::Error::Database(db_err) => matches!(
                db_err.code().as_deref(),
                Some("42P01") | Some("42703") | Some("42804") | Some("3F000")
            ),
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::RowNotFound => true,
            _ => false,
        };

        if is_query {
            AppError::Query { table: table.to_string(), source: err }
        } else {
            AppError::Connection(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Connection(_) => (
                StatusCode::BAD_GATEWAY,
                "Database unavailable".to_string(),
            ),
            AppError::Query { .. } | AppError::Config(_) | AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Report generation failed".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Connection(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug, Error)]
    #[error("{message}")]
    struct PgStateError {
        code: &'static str,
        message: &'static str,
    }

    impl DatabaseError for PgStateError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(code: &'static str, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgStateError { code, message }))
    }

    #[test]
    fn undefined_table_is_query_error() {
        let err = AppError::from_load(
            "fact_sales",
            db_error("42P01", "relation \"fact_sales\" does not exist"),
        );
        match err {
            AppError::Query { table, .. } => assert_eq!(table, "fact_sales"),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn undefined_column_is_query_error() {
        let err = AppError::from_load("dim_products", db_error("42703", "column \"color\" does not exist"));
        assert!(matches!(err, AppError::Query { table, .. } if table == "dim_products"));
    }

    #[test]
    fn other_sqlstate_is_connection_error() {
        let err = AppError::from_load("dim_channels", db_error("57P03", "the database system is starting up"));
        assert!(matches!(err, AppError::Connection(_)));
    }

    #[test]
    fn column_problems_are_query_errors() {
        let err = AppError::from_load("dim_products", sqlx::Error::ColumnNotFound("color".into()));
        match err {
            AppError::Query { table, .. } => assert_eq!(table, "dim_products"),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn pool_timeout_is_connection_error() {
        let err = AppError::from_load("fact_sales", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Connection(_)));
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::not_found("Report 'x' not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn connection_maps_to_502() {
        let resp = AppError::Connection(sqlx::Error::PoolClosed).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
