//! Revenue report endpoint.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::ApiError;
use crate::response::ok;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/report", get(report))
}

#[derive(Debug, Deserialize)]
struct ReportQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// GET /report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
///
/// Both dates are inclusive whole days in UTC and default to the current
/// date when omitted. A window with no transactions returns zeroes and an
/// empty best-seller record, not an error.
async fn report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let today = Utc::now().date_naive();

    let start = parse_date(query.start_date.as_deref(), "start_date")?.unwrap_or(today);
    let end = parse_date(query.end_date.as_deref(), "end_date")?.unwrap_or(today);

    let report = state.db.reports().sales_report(start, end).await?;

    Ok(ok("Report generated successfully", report))
}

fn parse_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::validation(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
            }),
    }
}
