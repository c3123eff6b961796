use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{INITIATOR_SECRET_HEADER, MessageResponse, Result, WebError, state::AppState};
use crate::service::ResultsView;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub responder_id: Option<String>,
    /// Raw JSON numbers so integers beyond `i64` still reach the range check.
    #[serde(default)]
    pub scores: Vec<Number>,
}

/// Query pairs kept as a list: repeated keys must not fail extraction.
#[derive(Debug, Default)]
pub struct ResultsQuery {
    pub pairs: Vec<(String, String)>,
}

impl ResultsQuery {
    /// First `secret` value wins.
    pub fn secret(&self) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == "secret")
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub view: ResultsView,
}

pub async fn healthcheck() -> Json<MessageResponse> {
    Json(MessageResponse::ok("ok"))
}

pub async fn submit_scores(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;
    let scores = integer_scores(&request.scores)?;

    state.service.submit(request.responder_id, scores).await?;

    Ok(Json(MessageResponse::ok("submission accepted")))
}

pub async fn get_results(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ResultsResponse>> {
    // An unparseable query is treated as presenting no credential.
    let query = ResultsQuery {
        pairs: query.map(|Query(pairs)| pairs).unwrap_or_default(),
    };
    let credential = presented_credential(&headers, &query);
    let view = state.service.results(credential).await?;

    Ok(Json(ResultsResponse {
        success: true,
        view,
    }))
}

/// Header first, then the `secret` query parameter.
fn presented_credential<'a>(headers: &'a HeaderMap, query: &'a ResultsQuery) -> Option<&'a str> {
    headers
        .get(INITIATOR_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .or(query.secret())
}

/// Integers outside `i64` saturate, so they fail the range check rather than
/// parsing. Fractional scores are malformed input.
fn integer_scores(raw: &[Number]) -> Result<Vec<i64>> {
    raw.iter()
        .map(|number| {
            if let Some(value) = number.as_i64() {
                return Ok(value);
            }
            if number.as_u64().is_some() {
                return Ok(i64::MAX);
            }
            match number.as_f64() {
                Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
                _ => Err(WebError::MalformedBody(format!(
                    "score {} is not an integer",
                    number
                ))),
            }
        })
        .collect()
}
