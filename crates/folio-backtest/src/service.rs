//! Request/response boundary.
//!
//! Every failure becomes an `{"error": "..."}` payload. A failed request
//! never carries a partial result.

use folio_core::error::FolioError;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::engine::{BacktestEngine, BacktestRequest};
use crate::report::BacktestResult;

/// Backtest response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BacktestResponse {
    Success(BacktestResult),
    Failure { error: String },
}

impl BacktestResponse {
    pub fn failure(err: &FolioError) -> Self {
        BacktestResponse::Failure {
            error: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BacktestResponse::Success(_))
    }

    /// HTTP-style status for the payload.
    pub fn status(&self) -> u16 {
        match self {
            BacktestResponse::Success(_) => 200,
            BacktestResponse::Failure { .. } => 500,
        }
    }
}

/// Parse a JSON request body, run it, and build the response payload.
pub async fn handle_request(engine: &BacktestEngine, body: &str) -> BacktestResponse {
    let request: BacktestRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            let err = FolioError::from(e);
            error!(error = %err, "malformed backtest request");
            return BacktestResponse::failure(&err);
        }
    };

    match engine.run(&request).await {
        Ok(report) => BacktestResponse::Success(report.result()),
        Err(err) => {
            error!(error = %err, symbol = %request.symbol, strategy = %request.strategy, "backtest failed");
            BacktestResponse::failure(&err)
        }
    }
}
