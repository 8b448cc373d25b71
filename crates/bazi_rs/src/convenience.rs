use bazi_search::{BaziEngine, BoundaryCheckResult, ChartReport};

use crate::error::RequestError;
use crate::global::engine;
use crate::request::BirthRequest;

/// Validate a request and assemble its chart.
pub fn compute_chart(
    engine: &BaziEngine,
    request: &BirthRequest,
) -> Result<ChartReport, RequestError> {
    let input = request.to_input()?;
    Ok(engine.compute(&input)?)
}

/// JSON request in, JSON chart out.
pub fn chart_json(engine: &BaziEngine, json: &str) -> Result<String, RequestError> {
    let request = BirthRequest::from_json(json)?;
    let report = compute_chart(engine, &request)?;
    Ok(serde_json::to_string(&report)?)
}

/// Boundary sensitivity of a request and its alternative charts, without
/// assembling the full report.
pub fn boundary_check(
    engine: &BaziEngine,
    request: &BirthRequest,
) -> Result<BoundaryCheckResult, RequestError> {
    let input = request.to_input()?;
    Ok(engine.check_boundaries(&input)?)
}

/// [`compute_chart`] against the global engine.
pub fn chart(request: &BirthRequest) -> Result<ChartReport, RequestError> {
    compute_chart(engine()?, request)
}

/// [`chart_json`] against the global engine.
pub fn chart_json_global(json: &str) -> Result<String, RequestError> {
    chart_json(engine()?, json)
}
