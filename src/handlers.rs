use crate::catalog::CarrierCatalog;
use crate::config::Config;
use crate::errors::AppError;
use crate::matching;
use crate::models::*;
use crate::scoring;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Static carrier catalog, read-only after startup.
    pub catalog: CarrierCatalog,
}

/// OpenAPI documentation for the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Engine API",
        description = "Lead scoring and carrier recommendation service for the insurance sales pipeline"
    ),
    paths(
        health,
        score_lead,
        batch_score_leads,
        get_conversion_factors,
        recommend_carriers,
        submit_to_carriers,
        list_carriers,
        get_carrier
    ),
    components(schemas(
        LeadFeatures,
        LeadScore,
        ScoreFactor,
        Priority,
        LeadScoringRequest,
        LeadScoringResponse,
        ConversionFactors,
        BusinessTypeFactors,
        RevenueFactors,
        EngagementFactors,
        RelationshipFactors,
        BusinessProfile,
        Carrier,
        CarrierMatch,
        CoverageDetails,
        RecommendationResponse,
        CarrierSubmissionRequest,
        CarrierSubmissionResponse,
        SubmissionPriority,
        CarrierListResponse
    )),
    tags(
        (name = "scoring", description = "Lead scoring endpoints"),
        (name = "recommendation", description = "Carrier recommendation endpoints")
    )
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// Exposed from the library so integration tests can drive the real routes
/// without binding a socket. Middleware layers are applied in `main`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/score", post(score_lead))
        .route("/api/v1/batch-score", post(batch_score_leads))
        .route(
            "/api/v1/analytics/conversion-factors",
            get(get_conversion_factors),
        )
        .route("/api/v1/recommend", post(recommend_carriers))
        .route("/api/v1/submit", post(submit_to_carriers))
        .route("/api/v1/carriers", get(list_carriers))
        .route("/api/v1/carriers/:carrier_id", get(get_carrier))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

/// Health check endpoint.
///
/// Returns the service status, name, and version.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "sales-engine-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/score
///
/// Scores a single lead.
///
/// # Arguments
///
/// * `lead` - The lead features to score.
///
/// # Returns
///
/// * `Result<Json<LeadScore>, AppError>` - The lead score or a validation error.
#[utoipa::path(
    post,
    path = "/api/v1/score",
    tag = "scoring",
    request_body = LeadFeatures,
    responses(
        (status = 200, description = "Lead scored", body = LeadScore),
        (status = 400, description = "Invalid lead features")
    )
)]
pub async fn score_lead(
    State(_state): State<Arc<AppState>>,
    Json(lead): Json<LeadFeatures>,
) -> Result<Json<LeadScore>, AppError> {
    lead.validate()?;

    let score = scoring::score_lead(&lead, true);

    tracing::info!(
        "Scored lead: {}, score: {:.2}, priority: {}",
        score.lead_id,
        score.score,
        score.priority.as_str()
    );

    Ok(Json(score))
}

/// POST /api/v1/batch-score
///
/// Scores multiple leads sequentially. The first invalid lead rejects the
/// whole batch.
///
/// # Arguments
///
/// * `request` - The leads to score and whether to include explanations.
///
/// # Returns
///
/// * `Result<Json<LeadScoringResponse>, AppError>` - Scores in request order or a validation error.
#[utoipa::path(
    post,
    path = "/api/v1/batch-score",
    tag = "scoring",
    request_body = LeadScoringRequest,
    responses(
        (status = 200, description = "Leads scored", body = LeadScoringResponse),
        (status = 400, description = "Invalid lead features")
    )
)]
pub async fn batch_score_leads(
    State(_state): State<Arc<AppState>>,
    Json(request): Json<LeadScoringRequest>,
) -> Result<Json<LeadScoringResponse>, AppError> {
    let start = Instant::now();

    for (index, lead) in request.leads.iter().enumerate() {
        lead.validate().map_err(|e| match e {
            AppError::Validation(msg) => {
                AppError::Validation(format!("lead {}: {}", index, msg))
            }
            other => other,
        })?;
    }

    let results: Vec<LeadScore> = request
        .leads
        .iter()
        .map(|lead| scoring::score_lead(lead, request.include_explanations))
        .collect();

    let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        "Batch scored {} leads in {:.2}ms",
        results.len(),
        processing_time_ms
    );

    Ok(Json(LeadScoringResponse {
        results,
        processing_time_ms,
    }))
}

/// GET /api/v1/analytics/conversion-factors
///
/// Returns the weight tables behind the conversion probability estimate.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/conversion-factors",
    tag = "scoring",
    responses((status = 200, description = "Conversion factor tables", body = ConversionFactors))
)]
pub async fn get_conversion_factors(
    State(_state): State<Arc<AppState>>,
) -> Json<ConversionFactors> {
    Json(scoring::conversion_factor_tables())
}

/// POST /api/v1/recommend
///
/// Recommends insurance carriers for a business profile.
///
/// # Arguments
///
/// * `profile` - The business profile to match against the catalog.
///
/// # Returns
///
/// * `Result<Json<RecommendationResponse>, AppError>` - Ranked matches or a validation error.
#[utoipa::path(
    post,
    path = "/api/v1/recommend",
    tag = "recommendation",
    request_body = BusinessProfile,
    responses(
        (status = 200, description = "Carrier recommendations", body = RecommendationResponse),
        (status = 400, description = "Invalid business profile")
    )
)]
pub async fn recommend_carriers(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<BusinessProfile>,
) -> Result<Json<RecommendationResponse>, AppError> {
    profile.validate()?;

    let start = Instant::now();
    let now = Utc::now();
    let request_id = format!("req_{}", now.timestamp_millis());
    let business_id = format!(
        "bus_{}_{}",
        profile.business_name.to_lowercase().replace(' ', "_"),
        now.timestamp()
    );

    let carrier_matches = matching::match_carriers(&profile, &state.catalog);
    let explanation = matching::build_explanation(&profile, carrier_matches.len());

    let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        "Generated recommendations for {} with {} matches",
        profile.business_name,
        carrier_matches.len()
    );

    Ok(Json(RecommendationResponse {
        business_id,
        recommended_carriers: carrier_matches,
        request_id,
        processing_time_ms,
        recommendations_generated_at: Utc::now(),
        explanation,
    }))
}

/// POST /api/v1/submit
///
/// Records an application submission to the selected carriers. This is a
/// mock acknowledgement; nothing is forwarded or persisted.
///
/// # Arguments
///
/// * `request` - The submission request.
///
/// # Returns
///
/// * `Result<Json<CarrierSubmissionResponse>, AppError>` - The submission acknowledgement.
#[utoipa::path(
    post,
    path = "/api/v1/submit",
    tag = "recommendation",
    request_body = CarrierSubmissionRequest,
    responses((status = 200, description = "Submission recorded", body = CarrierSubmissionResponse))
)]
pub async fn submit_to_carriers(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CarrierSubmissionRequest>,
) -> Result<Json<CarrierSubmissionResponse>, AppError> {
    let now = Utc::now();
    let submission_id = format!("sub_{}", now.timestamp_millis());

    let est_response_days = match request.priority {
        SubmissionPriority::Urgent => 1,
        SubmissionPriority::High => 3,
        SubmissionPriority::Normal => 5,
    };

    // Unknown carrier ids contribute no name to the confirmation
    let carrier_names: Vec<String> = request
        .carrier_ids
        .iter()
        .filter_map(|id| state.catalog.get(id))
        .map(|carrier| carrier.name.clone())
        .collect();

    tracing::info!(
        "Application for {} submitted to carriers: {}",
        request.business_id,
        carrier_names.join(", ")
    );

    Ok(Json(CarrierSubmissionResponse {
        submission_id,
        business_id: request.business_id,
        carrier_ids: request.carrier_ids.clone(),
        status: "submitted".to_string(),
        submission_timestamp: now,
        estimated_response_time: format!("{} business days", est_response_days),
        message: format!(
            "Application submitted to {} carriers: {}",
            request.carrier_ids.len(),
            carrier_names.join(", ")
        ),
    }))
}

/// GET /api/v1/carriers
///
/// Lists all carriers in the catalog.
#[utoipa::path(
    get,
    path = "/api/v1/carriers",
    tag = "recommendation",
    responses((status = 200, description = "All carriers", body = CarrierListResponse))
)]
pub async fn list_carriers(State(state): State<Arc<AppState>>) -> Json<CarrierListResponse> {
    Json(CarrierListResponse {
        carriers: state.catalog.all().to_vec(),
    })
}

/// GET /api/v1/carriers/:carrier_id
///
/// Returns details for a specific carrier.
///
/// # Arguments
///
/// * `carrier_id` - The carrier identifier.
///
/// # Returns
///
/// * `Result<Json<Carrier>, AppError>` - The carrier or a not-found error.
#[utoipa::path(
    get,
    path = "/api/v1/carriers/{carrier_id}",
    tag = "recommendation",
    params(("carrier_id" = String, Path, description = "Carrier identifier")),
    responses(
        (status = 200, description = "Carrier details", body = Carrier),
        (status = 404, description = "Carrier not found")
    )
)]
pub async fn get_carrier(
    State(state): State<Arc<AppState>>,
    Path(carrier_id): Path<String>,
) -> Result<Json<Carrier>, AppError> {
    state
        .catalog
        .get(&carrier_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Carrier with ID {} not found", carrier_id)))
}
