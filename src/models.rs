use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

// ============ Lead Scoring Models ============

/// Features used to score a lead.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LeadFeatures {
    /// Name of the business.
    pub business_name: String,
    /// Type of business (e.g., "technology", "retail").
    pub business_type: String,
    /// Annual revenue in USD.
    pub annual_revenue: f64,
    /// Number of employees.
    pub employee_count: i64,
    /// Industry the business operates in.
    pub industry: String,
    /// Business location (state code or city).
    pub location: String,
    /// Years the business has been operating.
    pub years_in_business: i64,
    /// Whether the business has a website.
    #[serde(default = "default_true")]
    pub website_available: bool,
    /// Whether the lead has held insurance before.
    #[serde(default)]
    pub previous_insurance: bool,
    /// Number of previous claims.
    #[serde(default)]
    pub previous_claims_count: i64,
    /// Where the lead came from.
    #[serde(default)]
    pub referral_source: Option<String>,
    /// Whether the lead has been contacted before.
    #[serde(default)]
    pub contacted_before: bool,
    /// Self-reported interest level on a scale of 1-10.
    #[serde(default)]
    pub initial_interest_level: Option<i64>,
    /// Time spent on the website, in seconds.
    #[serde(default)]
    pub time_spent_on_website: Option<i64>,
    /// Number of pages visited on the website.
    #[serde(default)]
    pub pages_visited: Option<i64>,
    /// Whether the lead started the quote form.
    #[serde(default)]
    pub quote_form_started: bool,
    /// Whether the lead completed the quote form.
    #[serde(default)]
    pub quote_form_completed: bool,
    /// Arbitrary additional features.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub custom_features: Option<serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl LeadFeatures {
    /// Validates field ranges, rejecting negative counts and out-of-range
    /// interest levels before any scoring runs.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.annual_revenue < 0.0 {
            return Err(AppError::Validation(
                "annual_revenue must be non-negative".to_string(),
            ));
        }
        if self.employee_count < 0 {
            return Err(AppError::Validation(
                "employee_count must be non-negative".to_string(),
            ));
        }
        if self.years_in_business < 0 {
            return Err(AppError::Validation(
                "years_in_business must be non-negative".to_string(),
            ));
        }
        if self.previous_claims_count < 0 {
            return Err(AppError::Validation(
                "previous_claims_count must be non-negative".to_string(),
            ));
        }
        if let Some(level) = self.initial_interest_level {
            if !(1..=10).contains(&level) {
                return Err(AppError::Validation(
                    "initial_interest_level must be between 1 and 10".to_string(),
                ));
            }
        }
        if let Some(seconds) = self.time_spent_on_website {
            if seconds < 0 {
                return Err(AppError::Validation(
                    "time_spent_on_website must be non-negative".to_string(),
                ));
            }
        }
        if let Some(pages) = self.pages_visited {
            if pages < 0 {
                return Err(AppError::Validation(
                    "pages_visited must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Priority tier assigned to a scored lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// A single factor contributing to a lead score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ScoreFactor {
    /// Short factor name (e.g., "High Annual Revenue").
    pub factor: String,
    /// Direction of the impact: positive, negative, or neutral.
    pub impact: String,
    /// Human-readable explanation of the factor.
    pub description: String,
    /// Weight the factor carries in the score.
    pub weight: f64,
}

/// Score and insights for a lead.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LeadScore {
    /// Generated lead identifier.
    pub lead_id: String,
    /// Overall lead score in [0.01, 0.99].
    pub score: f64,
    /// Estimated probability of conversion (same value as `score`).
    pub conversion_probability: f64,
    /// Priority tier derived from the score.
    pub priority: Priority,
    /// Estimated annual premium in USD.
    pub estimated_premium: f64,
    /// Estimated days until the deal closes.
    pub estimated_close_time_days: u32,
    /// Factors that influenced the score, in evaluation order.
    pub key_factors: Vec<ScoreFactor>,
    /// Business segment label.
    pub segment: String,
    /// Suggested next steps for the sales team.
    pub recommended_actions: Vec<String>,
    /// When the lead was scored.
    pub scored_at: DateTime<Utc>,
}

/// Request for scoring multiple leads.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LeadScoringRequest {
    /// Leads to score, processed in order.
    pub leads: Vec<LeadFeatures>,
    /// Whether to include key factors and recommended actions per lead.
    #[serde(default = "default_true")]
    pub include_explanations: bool,
}

/// Response for scoring multiple leads.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LeadScoringResponse {
    /// One score per submitted lead, in request order.
    pub results: Vec<LeadScore>,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// The weight tables behind the conversion probability estimate.
///
/// Field order mirrors the order the scoring rules consult them.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConversionFactors {
    pub business_type_factors: BusinessTypeFactors,
    pub revenue_factors: RevenueFactors,
    pub engagement_factors: EngagementFactors,
    pub relationship_factors: RelationshipFactors,
}

/// Conversion adjustment per business type.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BusinessTypeFactors {
    pub technology: f64,
    pub healthcare: f64,
    pub professional_services: f64,
    pub retail: f64,
    pub manufacturing: f64,
    pub construction: f64,
}

/// Conversion adjustment per annual-revenue band.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueFactors {
    #[serde(rename = "over_5M")]
    pub over_5m: f64,
    #[serde(rename = "1M_to_5M")]
    pub one_m_to_5m: f64,
    #[serde(rename = "500K_to_1M")]
    pub five_hundred_k_to_1m: f64,
    #[serde(rename = "under_500K")]
    pub under_500k: f64,
}

/// Conversion adjustment per engagement signal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EngagementFactors {
    pub quote_form_completed: f64,
    pub quote_form_started: f64,
    pub extended_website_visit: f64,
}

/// Conversion adjustment per prior-relationship signal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RelationshipFactors {
    pub previous_insurance: f64,
    pub previous_contact: f64,
}

// ============ Carrier Recommendation Models ============

/// Business profile used for carrier recommendations.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BusinessProfile {
    /// Name of the business.
    pub business_name: String,
    /// Type of business (e.g., "technology", "retail").
    pub business_type: String,
    /// Industry the business operates in.
    pub industry: String,
    /// Annual revenue in USD.
    pub annual_revenue: f64,
    /// Number of employees.
    pub employee_count: i64,
    /// Years the business has been operating.
    pub years_in_business: i64,
    /// Business location (state code or city).
    pub location: String,
    /// Coverage types the business is requesting.
    pub coverage_needs: Vec<String>,
    /// Whether the business has filed claims before.
    #[serde(default)]
    pub has_previous_claims: bool,
    /// Number of previous claims.
    #[serde(default)]
    pub previous_claims_count: i64,
    /// Total amount of previous claims in USD.
    #[serde(default)]
    pub previous_claims_amount: f64,
    /// Known risk factors.
    #[serde(default)]
    pub risk_factors: Option<Vec<String>>,
    /// Desired coverage amount in USD.
    #[serde(default)]
    pub coverage_amount: Option<f64>,
    /// Deductible preference (e.g., "low", "high").
    #[serde(default)]
    pub deductible_preference: Option<String>,
    /// Annual premium budget in USD.
    #[serde(default)]
    pub premium_budget: Option<f64>,
    /// Arbitrary additional features.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub custom_features: Option<serde_json::Value>,
}

impl BusinessProfile {
    /// Validates field ranges before matching runs.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.annual_revenue < 0.0 {
            return Err(AppError::Validation(
                "annual_revenue must be non-negative".to_string(),
            ));
        }
        if self.employee_count < 0 {
            return Err(AppError::Validation(
                "employee_count must be non-negative".to_string(),
            ));
        }
        if self.years_in_business < 0 {
            return Err(AppError::Validation(
                "years_in_business must be non-negative".to_string(),
            ));
        }
        if self.previous_claims_count < 0 {
            return Err(AppError::Validation(
                "previous_claims_count must be non-negative".to_string(),
            ));
        }
        if self.previous_claims_amount < 0.0 {
            return Err(AppError::Validation(
                "previous_claims_amount must be non-negative".to_string(),
            ));
        }
        if let Some(amount) = self.coverage_amount {
            if amount < 0.0 {
                return Err(AppError::Validation(
                    "coverage_amount must be non-negative".to_string(),
                ));
            }
        }
        if let Some(budget) = self.premium_budget {
            if budget < 0.0 {
                return Err(AppError::Validation(
                    "premium_budget must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// An insurance carrier in the static catalog.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct Carrier {
    /// Carrier identifier (e.g., "CAR001").
    pub id: String,
    /// Carrier display name.
    pub name: String,
    /// Business types and industries the carrier specializes in.
    pub specializations: Vec<String>,
    /// Minimum annual revenue the carrier will underwrite.
    pub min_revenue: f64,
    /// Maximum annual revenue the carrier will underwrite.
    pub max_revenue: f64,
    /// Coverage types the carrier offers.
    pub coverage_types: Vec<String>,
    /// Carrier rating out of 5.
    pub rating: f64,
    /// Typical quote turnaround in days.
    pub response_time_days: u32,
    /// Carrier strengths.
    pub strengths: Vec<String>,
    /// Carrier limitations.
    pub limitations: Vec<String>,
    /// Regions the carrier serves.
    pub regions: Vec<String>,
    /// Documents required for submission.
    pub requirements: Vec<String>,
}

/// Coverage summary attached to a carrier match.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CoverageDetails {
    /// Coverage types the carrier offers.
    pub types: Vec<String>,
    /// Carrier rating out of 5.
    pub rating: f64,
    /// Typical quote turnaround in days.
    pub response_time_days: u32,
}

/// A carrier match with confidence score and details.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CarrierMatch {
    /// Matched carrier identifier.
    pub carrier_id: String,
    /// Matched carrier display name.
    pub carrier_name: String,
    /// Match confidence in [0.1, 0.99].
    pub match_score: f64,
    /// Estimated annual premium in USD.
    pub estimated_premium: f64,
    /// Carrier specializations.
    pub specializations: Vec<String>,
    /// Coverage summary for the carrier.
    pub coverage_details: CoverageDetails,
    /// Carrier strengths.
    pub strengths: Vec<String>,
    /// Carrier limitations.
    pub limitations: Vec<String>,
    /// Documents required for submission.
    pub submission_requirements: Vec<String>,
}

/// Response model for carrier recommendations.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecommendationResponse {
    /// Generated business identifier.
    pub business_id: String,
    /// Matched carriers, sorted by match score descending.
    pub recommended_carriers: Vec<CarrierMatch>,
    /// Generated request identifier.
    pub request_id: String,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
    /// When the recommendations were generated.
    pub recommendations_generated_at: DateTime<Utc>,
    /// Summary of what was matched.
    pub explanation: String,
}

/// Priority for a carrier submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPriority {
    Normal,
    High,
    Urgent,
}

impl Default for SubmissionPriority {
    fn default() -> Self {
        SubmissionPriority::Normal
    }
}

/// Request model for submitting an application to carriers.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CarrierSubmissionRequest {
    /// Business the application belongs to.
    pub business_id: String,
    /// Carriers to submit to.
    pub carrier_ids: Vec<String>,
    /// Application payload forwarded to carriers.
    #[schema(value_type = Object)]
    pub application_data: serde_json::Value,
    /// Supporting document references.
    pub documents: Vec<String>,
    /// Submission priority.
    #[serde(default)]
    pub priority: SubmissionPriority,
}

/// Response model for a carrier submission.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CarrierSubmissionResponse {
    /// Generated submission identifier.
    pub submission_id: String,
    /// Business the application belongs to.
    pub business_id: String,
    /// Carriers the application was submitted to.
    pub carrier_ids: Vec<String>,
    /// Submission status.
    pub status: String,
    /// When the submission was recorded.
    pub submission_timestamp: DateTime<Utc>,
    /// Expected carrier response time.
    pub estimated_response_time: String,
    /// Human-readable confirmation message.
    pub message: String,
}

/// Response wrapper for the carrier listing endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CarrierListResponse {
    /// All carriers in the catalog, in catalog order.
    pub carriers: Vec<Carrier>,
}
