//! Carrier matching and ranking logic.
//!
//! Pure functions over a business profile and the static carrier catalog.
//! Carriers outside the business's revenue band are filtered out; the rest
//! are scored and ranked.

use crate::catalog::CarrierCatalog;
use crate::models::{BusinessProfile, Carrier, CarrierMatch, CoverageDetails};

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Scores a single carrier against a business profile.
///
/// Starts from a neutral 0.5 and adjusts for specialization, coverage
/// overlap, region, and claims history. Clamped to [0.1, 0.99].
fn match_score(profile: &BusinessProfile, carrier: &Carrier) -> f64 {
    let industry = profile.industry.to_lowercase();
    let business_type = profile.business_type.to_lowercase();

    let mut score = 0.5;

    // Industry match
    if carrier.specializations.contains(&industry)
        || carrier.specializations.contains(&business_type)
    {
        score += 0.3;
    }

    // Coverage match
    if !profile.coverage_needs.is_empty() {
        let covered = profile
            .coverage_needs
            .iter()
            .filter(|need| carrier.coverage_types.contains(need))
            .count();
        let ratio = covered as f64 / profile.coverage_needs.len() as f64;
        score += ratio * 0.2;
    }

    // Location match (exact region strings, "All US states" is a wildcard)
    if carrier.regions.iter().any(|r| r == "All US states")
        || carrier.regions.contains(&profile.location)
    {
        score += 0.1;
    }

    // Risk adjustment
    if profile.has_previous_claims && profile.previous_claims_count > 2 {
        score -= 0.1;
    }

    clamp(score, 0.1, 0.99)
}

/// Estimates the annual premium for a business profile.
///
/// Depends on the profile alone, so every matched carrier quotes the same
/// figure.
pub fn estimated_premium(profile: &BusinessProfile) -> f64 {
    // 0.5% of revenue as base
    let base_premium = profile.annual_revenue * 0.005;

    let industry = profile.industry.to_lowercase();
    let industry_factor = if industry == "technology" || industry == "healthcare" {
        1.2
    } else {
        1.0
    };
    let claims_factor = if profile.has_previous_claims { 1.3 } else { 1.0 };
    let size_factor = if profile.employee_count < 10 {
        0.8
    } else if profile.employee_count < 50 {
        1.0
    } else {
        1.2
    };

    base_premium * industry_factor * claims_factor * size_factor
}

/// Matches a business profile against the carrier catalog.
///
/// Carriers whose revenue band excludes the business are skipped; the rest
/// are scored and returned sorted by match score descending (ties keep
/// catalog order).
pub fn match_carriers(profile: &BusinessProfile, catalog: &CarrierCatalog) -> Vec<CarrierMatch> {
    let premium = estimated_premium(profile);

    let mut matches: Vec<CarrierMatch> = catalog
        .all()
        .iter()
        .filter(|carrier| {
            profile.annual_revenue >= carrier.min_revenue
                && profile.annual_revenue <= carrier.max_revenue
        })
        .map(|carrier| CarrierMatch {
            carrier_id: carrier.id.clone(),
            carrier_name: carrier.name.clone(),
            match_score: match_score(profile, carrier),
            estimated_premium: premium,
            specializations: carrier.specializations.clone(),
            coverage_details: CoverageDetails {
                types: carrier.coverage_types.clone(),
                rating: carrier.rating,
                response_time_days: carrier.response_time_days,
            },
            strengths: carrier.strengths.clone(),
            limitations: carrier.limitations.clone(),
            submission_requirements: carrier.requirements.clone(),
        })
        .collect();

    // sort_by is stable, so equal scores keep catalog order
    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches
}

/// Summary line attached to a recommendation response.
pub fn build_explanation(profile: &BusinessProfile, match_count: usize) -> String {
    format!(
        "Found {} carriers matching {} businesses in the {} industry with {} coverage needs.",
        match_count,
        profile.business_type,
        profile.industry,
        profile.coverage_needs.join(", ")
    )
}
