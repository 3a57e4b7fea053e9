//! Lead scoring logic.
//!
//! Pure functions mapping lead features to a conversion probability, premium
//! estimate, priority tier, segment label, and explanations. The weights are
//! fixed business rules, not trained model outputs.

use chrono::Utc;

use crate::models::{
    BusinessTypeFactors, ConversionFactors, EngagementFactors, LeadFeatures, LeadScore, Priority,
    RelationshipFactors, RevenueFactors, ScoreFactor,
};

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Conversion adjustment for a business type, 0 when unmapped.
fn business_type_factor(business_type: &str) -> f64 {
    match business_type.to_lowercase().as_str() {
        "retail" => 0.1,
        "technology" => 0.15,
        "manufacturing" => 0.05,
        "healthcare" => 0.12,
        "construction" => 0.08,
        "professional_services" => 0.13,
        _ => 0.0,
    }
}

/// Premium multiplier for a business type, 1.0 when unmapped.
fn business_type_multiplier(business_type: &str) -> f64 {
    match business_type.to_lowercase().as_str() {
        "retail" => 1.2,
        "technology" => 1.5,
        "manufacturing" => 2.0,
        "healthcare" => 1.8,
        "construction" => 2.2,
        "professional_services" => 1.3,
        _ => 1.0,
    }
}

/// Estimates the probability that a lead converts.
///
/// Starts from a base of 0.3 and adds fixed adjustments for business type,
/// revenue tier, engagement signals, and prior relationship, then clamps the
/// sum to [0.01, 0.99].
pub fn conversion_probability(lead: &LeadFeatures) -> f64 {
    let base_probability = 0.3;

    let business_factor = business_type_factor(&lead.business_type);

    let revenue_factor = if lead.annual_revenue > 5_000_000.0 {
        0.15
    } else if lead.annual_revenue > 1_000_000.0 {
        0.1
    } else if lead.annual_revenue > 500_000.0 {
        0.05
    } else {
        0.0
    };

    let mut engagement_factor = 0.0;
    if lead.quote_form_completed {
        engagement_factor += 0.2;
    } else if lead.quote_form_started {
        engagement_factor += 0.1;
    }
    // More than 5 minutes on the website
    if lead.time_spent_on_website.unwrap_or(0) > 300 {
        engagement_factor += 0.05;
    }

    let mut relationship_factor = 0.0;
    if lead.previous_insurance {
        relationship_factor += 0.05;
    }
    if lead.contacted_before {
        relationship_factor += 0.03;
    }

    let probability =
        base_probability + business_factor + revenue_factor + engagement_factor + relationship_factor;

    clamp(probability, 0.01, 0.99)
}

/// Estimates the annual premium for a lead. Unbounded above.
pub fn estimated_premium(lead: &LeadFeatures) -> f64 {
    let base_premium = 5000.0;

    // $0.5 per $1M of revenue, $10 per employee
    let revenue_factor = (lead.annual_revenue / 1_000_000.0) * 0.5;
    let employee_factor = lead.employee_count as f64 * 10.0;

    let business_factor = business_type_multiplier(&lead.business_type);
    let risk_factor = if lead.previous_claims_count > 0 {
        1.2
    } else {
        1.0
    };

    (base_premium + revenue_factor + employee_factor) * business_factor * risk_factor
}

/// Maps a conversion probability to a priority tier.
pub fn determine_priority(score: f64) -> Priority {
    if score >= 0.7 {
        Priority::High
    } else if score >= 0.4 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Classifies a lead into a coarse size/vertical segment.
pub fn determine_segment(lead: &LeadFeatures) -> String {
    let mut segment = if lead.annual_revenue > 5_000_000.0 || lead.employee_count > 100 {
        "enterprise".to_string()
    } else if lead.annual_revenue > 1_000_000.0 || lead.employee_count > 20 {
        "mid-market".to_string()
    } else {
        "small-business".to_string()
    };

    let business_type = lead.business_type.to_lowercase();
    if business_type == "healthcare" || business_type == "technology" {
        segment.push_str("-specialized");
    }

    segment
}

/// Estimated days until close for a given conversion probability.
///
/// Boundaries are strict: a probability of exactly 0.7 falls into the 30-day
/// band even though the lead is high priority.
pub fn estimated_close_time_days(probability: f64) -> u32 {
    if probability > 0.7 {
        14
    } else if probability > 0.4 {
        30
    } else {
        60
    }
}

/// Title-cases a factor name the way the analytics labels expect:
/// the first letter of each alphabetic run is uppercased, the rest lowercased
/// (so "professional_services" becomes "Professional_Services").
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

/// Lists the key factors influencing a lead score, in evaluation order.
pub fn key_factors(lead: &LeadFeatures) -> Vec<ScoreFactor> {
    let mut factors = Vec::new();

    // Revenue impact
    if lead.annual_revenue > 5_000_000.0 {
        factors.push(ScoreFactor {
            factor: "High Annual Revenue".to_string(),
            impact: "positive".to_string(),
            description: "Business with >$5M revenue has higher conversion probability"
                .to_string(),
            weight: 0.15,
        });
    } else if lead.annual_revenue < 500_000.0 {
        factors.push(ScoreFactor {
            factor: "Low Annual Revenue".to_string(),
            impact: "negative".to_string(),
            description: "Business with <$500K revenue has lower conversion probability"
                .to_string(),
            weight: -0.05,
        });
    }

    // Engagement impact
    if lead.quote_form_completed {
        factors.push(ScoreFactor {
            factor: "Completed Quote Form".to_string(),
            impact: "positive".to_string(),
            description: "Lead has completed the quote form, showing high intent".to_string(),
            weight: 0.2,
        });
    }

    // Industry impact
    let business_type = lead.business_type.to_lowercase();
    if matches!(
        business_type.as_str(),
        "technology" | "healthcare" | "professional_services"
    ) {
        let label = title_case(&business_type);
        factors.push(ScoreFactor {
            factor: format!("{} Industry", label),
            impact: "positive".to_string(),
            description: format!("{} businesses show higher conversion rates", label),
            weight: 0.1,
        });
    } else if business_type == "retail" {
        factors.push(ScoreFactor {
            factor: "Retail Industry".to_string(),
            impact: "neutral".to_string(),
            description: "Retail businesses show average conversion rates".to_string(),
            weight: 0.0,
        });
    }

    // Previous relationship
    if lead.previous_insurance {
        factors.push(ScoreFactor {
            factor: "Previous Insurance Customer".to_string(),
            impact: "positive".to_string(),
            description: "Lead has purchased insurance before, showing familiarity".to_string(),
            weight: 0.05,
        });
    }

    factors
}

/// Suggests next steps for the sales team, keyed off the priority tier.
pub fn recommended_actions(lead: &LeadFeatures, priority: Priority) -> Vec<String> {
    let mut actions = Vec::new();

    match priority {
        Priority::High => {
            actions.push("Assign to senior agent for immediate follow-up".to_string());
            actions.push("Prepare personalized quote options".to_string());

            let business_type = lead.business_type.to_lowercase();
            if business_type == "technology" || business_type == "healthcare" {
                actions.push(
                    "Include specialized coverage options for industry-specific risks".to_string(),
                );
            }
        }
        Priority::Medium => {
            actions.push("Schedule follow-up call within 48 hours".to_string());
            actions.push("Send information packet about relevant coverage options".to_string());

            if !lead.quote_form_completed {
                actions.push("Send reminder to complete quote form".to_string());
            }
        }
        Priority::Low => {
            actions.push("Add to nurture email campaign".to_string());
            actions.push("Schedule follow-up in 1-2 weeks".to_string());
        }
    }

    actions
}

/// Scores a single lead end to end.
///
/// When `include_explanations` is false, `key_factors` and
/// `recommended_actions` come back empty (used by batch scoring).
pub fn score_lead(lead: &LeadFeatures, include_explanations: bool) -> LeadScore {
    let scored_at = Utc::now();
    let lead_id = format!("lead_{}", scored_at.timestamp_millis());

    let probability = conversion_probability(lead);
    let premium = estimated_premium(lead);
    let priority = determine_priority(probability);
    let segment = determine_segment(lead);

    let (factors, actions) = if include_explanations {
        (key_factors(lead), recommended_actions(lead, priority))
    } else {
        (Vec::new(), Vec::new())
    };

    LeadScore {
        lead_id,
        score: probability,
        conversion_probability: probability,
        priority,
        estimated_premium: premium,
        estimated_close_time_days: estimated_close_time_days(probability),
        key_factors: factors,
        segment,
        recommended_actions: actions,
        scored_at,
    }
}

/// The weight tables behind the conversion estimate, for the analytics
/// endpoint. Values mirror the scoring rules above.
pub fn conversion_factor_tables() -> ConversionFactors {
    ConversionFactors {
        business_type_factors: BusinessTypeFactors {
            technology: 0.15,
            healthcare: 0.12,
            professional_services: 0.13,
            retail: 0.10,
            manufacturing: 0.05,
            construction: 0.08,
        },
        revenue_factors: RevenueFactors {
            over_5m: 0.15,
            one_m_to_5m: 0.10,
            five_hundred_k_to_1m: 0.05,
            under_500k: 0.00,
        },
        engagement_factors: EngagementFactors {
            quote_form_completed: 0.20,
            quote_form_started: 0.10,
            extended_website_visit: 0.05,
        },
        relationship_factors: RelationshipFactors {
            previous_insurance: 0.05,
            previous_contact: 0.03,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_lead() -> LeadFeatures {
        LeadFeatures {
            business_name: "Acme Corp".to_string(),
            business_type: "other".to_string(),
            annual_revenue: 100_000.0,
            employee_count: 5,
            industry: "other".to_string(),
            location: "TX".to_string(),
            years_in_business: 3,
            website_available: true,
            previous_insurance: false,
            previous_claims_count: 0,
            referral_source: None,
            contacted_before: false,
            initial_interest_level: None,
            time_spent_on_website: None,
            pages_visited: None,
            quote_form_started: false,
            quote_form_completed: false,
            custom_features: None,
        }
    }

    #[test]
    fn test_baseline_probability_is_base_constant() {
        // 100K revenue, no engagement, no relationship, unmapped type
        let lead = base_lead();
        let p = conversion_probability(&lead);
        assert!((p - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_worked_example_technology_lead() {
        let mut lead = base_lead();
        lead.business_type = "technology".to_string();
        lead.annual_revenue = 6_000_000.0;
        lead.quote_form_completed = true;
        lead.previous_insurance = true;
        lead.time_spent_on_website = Some(400);

        // 0.3 + 0.15 + 0.15 + 0.20 + 0.05 + 0.05 = 0.90
        let p = conversion_probability(&lead);
        assert!((p - 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_completed_form_supersedes_started_form() {
        let mut lead = base_lead();
        lead.quote_form_started = true;
        lead.quote_form_completed = true;
        let completed = conversion_probability(&lead);

        lead.quote_form_completed = false;
        let started = conversion_probability(&lead);

        assert!((completed - started - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_tier_boundaries_are_strict() {
        let mut lead = base_lead();

        lead.annual_revenue = 500_000.0;
        let at_500k = conversion_probability(&lead);
        lead.annual_revenue = 500_001.0;
        let above_500k = conversion_probability(&lead);
        assert!((at_500k - 0.3).abs() < 1e-9);
        assert!((above_500k - 0.35).abs() < 1e-9);

        lead.annual_revenue = 5_000_000.0;
        let at_5m = conversion_probability(&lead);
        lead.annual_revenue = 5_000_001.0;
        let above_5m = conversion_probability(&lead);
        assert!((at_5m - 0.40).abs() < 1e-9);
        assert!((above_5m - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_probability_is_clamped() {
        let mut lead = base_lead();
        lead.business_type = "technology".to_string();
        lead.annual_revenue = 10_000_000.0;
        lead.quote_form_completed = true;
        lead.time_spent_on_website = Some(1000);
        lead.previous_insurance = true;
        lead.contacted_before = true;

        // Raw sum is 0.3 + 0.15 + 0.15 + 0.2 + 0.05 + 0.05 + 0.03 = 0.93
        let p = conversion_probability(&lead);
        assert!(p <= 0.99);
        assert!((p - 0.93).abs() < 1e-9);
    }

    #[test]
    fn test_premium_arithmetic() {
        let mut lead = base_lead();
        lead.business_type = "manufacturing".to_string();
        lead.annual_revenue = 2_000_000.0;
        lead.employee_count = 30;
        lead.previous_claims_count = 1;

        // (5000 + 1.0 + 300) * 2.0 * 1.2
        let premium = estimated_premium(&lead);
        assert!((premium - 12_722.4).abs() < 1e-6);
    }

    #[test]
    fn test_premium_unmapped_type_uses_unit_multiplier() {
        let mut lead = base_lead();
        lead.annual_revenue = 0.0;
        lead.employee_count = 0;
        let premium = estimated_premium(&lead);
        assert!((premium - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_boundaries_are_inclusive() {
        assert_eq!(determine_priority(0.7), Priority::High);
        assert_eq!(determine_priority(0.69), Priority::Medium);
        assert_eq!(determine_priority(0.4), Priority::Medium);
        assert_eq!(determine_priority(0.39), Priority::Low);
    }

    #[test]
    fn test_close_time_boundaries_are_strict() {
        // A lead at exactly 0.7 is high priority but still in the 30-day band
        assert_eq!(estimated_close_time_days(0.7), 30);
        assert_eq!(estimated_close_time_days(0.71), 14);
        assert_eq!(estimated_close_time_days(0.4), 60);
        assert_eq!(estimated_close_time_days(0.41), 30);
    }

    #[test]
    fn test_segment_classification() {
        let mut lead = base_lead();
        assert_eq!(determine_segment(&lead), "small-business");

        lead.employee_count = 21;
        assert_eq!(determine_segment(&lead), "mid-market");

        lead.annual_revenue = 6_000_000.0;
        assert_eq!(determine_segment(&lead), "enterprise");

        lead.business_type = "Healthcare".to_string();
        assert_eq!(determine_segment(&lead), "enterprise-specialized");

        lead.annual_revenue = 100_000.0;
        lead.employee_count = 5;
        lead.business_type = "technology".to_string();
        assert_eq!(determine_segment(&lead), "small-business-specialized");
    }

    #[test]
    fn test_key_factors_enumeration_order() {
        let mut lead = base_lead();
        lead.business_type = "professional_services".to_string();
        lead.annual_revenue = 6_000_000.0;
        lead.quote_form_completed = true;
        lead.previous_insurance = true;

        let factors = key_factors(&lead);
        let names: Vec<&str> = factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "High Annual Revenue",
                "Completed Quote Form",
                "Professional_Services Industry",
                "Previous Insurance Customer",
            ]
        );
    }

    #[test]
    fn test_low_revenue_factor_is_negative() {
        let lead = base_lead();
        let factors = key_factors(&lead);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor, "Low Annual Revenue");
        assert_eq!(factors[0].impact, "negative");
        assert!((factors[0].weight - (-0.05)).abs() < 1e-9);
    }

    #[test]
    fn test_retail_factor_is_neutral() {
        let mut lead = base_lead();
        lead.business_type = "retail".to_string();
        lead.annual_revenue = 750_000.0;
        let factors = key_factors(&lead);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor, "Retail Industry");
        assert_eq!(factors[0].impact, "neutral");
        assert_eq!(factors[0].weight, 0.0);
    }

    #[test]
    fn test_mid_band_revenue_contributes_no_factor() {
        let mut lead = base_lead();
        lead.annual_revenue = 2_000_000.0;
        assert!(key_factors(&lead).is_empty());
    }

    #[test]
    fn test_recommended_actions_per_priority() {
        let mut lead = base_lead();

        let low = recommended_actions(&lead, Priority::Low);
        assert_eq!(low.len(), 2);
        assert!(low[0].contains("nurture"));

        let medium = recommended_actions(&lead, Priority::Medium);
        assert_eq!(medium.len(), 3);
        assert!(medium[2].contains("complete quote form"));

        lead.quote_form_completed = true;
        let medium_completed = recommended_actions(&lead, Priority::Medium);
        assert_eq!(medium_completed.len(), 2);

        lead.business_type = "healthcare".to_string();
        let high = recommended_actions(&lead, Priority::High);
        assert_eq!(high.len(), 3);
        assert!(high[2].contains("industry-specific"));
    }

    #[test]
    fn test_score_lead_composition() {
        let mut lead = base_lead();
        lead.business_type = "technology".to_string();
        lead.annual_revenue = 6_000_000.0;
        lead.quote_form_completed = true;

        let score = score_lead(&lead, true);
        assert!(score.lead_id.starts_with("lead_"));
        assert_eq!(score.score, score.conversion_probability);
        assert_eq!(score.priority, Priority::High);
        assert_eq!(score.estimated_close_time_days, 14);
        assert_eq!(score.segment, "enterprise-specialized");
        assert!(!score.key_factors.is_empty());
        assert!(!score.recommended_actions.is_empty());

        let bare = score_lead(&lead, false);
        assert!(bare.key_factors.is_empty());
        assert!(bare.recommended_actions.is_empty());
        assert_eq!(bare.score, score.score);
    }

    #[test]
    fn test_title_case_uppercases_each_alphabetic_run() {
        assert_eq!(title_case("technology"), "Technology");
        assert_eq!(title_case("professional_services"), "Professional_Services");
        assert_eq!(title_case("e-commerce"), "E-Commerce");
    }
}
