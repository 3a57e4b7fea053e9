use crate::models::Carrier;

/// Static catalog of insurance carriers.
///
/// Built once at startup and read-only afterwards. In production this data
/// would come from a carrier management system.
#[derive(Debug, Clone)]
pub struct CarrierCatalog {
    carriers: Vec<Carrier>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl CarrierCatalog {
    /// Builds the built-in five-carrier catalog.
    pub fn builtin() -> Self {
        let carriers = vec![
            Carrier {
                id: "CAR001".to_string(),
                name: "InsureTech Underwriters".to_string(),
                specializations: strings(&["technology", "professional_services", "startups"]),
                min_revenue: 500_000.0,
                max_revenue: 50_000_000.0,
                coverage_types: strings(&[
                    "general_liability",
                    "cyber",
                    "professional_liability",
                    "property",
                ]),
                rating: 4.7,
                response_time_days: 3,
                strengths: strings(&[
                    "Fast quote turnaround",
                    "Specialized coverage for tech risks",
                    "Competitive cyber premiums",
                ]),
                limitations: strings(&[
                    "Limited coverage for manufacturing",
                    "Higher premiums for companies with previous claims",
                ]),
                regions: strings(&["CA", "NY", "TX", "MA", "WA", "CO"]),
                requirements: strings(&[
                    "Business financials",
                    "Security questionnaire for cyber coverage",
                ]),
            },
            Carrier {
                id: "CAR002".to_string(),
                name: "Heritage Insurance Group".to_string(),
                specializations: strings(&["retail", "hospitality", "real_estate"]),
                min_revenue: 250_000.0,
                max_revenue: 100_000_000.0,
                coverage_types: strings(&[
                    "general_liability",
                    "property",
                    "business_interruption",
                    "workers_comp",
                ]),
                rating: 4.5,
                response_time_days: 5,
                strengths: strings(&[
                    "Comprehensive property coverage",
                    "Flexible payment terms",
                    "Established claims process",
                ]),
                limitations: strings(&[
                    "Slower quote turnaround",
                    "Less competitive for technology risks",
                ]),
                regions: strings(&["All US states"]),
                requirements: strings(&["Business license", "Property details", "Loss runs"]),
            },
            Carrier {
                id: "CAR003".to_string(),
                name: "Apex Risk Solutions".to_string(),
                specializations: strings(&["healthcare", "manufacturing", "construction"]),
                min_revenue: 1_000_000.0,
                max_revenue: 500_000_000.0,
                coverage_types: strings(&[
                    "general_liability",
                    "professional_liability",
                    "workers_comp",
                    "product_liability",
                ]),
                rating: 4.8,
                response_time_days: 4,
                strengths: strings(&[
                    "Industry-specific coverage options",
                    "Risk management services included",
                    "Flexible underwriting",
                ]),
                limitations: strings(&["Higher premiums", "Strict eligibility requirements"]),
                regions: strings(&["CA", "TX", "FL", "IL", "PA", "NY", "OH", "MI"]),
                requirements: strings(&[
                    "Detailed business operations",
                    "Safety protocols",
                    "Claims history",
                ]),
            },
            Carrier {
                id: "CAR004".to_string(),
                name: "Velocity Insurance Partners".to_string(),
                specializations: strings(&["technology", "fintech", "e-commerce"]),
                min_revenue: 100_000.0,
                max_revenue: 20_000_000.0,
                coverage_types: strings(&[
                    "general_liability",
                    "cyber",
                    "professional_liability",
                    "d&o",
                ]),
                rating: 4.6,
                response_time_days: 2,
                strengths: strings(&[
                    "Digital-first approach",
                    "Fast online quotes",
                    "Specialized startup packages",
                ]),
                limitations: strings(&[
                    "Limited coverage for physical assets",
                    "Less robust for larger businesses",
                ]),
                regions: strings(&["CA", "NY", "MA", "WA", "TX", "CO", "GA", "IL"]),
                requirements: strings(&["Digital application only", "API integration available"]),
            },
            Carrier {
                id: "CAR005".to_string(),
                name: "Guardian Commercial Coverage".to_string(),
                specializations: strings(&[
                    "manufacturing",
                    "distribution",
                    "wholesale",
                    "logistics",
                ]),
                min_revenue: 2_000_000.0,
                max_revenue: 250_000_000.0,
                coverage_types: strings(&[
                    "general_liability",
                    "property",
                    "business_interruption",
                    "marine",
                    "auto",
                ]),
                rating: 4.4,
                response_time_days: 6,
                strengths: strings(&[
                    "Supply chain coverage options",
                    "International shipping protection",
                    "Fleet discounts",
                ]),
                limitations: strings(&["Longer quote process", "Limited tech industry expertise"]),
                regions: strings(&["All US states", "International capabilities"]),
                requirements: strings(&[
                    "Business financial statements",
                    "Fleet details if applicable",
                    "Shipping volume data",
                ]),
            },
        ];

        Self { carriers }
    }

    /// All carriers, in catalog order.
    pub fn all(&self) -> &[Carrier] {
        &self.carriers
    }

    /// Looks up a carrier by id.
    pub fn get(&self, carrier_id: &str) -> Option<&Carrier> {
        self.carriers.iter().find(|c| c.id == carrier_id)
    }
}
