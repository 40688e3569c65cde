//! Billing Plans
//!
//! Static plan data. No payment integration exists.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub name: &'static str,
    pub price: &'static str,
    pub features: &'static [&'static str],
    pub highlight: bool,
}

const PLANS: [Plan; 2] = [
    Plan {
        name: "Free",
        price: "$0",
        features: &[
            "Basic prompt management",
            "Limited prompts",
            "Community sharing",
            "Basic AI feedback",
        ],
        highlight: false,
    },
    Plan {
        name: "Pro",
        price: "$12/mo",
        features: &[
            "Unlimited prompts",
            "Advanced AI feedback",
            "Analytics dashboard",
            "Priority support",
        ],
        highlight: true,
    },
];

/// Plans shown on the billing page
pub fn billing_plans() -> &'static [Plan] {
    &PLANS
}
