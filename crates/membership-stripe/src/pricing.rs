//! Plan definitions and price display math.

use serde::{Deserialize, Serialize};

/// Features listed on the lifetime plan by default.
pub const DEFAULT_PLAN_FEATURES: &[&str] = &[
    "Full access to all the premium courses",
    "Closed captions for every video",
    "Commenting and support",
    "Enhanced Transcripts",
    "RSS course feeds",
];

/// Price of a plan in whole dollars, with an optional discounted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPrice {
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_discounted: Option<u32>,
}

impl PlanPrice {
    pub fn new(price: u32) -> Self {
        Self { price, price_discounted: None }
    }

    pub fn discounted(price: u32, price_discounted: u32) -> Self {
        Self { price, price_discounted: Some(price_discounted) }
    }

    /// The price to show: the discounted price when set and non-zero.
    pub fn display_price(&self) -> u32 {
        match self.price_discounted {
            Some(d) if d > 0 => d,
            _ => self.price,
        }
    }

    /// Whole-number percentage saved, rounded half away from zero.
    ///
    /// `None` without a discount, for a zero list price, or when the
    /// "discounted" price is above the list price.
    pub fn discount_percentage(&self) -> Option<u32> {
        let discounted = self.price_discounted.filter(|d| *d > 0)?;
        if self.price == 0 || discounted > self.price {
            return None;
        }
        let saved = f64::from(self.price - discounted) * 100.0 / f64::from(self.price);
        Some(saved.round() as u32)
    }
}

/// Purchasable plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: PlanPrice,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Plan {
    /// The lifetime membership plan.
    pub fn lifetime() -> Self {
        Self {
            id: "lifetime".to_string(),
            name: "Lifetime Membership".to_string(),
            price: PlanPrice::new(500),
            features: DEFAULT_PLAN_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::lifetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price() {
        assert_eq!(PlanPrice::new(500).display_price(), 500);
        assert_eq!(PlanPrice::discounted(500, 350).display_price(), 350);
        assert_eq!(PlanPrice::discounted(500, 0).display_price(), 500);
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(PlanPrice::new(500).discount_percentage(), None);
        assert_eq!(PlanPrice::discounted(500, 350).discount_percentage(), Some(30));
        assert_eq!(PlanPrice::discounted(300, 199).discount_percentage(), Some(34));
        assert_eq!(PlanPrice::discounted(0, 10).discount_percentage(), None);
    }

    #[test]
    fn test_markup_is_not_a_discount() {
        assert_eq!(PlanPrice::discounted(500, 600).discount_percentage(), None);
        assert_eq!(PlanPrice::discounted(500, 500).discount_percentage(), Some(0));
    }

    #[test]
    fn test_lifetime_plan() {
        let plan = Plan::lifetime();
        assert_eq!(plan.price.display_price(), 500);
        assert_eq!(plan.features.len(), 5);
    }
}
