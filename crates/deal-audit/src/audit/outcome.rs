use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeTier {
    High,
    Medium,
    Low,
}

impl OutcomeTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    pub const fn color(self) -> OutcomeColor {
        match self {
            Self::High => OutcomeColor::Green,
            Self::Medium => OutcomeColor::Yellow,
            Self::Low => OutcomeColor::Red,
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::High => "Deal ready for launch",
            Self::Medium => "Address flagged issues before launch",
            Self::Low => "Significant remediation required",
        }
    }

    fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::High
        } else if percentage >= 60.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeColor {
    Green,
    Yellow,
    Red,
}

impl OutcomeColor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Aggregate readiness derived from how many checks passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub outcome: OutcomeTier,
    pub color: OutcomeColor,
    pub percentage: String,
    pub recommendation: &'static str,
    #[serde(skip)]
    value: f64,
}

impl Outcome {
    pub fn from_counts(passed: usize, total: usize) -> Self {
        Self::from_ratio(passed as f64, total as f64)
    }

    /// Accepts fractional counts so tier boundaries can be tested directly.
    pub fn from_ratio(passed: f64, total: f64) -> Self {
        let value = if total > 0.0 {
            passed * 100.0 / total
        } else {
            0.0
        };
        let tier = OutcomeTier::for_percentage(value);

        Self {
            outcome: tier,
            color: tier.color(),
            percentage: format!("{value:.1}"),
            recommendation: tier.recommendation(),
            value,
        }
    }

    /// Unrounded percentage, e.g. for sizing a progress bar.
    pub fn percentage_value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_are_rounded_to_one_decimal() {
        let expected = [
            "0.0", "11.1", "22.2", "33.3", "44.4", "55.6", "66.7", "77.8", "88.9", "100.0",
        ];
        for (passed, percentage) in expected.iter().enumerate() {
            assert_eq!(Outcome::from_counts(passed, 9).percentage, *percentage);
        }
    }

    #[test]
    fn tiers_follow_inclusive_lower_bounds() {
        assert_eq!(Outcome::from_counts(9, 9).outcome, OutcomeTier::High);
        assert_eq!(Outcome::from_counts(8, 9).outcome, OutcomeTier::Medium);
        assert_eq!(Outcome::from_counts(6, 9).outcome, OutcomeTier::Medium);
        assert_eq!(Outcome::from_counts(5, 9).outcome, OutcomeTier::Low);
        assert_eq!(Outcome::from_counts(0, 9).outcome, OutcomeTier::Low);
    }

    #[test]
    fn exact_boundaries_land_in_the_higher_tier() {
        let sixty = Outcome::from_ratio(5.4, 9.0);
        assert_eq!(sixty.percentage, "60.0");
        assert_eq!(sixty.outcome, OutcomeTier::Medium);

        let ninety = Outcome::from_ratio(8.1, 9.0);
        assert_eq!(ninety.percentage, "90.0");
        assert_eq!(ninety.outcome, OutcomeTier::High);

        assert_eq!(Outcome::from_ratio(5.3, 9.0).outcome, OutcomeTier::Low);
    }

    #[test]
    fn tier_drives_color_and_recommendation() {
        let low = Outcome::from_counts(2, 9);
        assert_eq!(low.color, OutcomeColor::Red);
        assert_eq!(low.recommendation, "Significant remediation required");

        let medium = Outcome::from_counts(7, 9);
        assert_eq!(medium.color, OutcomeColor::Yellow);
        assert_eq!(medium.recommendation, "Address flagged issues before launch");
    }

    #[test]
    fn zero_total_scores_zero() {
        let outcome = Outcome::from_counts(0, 0);
        assert_eq!(outcome.percentage, "0.0");
        assert_eq!(outcome.outcome, OutcomeTier::Low);
    }

    #[test]
    fn serializes_with_lowercase_color_and_uppercase_tier() {
        let value = serde_json::to_value(Outcome::from_counts(9, 9)).expect("serializes");
        assert_eq!(value["outcome"], "HIGH");
        assert_eq!(value["color"], "green");
        assert_eq!(value["percentage"], "100.0");
        assert!(value.get("value").is_none());
    }
}
