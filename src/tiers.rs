//! Tiers
//!
//! Spend tiers for the tiered subtotal discount. A tier unlocks its percentage once the cart
//! subtotal reaches its threshold.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::configuration::Configuration;

/// A single `(threshold, percentage)` tier.
///
/// A threshold configured without a matching percentage is kept as a tier with no
/// percentage, so it still takes part in the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    threshold: Decimal,
    percentage: Option<Decimal>,
}

impl Tier {
    /// Create a new tier.
    pub fn new(threshold: Decimal, percentage: Decimal) -> Self {
        Self {
            threshold,
            percentage: Some(percentage),
        }
    }

    /// Create a tier whose threshold has no percentage configured.
    pub fn unpriced(threshold: Decimal) -> Self {
        Self {
            threshold,
            percentage: None,
        }
    }

    /// Return the spend threshold.
    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Return the percentage unlocked at the threshold, if one is configured.
    pub fn percentage(&self) -> Option<Decimal> {
        self.percentage
    }

    /// Whether `subtotal` reaches this tier.
    pub fn is_reached(&self, subtotal: Decimal) -> bool {
        self.threshold <= subtotal
    }
}

/// Pair index-aligned thresholds and percentages into tiers.
///
/// Every threshold becomes a tier; one without a percentage at the same index becomes an
/// [unpriced](Tier::unpriced) tier. Percentages past the last threshold are dropped.
pub fn zip_tiers(thresholds: &[Decimal], percentages: &[Decimal]) -> SmallVec<[Tier; 4]> {
    thresholds
        .iter()
        .enumerate()
        .map(|(index, threshold)| match percentages.get(index) {
            Some(percentage) => Tier::new(*threshold, *percentage),
            None => Tier::unpriced(*threshold),
        })
        .collect()
}

/// Resolve the percentage for `subtotal`.
///
/// Tiers are scanned in configured order and the last reached tier wins, even when an
/// earlier tier has a larger threshold. A winning tier without a percentage resolves to
/// `None`; no earlier tier is substituted.
pub fn resolve(configuration: &Configuration, subtotal: Decimal) -> Option<Decimal> {
    configuration
        .tiers()
        .iter()
        .rfind(|tier| tier.is_reached(subtotal))
        .and_then(Tier::percentage)
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn configuration(tiers: &[(i64, i64)]) -> Configuration {
        Configuration::default().with_tiers(
            tiers
                .iter()
                .map(|(threshold, percentage)| {
                    Tier::new(Decimal::from(*threshold), Decimal::from(*percentage))
                })
                .collect(),
        )
    }

    #[test]
    fn last_reached_tier_in_configured_order_wins() {
        let configuration = configuration(&[(100, 10), (50, 20)]);

        // Both tiers are reached; the later one wins despite its smaller threshold.
        assert_eq!(
            resolve(&configuration, Decimal::from(120)),
            Some(Decimal::from(20))
        );
        assert_eq!(
            resolve(&configuration, Decimal::from(75)),
            Some(Decimal::from(20))
        );
    }

    #[test]
    fn sorted_tiers_pick_highest_reached() {
        let configuration = configuration(&[(50, 5), (100, 10), (200, 20)]);

        assert_eq!(
            resolve(&configuration, Decimal::from(150)),
            Some(Decimal::from(10))
        );
        assert_eq!(
            resolve(&configuration, Decimal::from(200)),
            Some(Decimal::from(20))
        );
    }

    #[test]
    fn no_reached_tier_resolves_to_none() {
        let configuration = configuration(&[(100, 10), (50, 20)]);

        assert_eq!(resolve(&configuration, Decimal::from(49)), None);
        assert_eq!(resolve(&Configuration::default(), Decimal::from(1000)), None);
    }

    #[test]
    fn zip_keeps_thresholds_without_percentages() {
        let tiers = zip_tiers(
            &[Decimal::from(10), Decimal::from(20), Decimal::from(30)],
            &[Decimal::from(1), Decimal::from(2)],
        );

        let expected: SmallVec<[Tier; 4]> = smallvec![
            Tier::new(Decimal::from(10), Decimal::from(1)),
            Tier::new(Decimal::from(20), Decimal::from(2)),
            Tier::unpriced(Decimal::from(30)),
        ];

        assert_eq!(tiers, expected);
    }

    #[test]
    fn zip_drops_percentages_without_thresholds() {
        let tiers = zip_tiers(
            &[Decimal::from(10)],
            &[Decimal::from(1), Decimal::from(2)],
        );

        assert_eq!(tiers.as_slice(), &[Tier::new(Decimal::from(10), Decimal::from(1))]);
    }

    #[test]
    fn unpriced_winning_tier_resolves_to_none() {
        let configuration = Configuration::default().with_tiers(zip_tiers(
            &[Decimal::from(50), Decimal::from(100)],
            &[Decimal::from(10)],
        ));

        // The 100 tier is the last one reached and has no percentage.
        assert_eq!(resolve(&configuration, Decimal::from(120)), None);
        assert_eq!(
            resolve(&configuration, Decimal::from(75)),
            Some(Decimal::from(10))
        );
    }
}
