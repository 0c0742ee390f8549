use crate::domain::model::{Tier, TierPolicy};
use rust_decimal::Decimal;

/// Static tier configuration: fee, badge color and blurb per tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierPolicies {
    emerging: TierPolicy,
    semi_pro: TierPolicy,
    studio_gallery: TierPolicy,
}

impl TierPolicies {
    /// Starts from the defaults and replaces the tiers present in `overrides`.
    pub fn with_overrides(overrides: impl IntoIterator<Item = (Tier, TierPolicy)>) -> Self {
        let mut policies = Self::default();
        for (tier, policy) in overrides {
            *policies.get_mut(tier) = policy;
        }
        policies
    }

    pub fn get(&self, tier: Tier) -> &TierPolicy {
        match tier {
            Tier::Emerging => &self.emerging,
            Tier::SemiPro => &self.semi_pro,
            Tier::StudioGallery => &self.studio_gallery,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut TierPolicy {
        match tier {
            Tier::Emerging => &mut self.emerging,
            Tier::SemiPro => &mut self.semi_pro,
            Tier::StudioGallery => &mut self.studio_gallery,
        }
    }

    pub fn fee_pct(&self, tier: Tier) -> Decimal {
        self.get(tier).fee_pct
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &TierPolicy)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

impl Default for TierPolicies {
    fn default() -> Self {
        Self {
            emerging: TierPolicy {
                color: "#94a3b8".to_string(),
                fee_pct: Decimal::from(20),
                description: "Free tier, limited uploads, basic profile.".to_string(),
            },
            semi_pro: TierPolicy {
                color: "#3b82f6".to_string(),
                fee_pct: Decimal::from(10),
                description: "Subscription tier, higher visibility, 3D/AR upload access."
                    .to_string(),
            },
            studio_gallery: TierPolicy {
                color: "#eab308".to_string(),
                fee_pct: Decimal::from(5),
                description:
                    "Premium tier, multiple locations, VR support, commission management."
                        .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fees() {
        let policies = TierPolicies::default();
        assert_eq!(policies.fee_pct(Tier::Emerging), Decimal::from(20));
        assert_eq!(policies.fee_pct(Tier::SemiPro), Decimal::from(10));
        assert_eq!(policies.fee_pct(Tier::StudioGallery), Decimal::from(5));
        assert_eq!(policies.iter().count(), 3);
    }

    #[test]
    fn test_override_keeps_other_tiers() {
        let policies = TierPolicies::with_overrides([(
            Tier::Emerging,
            TierPolicy {
                color: "gray".to_string(),
                fee_pct: Decimal::from(25),
                description: "Trial".to_string(),
            },
        )]);
        assert_eq!(policies.fee_pct(Tier::Emerging), Decimal::from(25));
        assert_eq!(policies.fee_pct(Tier::SemiPro), Decimal::from(10));
    }

    #[test]
    fn test_iteration_follows_tier_order() {
        let tiers: Vec<Tier> = TierPolicies::default().iter().map(|(t, _)| t).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }
}
