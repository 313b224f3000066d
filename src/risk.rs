//! Additive heuristic risk scoring and fraud labelling

use crate::types::transaction::{MerchantCategory, PaymentMethod, TransactionStatus};
use rand::Rng;

/// Scores above this are eligible for the fraud label
pub const FRAUD_THRESHOLD: u8 = 70;

/// Probability that an eligible record is actually labelled fraud
pub const FRAUD_LABEL_PROBABILITY: f64 = 0.3;

/// Inclusive bounds of the uniform noise added to the rule score
pub const NOISE_RANGE: (i32, i32) = (-5, 10);

/// Inputs the rules look at
#[derive(Debug, Clone, Copy)]
pub struct RiskSignals {
    pub amount: f64,
    pub hour: u32,
    pub category: MerchantCategory,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub is_private_ip: bool,
}

impl RiskSignals {
    /// Sum of every rule that fires, before noise and clamping
    pub fn rule_score(&self) -> i32 {
        let mut score = 0;

        if self.amount > 500.0 {
            score += 30;
        }
        if self.amount > 1000.0 {
            score += 20;
        }
        // `hour > 23` never fires: hours are drawn from 0..=23
        if self.hour < 6 || self.hour > 23 {
            score += 15;
        }
        if self.category == MerchantCategory::Online {
            score += 10;
        }
        if self.payment_method == PaymentMethod::DigitalWallet {
            score += 5;
        }
        if self.status == TransactionStatus::Failed {
            score += 25;
        }
        if self.is_private_ip {
            score += 20;
        }

        score
    }
}

/// Combine a rule score with a noise term and clamp to 0..=100
pub fn clamp_score(rule_score: i32, noise: i32) -> u8 {
    rule_score.saturating_add(noise).clamp(0, 100) as u8
}

/// Score a record, drawing one noise term from `rng`
pub fn score<R: Rng + ?Sized>(signals: &RiskSignals, rng: &mut R) -> u8 {
    let noise = rng.gen_range(NOISE_RANGE.0..=NOISE_RANGE.1);
    clamp_score(signals.rule_score(), noise)
}

/// Fraud label for a scored record.
///
/// The gate draw is only taken for scores above the threshold.
pub fn is_fraud<R: Rng + ?Sized>(risk_score: u8, rng: &mut R) -> bool {
    risk_score > FRAUD_THRESHOLD && rng.gen::<f64>() < FRAUD_LABEL_PROBABILITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet() -> RiskSignals {
        RiskSignals {
            amount: 42.0,
            hour: 12,
            category: MerchantCategory::Retail,
            payment_method: PaymentMethod::CreditCard,
            status: TransactionStatus::Completed,
            is_private_ip: false,
        }
    }

    #[test]
    fn test_no_rules_fire() {
        assert_eq!(quiet().rule_score(), 0);
    }

    #[test]
    fn test_every_rule_stacks() {
        let signals = RiskSignals {
            amount: 1000.01,
            hour: 3,
            category: MerchantCategory::Online,
            payment_method: PaymentMethod::DigitalWallet,
            status: TransactionStatus::Failed,
            is_private_ip: true,
        };
        assert_eq!(signals.rule_score(), 30 + 20 + 15 + 10 + 5 + 25 + 20);
        assert_eq!(clamp_score(signals.rule_score(), 10), 100);
    }

    #[test]
    fn test_amount_thresholds_are_strict() {
        let at = |amount| RiskSignals { amount, ..quiet() }.rule_score();
        assert_eq!(at(500.0), 0);
        assert_eq!(at(500.01), 30);
        assert_eq!(at(1000.0), 30);
        assert_eq!(at(1000.01), 50);
    }

    #[test]
    fn test_night_hours() {
        let at = |hour| RiskSignals { hour, ..quiet() }.rule_score();
        assert_eq!(at(0), 15);
        assert_eq!(at(5), 15);
        assert_eq!(at(6), 0);
        assert_eq!(at(23), 0);
    }

    #[test]
    fn test_clamp_floor() {
        assert_eq!(clamp_score(0, -5), 0);
        assert_eq!(clamp_score(3, -5), 0);
        assert_eq!(clamp_score(70, 1), 71);
    }

    #[test]
    fn test_low_scores_never_labelled() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for score in 0..=FRAUD_THRESHOLD {
            assert!(!is_fraud(score, &mut rng));
        }
    }

    #[test]
    fn test_high_scores_labelled_sometimes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let labelled = (0..10_000).filter(|_| is_fraud(100, &mut rng)).count();
        // ~30% with plenty of slack
        assert!((2_500..3_500).contains(&labelled), "labelled {labelled}");
    }

    proptest! {
        #[test]
        fn prop_score_is_clamped(rule in -1000i32..1000, noise in -1000i32..1000) {
            let score = clamp_score(rule, noise);
            prop_assert!(score <= 100);
        }

        #[test]
        fn prop_noise_stays_in_range(
            seed in any::<u64>(),
            amount in 0.01f64..2000.0,
            hour in 0u32..24,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let signals = RiskSignals { amount, hour, ..quiet() };
            let rule = signals.rule_score();
            let scored = i32::from(score(&signals, &mut rng));
            prop_assert!(scored >= (rule + NOISE_RANGE.0).max(0));
            prop_assert!(scored <= (rule + NOISE_RANGE.1).min(100));
        }
    }
}
