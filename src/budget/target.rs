//! Target progress
//!
//! How far a category is from its savings target this month.

use serde::Serialize;

use crate::models::{CategoryTarget, Money, RefillType, TargetType};

/// Progress of one category toward its target in one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProgress {
    pub target_type: TargetType,
    pub refill: RefillType,
    pub amount: Money,
    /// Leftover from before this month's assignment and activity, floored at zero
    pub carryover: Money,
    /// Still to assign this month to meet the target
    pub needed: Money,
    /// 0.0 ..= 1.0
    pub progress: f64,
}

impl TargetProgress {
    pub fn is_met(&self) -> bool {
        self.needed.is_zero()
    }
}

/// Compute target progress from the month's figures
///
/// Under `refill` the carryover counts toward the target; under `set_aside`
/// every month has to be funded in full.
pub fn target_progress(
    target: &CategoryTarget,
    available: Money,
    assigned: Money,
    activity: Money,
) -> TargetProgress {
    let carryover = (available - assigned - activity).floor_zero();

    let needed = match target.refill {
        RefillType::Refill => (target.amount - assigned - carryover).floor_zero(),
        RefillType::SetAside => (target.amount - assigned).floor_zero(),
    };

    TargetProgress {
        target_type: target.target_type,
        refill: target.refill,
        amount: target.amount,
        carryover,
        needed,
        progress: progress_ratio(target.amount, needed),
    }
}

fn progress_ratio(amount: Money, needed: Money) -> f64 {
    if !amount.is_positive() {
        return 1.0;
    }
    let funded = (amount - needed).cents() as f64;
    (funded / amount.cents() as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, UserId};
    use proptest::prelude::*;

    fn target(amount: i64, refill: RefillType) -> CategoryTarget {
        CategoryTarget::new(
            UserId::new(),
            CategoryId::new(),
            TargetType::Monthly,
            Money::from_cents(amount),
            refill,
        )
    }

    #[test]
    fn test_refill_credits_carryover() {
        let progress = target_progress(
            &target(5000, RefillType::Refill),
            Money::from_cents(5000),
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(progress.carryover.cents(), 5000);
        assert_eq!(progress.needed.cents(), 0);
        assert_eq!(progress.progress, 1.0);
        assert!(progress.is_met());
    }

    #[test]
    fn test_set_aside_ignores_carryover() {
        let progress = target_progress(
            &target(5000, RefillType::SetAside),
            Money::from_cents(5000),
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(progress.needed.cents(), 5000);
        assert_eq!(progress.progress, 0.0);
    }

    #[test]
    fn test_partial_funding() {
        // 20.00 carried over, 10.00 assigned, 5.00 spent this month.
        let progress = target_progress(
            &target(5000, RefillType::Refill),
            Money::from_cents(2500),
            Money::from_cents(1000),
            Money::from_cents(-500),
        );
        assert_eq!(progress.carryover.cents(), 2000);
        assert_eq!(progress.needed.cents(), 2000);
        assert!((progress.progress - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_overspent_history_gives_no_carryover() {
        let progress = target_progress(
            &target(5000, RefillType::Refill),
            Money::from_cents(-3000),
            Money::zero(),
            Money::zero(),
        );
        assert_eq!(progress.carryover, Money::zero());
        assert_eq!(progress.needed.cents(), 5000);
    }

    #[test]
    fn test_over_assigned_caps_at_one() {
        let progress = target_progress(
            &target(5000, RefillType::SetAside),
            Money::from_cents(9000),
            Money::from_cents(9000),
            Money::zero(),
        );
        assert_eq!(progress.needed, Money::zero());
        assert_eq!(progress.progress, 1.0);
    }

    proptest! {
        #[test]
        fn prop_set_aside_never_needs_less_than_refill(
            amount in 1i64..1_000_000,
            available in -1_000_000i64..1_000_000,
            assigned in 0i64..1_000_000,
            activity in -1_000_000i64..1_000_000,
        ) {
            let available = Money::from_cents(available);
            let assigned = Money::from_cents(assigned);
            let activity = Money::from_cents(activity);

            let refill = target_progress(&target(amount, RefillType::Refill), available, assigned, activity);
            let set_aside = target_progress(&target(amount, RefillType::SetAside), available, assigned, activity);

            prop_assert!(set_aside.needed >= refill.needed);
            prop_assert!(set_aside.progress <= refill.progress);
            prop_assert!((0.0..=1.0).contains(&refill.progress));
        }
    }
}
