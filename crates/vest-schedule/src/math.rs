//! Pure release-curve functions.
//!
//! All quantities are non-negative integers in smallest units and every
//! division truncates. None of these functions can panic or overflow.

use vest_types::{Amount, Timestamp};

use crate::params::ScheduleParams;

/// `floor(total * numerator / denominator)` without an intermediate overflow.
///
/// Splits `total` into `q * d + r` so that `r * n` stays below `d * n <= 2^32`.
/// A ratio above one saturates at `Amount::MAX`.
pub fn mul_div_floor(total: Amount, numerator: u16, denominator: u16) -> Amount {
    if denominator == 0 {
        return 0;
    }
    let n = Amount::from(numerator);
    let d = Amount::from(denominator);
    (total / d)
        .saturating_mul(n)
        .saturating_add((total % d) * n / d)
}

/// Amount released atomically when the cliff ends.
pub fn cliff_unlock_amount(params: &ScheduleParams, original_total: Amount) -> Amount {
    mul_div_floor(
        original_total,
        params.cliff_numerator(),
        params.cliff_denominator(),
    )
}

/// Number of whole release steps in the vesting period. Always at least one.
pub fn periods_total(params: &ScheduleParams) -> u64 {
    (params.vesting_period() / params.distribution_frequency()).max(1)
}

/// Amount released by each post-cliff step, truncated.
///
/// The truncation remainder is not redistributed; it is swept once the
/// schedule is fully vested.
pub fn per_period_amount(params: &ScheduleParams, original_total: Amount) -> Amount {
    let after_cliff = original_total.saturating_sub(cliff_unlock_amount(params, original_total));
    after_cliff / Amount::from(periods_total(params))
}

/// The instant from which the entire remaining balance is claimable.
pub fn vesting_end(params: &ScheduleParams) -> Timestamp {
    params.cliff_end().saturating_add(params.vesting_period())
}

pub fn is_fully_vested(params: &ScheduleParams, now: Timestamp) -> bool {
    now >= vesting_end(params)
}

/// Completed post-cliff steps at `now`, capped at [`periods_total`].
pub fn periods_elapsed(params: &ScheduleParams, now: Timestamp) -> u64 {
    match now.seconds_since(params.cliff_end()) {
        Some(elapsed) => (elapsed / params.distribution_frequency()).min(periods_total(params)),
        None => 0,
    }
}

/// Total unlocked at `now`, regardless of what has been claimed.
///
/// Equals `original_total` once fully vested.
pub fn vested_total(params: &ScheduleParams, original_total: Amount, now: Timestamp) -> Amount {
    if now < params.cliff_end() {
        return 0;
    }
    if is_fully_vested(params, now) {
        return original_total;
    }
    let stepped = per_period_amount(params, original_total)
        .saturating_mul(Amount::from(periods_elapsed(params, now)));
    cliff_unlock_amount(params, original_total)
        .saturating_add(stepped)
        .min(original_total)
}

/// Amount the claimer may withdraw at `now`.
///
/// Clamped to `[0, original_total - claimed_total]`. Once the schedule is
/// fully vested this is exactly the remaining balance; the stepped formula is
/// never applied at or past the end.
pub fn claimable(
    params: &ScheduleParams,
    original_total: Amount,
    claimed_total: Amount,
    now: Timestamp,
) -> Amount {
    let remaining = original_total.saturating_sub(claimed_total);
    if now < params.cliff_end() {
        return 0;
    }
    if is_fully_vested(params, now) {
        return remaining;
    }
    let stepped = per_period_amount(params, original_total)
        .saturating_mul(Amount::from(periods_elapsed(params, now)));
    cliff_unlock_amount(params, original_total)
        .saturating_add(stepped)
        .saturating_sub(claimed_total)
        .min(remaining)
}

/// When the next unlock happens after `now`, or `None` once fully vested.
///
/// Before the cliff this is the cliff itself. Inside the release window it is
/// the next step boundary, or the vesting end when no whole step remains.
pub fn next_unlock_at(params: &ScheduleParams, now: Timestamp) -> Option<Timestamp> {
    if is_fully_vested(params, now) {
        return None;
    }
    if now < params.cliff_end() {
        return Some(params.cliff_end());
    }
    let end = vesting_end(params);
    let elapsed = periods_elapsed(params, now);
    if elapsed >= periods_total(params) {
        return Some(end);
    }
    let offset = (elapsed + 1).saturating_mul(params.distribution_frequency());
    Some(params.cliff_end().saturating_add(offset).min(end))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const DAY: u64 = 86_400;
    const TOTAL: Amount = 200_000;

    fn cliff_end() -> Timestamp {
        Timestamp::from_secs(1_700_000_000)
    }

    fn reference_params() -> ScheduleParams {
        ScheduleParams::new(cliff_end(), 20, 100, 365 * DAY, 30 * DAY).unwrap()
    }

    fn at(days_after_cliff: u64) -> Timestamp {
        cliff_end().saturating_add(days_after_cliff * DAY)
    }

    #[test]
    fn cliff_unlock_is_the_cliff_fraction() {
        assert_eq!(cliff_unlock_amount(&reference_params(), TOTAL), 40_000);
    }

    #[test]
    fn periods_and_step_size() {
        let p = reference_params();
        assert_eq!(periods_total(&p), 12);
        assert_eq!(per_period_amount(&p, TOTAL), 13_333);
    }

    #[test]
    fn nothing_before_cliff() {
        let p = reference_params();
        let one_second_before = Timestamp::from_secs(cliff_end().as_secs() - 1);
        assert_eq!(claimable(&p, TOTAL, 0, one_second_before), 0);
        assert_eq!(claimable(&p, TOTAL, 0, Timestamp::zero()), 0);
        assert_eq!(vested_total(&p, TOTAL, one_second_before), 0);
    }

    #[test]
    fn cliff_amount_exactly_at_cliff() {
        assert_eq!(claimable(&reference_params(), TOTAL, 0, cliff_end()), 40_000);
    }

    #[test]
    fn six_periods_after_185_days() {
        let p = reference_params();
        assert_eq!(periods_elapsed(&p, at(185)), 6);
        assert_eq!(claimable(&p, TOTAL, 0, at(185)), 119_998);
    }

    #[test]
    fn claimed_amount_is_subtracted() {
        let p = reference_params();
        assert_eq!(claimable(&p, TOTAL, 40_000, at(185)), 79_998);
        assert_eq!(claimable(&p, TOTAL, 119_998, at(185)), 0);
    }

    #[test]
    fn last_whole_step_leaves_dust_until_the_end() {
        let p = reference_params();
        // 12 steps complete at day 360, the window closes at day 365.
        assert_eq!(claimable(&p, TOTAL, 0, at(360)), 40_000 + 13_333 * 12);
        assert_eq!(claimable(&p, TOTAL, 0, at(364)), 199_996);
        assert_eq!(claimable(&p, TOTAL, 0, at(365)), TOTAL);
    }

    #[test]
    fn fully_vested_sweeps_remaining_balance() {
        let p = reference_params();
        assert_eq!(claimable(&p, TOTAL, 199_996, at(365)), 4);
        assert_eq!(claimable(&p, TOTAL, TOTAL, at(400)), 0);
        assert_eq!(vested_total(&p, TOTAL, at(400)), TOTAL);
    }

    #[test]
    fn claimed_above_entitlement_clamps_to_zero() {
        let p = reference_params();
        assert_eq!(claimable(&p, TOTAL, 150_000, at(30)), 0);
    }

    #[test]
    fn next_unlock_walks_the_boundaries() {
        let p = reference_params();
        assert_eq!(next_unlock_at(&p, Timestamp::zero()), Some(cliff_end()));
        assert_eq!(next_unlock_at(&p, cliff_end()), Some(at(30)));
        assert_eq!(next_unlock_at(&p, at(185)), Some(at(210)));
        assert_eq!(next_unlock_at(&p, at(361)), Some(at(365)));
        assert_eq!(next_unlock_at(&p, at(365)), None);
    }

    #[test]
    fn mul_div_handles_extreme_totals() {
        assert_eq!(mul_div_floor(u128::MAX, 1, 1), u128::MAX);
        assert_eq!(mul_div_floor(u128::MAX, 1, 2), u128::MAX / 2);
        assert_eq!(mul_div_floor(u128::MAX, u16::MAX, u16::MAX), u128::MAX);
        assert_eq!(mul_div_floor(7, 1, 0), 0);
    }

    #[test]
    fn mul_div_floor_saturates_above_one() {
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), u128::MAX);
        assert_eq!(mul_div_floor(u128::MAX - 1, 3, 2), u128::MAX);
        assert_eq!(mul_div_floor(10, 3, 2), 15);
    }

    #[test]
    fn end_of_time_schedule_does_not_overflow() {
        let far = Timestamp::from_secs(u64::MAX - 10);
        let p = ScheduleParams::new(far, 1, 2, u64::MAX, u64::MAX).unwrap();
        assert_eq!(vesting_end(&p).as_secs(), u64::MAX);
        assert_eq!(claimable(&p, TOTAL, 0, far), TOTAL / 2);
        assert_eq!(claimable(&p, TOTAL, 0, Timestamp::from_secs(u64::MAX)), TOTAL);
    }

    fn arb_params() -> impl Strategy<Value = ScheduleParams> {
        (
            0u64..2_000_000_000,
            1u16..=1000,
            1u64..=400 * DAY,
            1u64..=400 * DAY,
        )
            .prop_flat_map(|(cliff, denominator, a, b)| {
                let (frequency, period) = if a <= b { (a, b) } else { (b, a) };
                (
                    Just(cliff),
                    1u16..=denominator,
                    Just(denominator),
                    Just(period),
                    Just(frequency),
                )
            })
            .prop_map(|(cliff, n, d, period, frequency)| {
                ScheduleParams::new(Timestamp::from_secs(cliff), n, d, period, frequency).unwrap()
            })
    }

    proptest! {
        #[test]
        fn zero_before_cliff(p in arb_params(), total in 0u128..u64::MAX as u128, back in 1u64..1_000_000) {
            let now = Timestamp::from_secs(p.cliff_end().as_secs().saturating_sub(back));
            prop_assume!(now < p.cliff_end());
            prop_assert_eq!(claimable(&p, total, 0, now), 0);
        }

        #[test]
        fn stepped_formula_inside_window(p in arb_params(), total in 0u128..u64::MAX as u128, offset in 0u64..400 * DAY) {
            let now = p.cliff_end().saturating_add(offset);
            prop_assume!(!is_fully_vested(&p, now));
            let expected = cliff_unlock_amount(&p, total)
                + per_period_amount(&p, total) * Amount::from(periods_elapsed(&p, now));
            prop_assert_eq!(claimable(&p, total, 0, now), expected);
            prop_assert!(expected <= total);
        }

        #[test]
        fn monotone_in_time(p in arb_params(), total in 0u128..u64::MAX as u128, a in 0u64..800 * DAY, b in 0u64..800 * DAY) {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let base = p.cliff_end().as_secs().saturating_sub(100 * DAY);
            let t1 = Timestamp::from_secs(base).saturating_add(early);
            let t2 = Timestamp::from_secs(base).saturating_add(late);
            prop_assert!(claimable(&p, total, 0, t1) <= claimable(&p, total, 0, t2));
        }

        #[test]
        fn full_sweep_after_end(p in arb_params(), total in 0u128..u64::MAX as u128, claimed_share in 0u128..=100, extra in 0u64..1_000_000) {
            let claimed = total * claimed_share / 100;
            let now = vesting_end(&p).saturating_add(extra);
            prop_assert_eq!(claimable(&p, total, claimed, now), total - claimed);
        }

        #[test]
        fn never_exceeds_remaining(p in arb_params(), total in 0u128..u64::MAX as u128, claimed_share in 0u128..=100, offset in 0u64..800 * DAY) {
            let claimed = total * claimed_share / 100;
            let now = p.cliff_end().saturating_add(offset);
            prop_assert!(claimable(&p, total, claimed, now) <= total - claimed);
        }

        #[test]
        fn evaluation_is_idempotent(p in arb_params(), total in 0u128..u64::MAX as u128, offset in 0u64..800 * DAY) {
            let now = p.cliff_end().saturating_add(offset);
            prop_assert_eq!(claimable(&p, total, 0, now), claimable(&p, total, 0, now));
        }
    }
}
