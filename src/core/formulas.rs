//! Closed-form financial primitives under the monthly-compounding model.
//!
//! Nothing here rounds: rounding happens once, at result assembly, so that
//! the 50-year iterative callers never compound rounding error.

/// Flat proportional expense loading applied per dependent.
pub const DEPENDENT_EXPENSE_LOADING: f64 = 0.2;

/// Default safe withdrawal rate in percent (the 4% rule, i.e. 25x expenses).
pub const DEFAULT_WITHDRAWAL_RATE: f64 = 4.0;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Monthly expenses after the dependents loading. Linear and uncapped; the
/// input boundary bounds dependents to [0, 6].
pub fn adjusted_monthly_expenses(monthly_expenses: f64, dependents: u32) -> f64 {
    monthly_expenses * (1.0 + dependents as f64 * DEPENDENT_EXPENSE_LOADING)
}

/// Target portfolio that funds `annual_expenses` indefinitely at the given
/// withdrawal rate (percent). The caller guarantees a non-zero rate.
pub fn fire_number(annual_expenses: f64, withdrawal_rate: f64) -> f64 {
    annual_expenses / (withdrawal_rate / 100.0)
}

/// FIRE number grown by inflation over `years`. Zero years or a zero rate
/// leaves the target unchanged.
pub fn inflation_adjusted_fire_number(fire_number: f64, inflation_rate: f64, years: u32) -> f64 {
    fire_number * (1.0 + inflation_rate / 100.0).powi(years as i32)
}

/// Present value that compounds to `fire_number` by retirement with no
/// further contributions. A zero horizon means no discount.
pub fn coast_fire_number(fire_number: f64, return_rate: f64, years_to_retirement: u32) -> f64 {
    if years_to_retirement == 0 {
        return fire_number;
    }
    fire_number / (1.0 + return_rate / 100.0).powi(years_to_retirement as i32)
}

/// Future value of a portfolio receiving a fixed monthly contribution.
///
/// FV = PV*(1+r)^n + PMT*((1+r)^n - 1)/r with r the monthly rate. A zero
/// rate degenerates to the linear case to avoid the division.
pub fn portfolio_future_value(
    present_value: f64,
    monthly_contribution: f64,
    annual_return_rate: f64,
    months: u32,
) -> f64 {
    if months == 0 {
        return present_value;
    }
    let r = annual_return_rate / 100.0 / MONTHS_PER_YEAR;
    if r == 0.0 {
        return present_value + monthly_contribution * months as f64;
    }
    let growth = (1.0 + r).powi(months as i32);
    present_value * growth + monthly_contribution * ((growth - 1.0) / r)
}

/// Monthly contribution needed to reach `target_future_value`, the annuity
/// formula solved for PMT and floored at zero (a target already met by
/// passive growth needs no further saving). `None` when the horizon is
/// zero months: no finite contribution reaches the target in no time.
pub fn required_monthly_savings(
    current_savings: f64,
    target_future_value: f64,
    annual_return_rate: f64,
    months: u32,
) -> Option<f64> {
    if months == 0 {
        return None;
    }
    let r = annual_return_rate / 100.0 / MONTHS_PER_YEAR;
    if r == 0.0 {
        return Some(((target_future_value - current_savings) / months as f64).max(0.0));
    }
    let growth = (1.0 + r).powi(months as i32);
    Some((((target_future_value - current_savings * growth) * r) / (growth - 1.0)).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assume, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_rel(actual: f64, expected: f64, rel: f64) {
        let tol = rel * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn adjusted_expenses_identity_without_dependents() {
        assert_approx(adjusted_monthly_expenses(3_500.0, 0), 3_500.0);
    }

    #[test]
    fn adjusted_expenses_adds_twenty_percent_per_dependent() {
        assert_approx(adjusted_monthly_expenses(3_000.0, 2), 4_200.0);
        assert_approx(adjusted_monthly_expenses(1_000.0, 6), 2_200.0);
    }

    #[test]
    fn fire_number_matches_25x_rule_at_default_rate() {
        assert_approx(fire_number(30_000.0, DEFAULT_WITHDRAWAL_RATE), 750_000.0);
        assert_approx(fire_number(42_000.0, DEFAULT_WITHDRAWAL_RATE), 1_050_000.0);
    }

    #[test]
    fn inflation_adjustment_is_identity_at_zero_years_or_zero_rate() {
        assert_approx(inflation_adjusted_fire_number(500_000.0, 3.0, 0), 500_000.0);
        assert_approx(inflation_adjusted_fire_number(500_000.0, 0.0, 30), 500_000.0);
    }

    #[test]
    fn inflation_adjustment_compounds_annually() {
        assert_approx(
            inflation_adjusted_fire_number(100_000.0, 3.0, 2),
            100_000.0 * 1.03 * 1.03,
        );
    }

    #[test]
    fn coast_number_equals_target_at_zero_horizon() {
        assert_approx(coast_fire_number(1_050_000.0, 7.0, 0), 1_050_000.0);
        assert_approx(coast_fire_number(1_050_000.0, 0.0, 0), 1_050_000.0);
    }

    #[test]
    fn coast_number_grows_back_to_target() {
        let target = 1_050_000.0;
        let coast = coast_fire_number(target, 7.0, 25);
        assert_approx_rel(coast * 1.07_f64.powi(25), target, 1e-9);
    }

    #[test]
    fn future_value_with_zero_months_is_present_value() {
        assert_approx(portfolio_future_value(25_000.0, 500.0, 7.0, 0), 25_000.0);
    }

    #[test]
    fn future_value_with_zero_rate_is_linear() {
        assert_approx(
            portfolio_future_value(10_000.0, 250.0, 0.0, 120),
            10_000.0 + 250.0 * 120.0,
        );
    }

    #[test]
    fn future_value_without_contributions_is_pure_compounding() {
        let fv = portfolio_future_value(50_000.0, 0.0, 6.0, 240);
        assert_approx_rel(fv, 50_000.0 * (1.0f64 + 6.0 / 1200.0).powi(240), 1e-12);
    }

    #[test]
    fn required_savings_is_none_for_zero_horizon() {
        assert!(required_monthly_savings(10_000.0, 1_000_000.0, 7.0, 0).is_none());
    }

    #[test]
    fn required_savings_zero_rate_is_linear_solve() {
        let pmt = required_monthly_savings(20_000.0, 80_000.0, 0.0, 120).unwrap();
        assert_approx(pmt, 500.0);
    }

    #[test]
    fn required_savings_floors_at_zero_when_target_already_met() {
        let pmt = required_monthly_savings(1_000_000.0, 100.0, 7.0, 120).unwrap();
        assert_approx(pmt, 0.0);
    }

    proptest! {
        #[test]
        fn prop_adjusted_expenses_monotonic_in_dependents(
            expenses in 0u32..100_000,
            dependents in 0u32..6
        ) {
            let expenses = expenses as f64;
            let lower = adjusted_monthly_expenses(expenses, dependents);
            let upper = adjusted_monthly_expenses(expenses, dependents + 1);
            prop_assert!(lower <= upper);
        }

        #[test]
        fn prop_fire_number_is_25x_expenses_at_four_percent(
            annual_expenses in 1u32..10_000_000
        ) {
            let annual_expenses = annual_expenses as f64;
            let n = fire_number(annual_expenses, DEFAULT_WITHDRAWAL_RATE);
            prop_assert!((n - annual_expenses * 25.0).abs() <= 1e-6 * n);
        }

        #[test]
        fn prop_required_savings_never_negative(
            savings in 0u32..2_000_000,
            target in 0u32..10_000_000,
            rate_bp in 0u32..1500,
            months in 1u32..600
        ) {
            let pmt = required_monthly_savings(
                savings as f64,
                target as f64,
                rate_bp as f64 / 100.0,
                months,
            );
            prop_assert!(pmt.is_some_and(|v| v >= 0.0));
        }

        #[test]
        fn prop_required_savings_round_trips_through_future_value(
            savings in 0u32..500_000,
            target in 1_000u32..10_000_000,
            rate_bp in 0u32..1200,
            months in 12u32..600
        ) {
            let savings = savings as f64;
            let target = target as f64;
            let rate = rate_bp as f64 / 100.0;

            let pmt = required_monthly_savings(savings, target, rate, months)
                .expect("positive horizon");
            let fv = portfolio_future_value(savings, pmt, rate, months);

            if pmt > 0.0 {
                // Unclamped solve reproduces the target exactly.
                prop_assert!((fv - target).abs() <= 1e-6 * target.max(1.0));
            } else {
                // Clamped to zero means passive growth already covers it.
                prop_assert!(fv >= target - 1e-6 * target.max(1.0));
            }
        }

        #[test]
        fn prop_future_value_monotonic_in_contribution(
            savings in 0u32..500_000,
            pmt in 0u32..20_000,
            rate_bp in 0u32..1500,
            months in 1u32..600
        ) {
            let low = portfolio_future_value(savings as f64, pmt as f64, rate_bp as f64 / 100.0, months);
            let high = portfolio_future_value(savings as f64, pmt as f64 + 100.0, rate_bp as f64 / 100.0, months);
            prop_assume!(low.is_finite() && high.is_finite());
            prop_assert!(high > low);
        }
    }
}
