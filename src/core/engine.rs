use super::formulas;
use super::types::{AgeMessage, FireResult, FireType, Inputs, ProjectionPoint, SpendingScenario};

/// Upper bound of the iterative FIRE-year search. No plan is projected
/// further out than this.
pub const MAX_SEARCH_YEARS: u32 = 50;

/// Minimum trajectory length in years, so near-term targets still chart a
/// usable range.
pub const PROJECTION_MIN_YEARS: u32 = 30;

/// Years charted past the retirement target, so the post-target trend is
/// always visible.
pub const PROJECTION_PADDING_YEARS: u32 = 10;

/// Annual-expense ceilings (exclusive) for the lifestyle tiers below Fat.
pub const LEAN_EXPENSE_CEILING: f64 = 40_000.0;
pub const BARISTA_EXPENSE_CEILING: f64 = 60_000.0;
pub const REGULAR_EXPENSE_CEILING: f64 = 100_000.0;

/// Spending percentages compared side by side when the caller supplies none.
pub const DEFAULT_SCENARIO_PERCENTS: [u32; 3] = [85, 100, 120];

const EARLY_CAREER_AGE: u32 = 30;
const MID_CAREER_AGE: u32 = 40;
const FAST_TRACK_YEARS: u32 = 15;
const MID_FAST_TRACK_YEARS: u32 = 20;

const MONTHS_PER_YEAR: u32 = 12;

/// First year in 1..=[`MAX_SEARCH_YEARS`] where the projected portfolio
/// meets that year's inflation-grown target, or `None` if the bound is
/// never reached.
pub fn years_to_fire_number(
    current_savings: f64,
    monthly_savings: f64,
    return_rate: f64,
    inflation_rate: f64,
    fire_number: f64,
) -> Option<u32> {
    (1..=MAX_SEARCH_YEARS).find(|&year| {
        let projected = formulas::portfolio_future_value(
            current_savings,
            monthly_savings,
            return_rate,
            year * MONTHS_PER_YEAR,
        );
        let target = formulas::inflation_adjusted_fire_number(fire_number, inflation_rate, year);
        projected >= target
    })
}

/// Year-by-year trajectory for charting, one point per year 0..=horizon
/// where horizon = max(years to retirement + padding, the 30-year floor).
pub fn build_projection(
    current_savings: f64,
    monthly_savings: f64,
    annual_return_rate: f64,
    current_age: u32,
    retirement_age: u32,
    fire_number: f64,
    inflation_rate: f64,
) -> Vec<ProjectionPoint> {
    let years_to_retirement = retirement_age.saturating_sub(current_age);
    let total_years = (years_to_retirement + PROJECTION_PADDING_YEARS).max(PROJECTION_MIN_YEARS);

    (0..=total_years)
        .map(|year| {
            let portfolio_value = formulas::portfolio_future_value(
                current_savings,
                monthly_savings,
                annual_return_rate,
                year * MONTHS_PER_YEAR,
            );
            let inflated_target =
                formulas::inflation_adjusted_fire_number(fire_number, inflation_rate, year);
            ProjectionPoint {
                year,
                age: current_age + year,
                portfolio_value: portfolio_value.round(),
                fire_number: inflated_target.round(),
            }
        })
        .collect()
}

/// Lifestyle tier from adjusted annual expenses. Strict less-than at each
/// ceiling: an expense level exactly on a ceiling falls into the next tier.
pub fn determine_fire_type(annual_expenses: f64) -> FireType {
    const LADDER: [(f64, FireType); 3] = [
        (LEAN_EXPENSE_CEILING, FireType::Lean),
        (BARISTA_EXPENSE_CEILING, FireType::Barista),
        (REGULAR_EXPENSE_CEILING, FireType::Regular),
    ];

    for (ceiling, tier) in LADDER {
        if annual_expenses < ceiling {
            return tier;
        }
    }
    FireType::Fat
}

/// Guidance tier from age band crossed with how close the FIRE year is.
/// Evaluated in band order, first match wins.
pub fn select_age_message(
    current_age: u32,
    years_to_fire: Option<u32>,
    is_achievable: bool,
) -> AgeMessage {
    let years = match years_to_fire {
        Some(years) if is_achievable => years,
        _ => return AgeMessage::AdjustPlan,
    };

    if current_age <= EARLY_CAREER_AGE {
        return if years <= FAST_TRACK_YEARS {
            AgeMessage::EarlyFastTrack
        } else {
            AgeMessage::EarlyCompounding
        };
    }
    if current_age <= MID_CAREER_AGE {
        return if years <= MID_FAST_TRACK_YEARS {
            AgeMessage::MidFastTrack
        } else {
            AgeMessage::MidBuilding
        };
    }
    if years <= FAST_TRACK_YEARS {
        AgeMessage::LateFocused
    } else {
        AgeMessage::LateStretch
    }
}

/// Full calculation pipeline. Total over the validated input domain: every
/// input combination yields a complete result, with `None` fields standing
/// in for "no year found" and "unreachable in non-positive time". Rounding
/// of monetary outputs happens only here.
pub fn calculate_fire(inputs: &Inputs) -> FireResult {
    let years_to_target = inputs.retirement_age.saturating_sub(inputs.current_age);
    let months_to_target = years_to_target * MONTHS_PER_YEAR;

    let adjusted_monthly =
        formulas::adjusted_monthly_expenses(inputs.monthly_expenses, inputs.dependents);
    let adjusted_annual = adjusted_monthly * 12.0;

    let fire_number = formulas::fire_number(adjusted_annual, inputs.withdrawal_rate);
    let inflation_adjusted = formulas::inflation_adjusted_fire_number(
        fire_number,
        inputs.inflation_rate,
        years_to_target,
    );

    // Deficit income saves nothing rather than a negative amount.
    let monthly_income = inputs.annual_income / 12.0;
    let current_monthly_savings = (monthly_income - adjusted_monthly).max(0.0);
    let savings_rate = if inputs.annual_income > 0.0 {
        current_monthly_savings * 12.0 / inputs.annual_income * 100.0
    } else {
        0.0
    };

    let portfolio_at_retirement = formulas::portfolio_future_value(
        inputs.current_savings,
        current_monthly_savings,
        inputs.return_rate,
        months_to_target,
    );
    // Snapshot at the chosen retirement age, deliberately independent of
    // the year-by-year search below; the two signals may disagree.
    let is_achievable = portfolio_at_retirement >= inflation_adjusted;

    let years_to_fire = years_to_fire_number(
        inputs.current_savings,
        current_monthly_savings,
        inputs.return_rate,
        inputs.inflation_rate,
        fire_number,
    );
    let target_fire_age = years_to_fire.map(|years| inputs.current_age + years);

    let required_monthly_savings = formulas::required_monthly_savings(
        inputs.current_savings,
        inflation_adjusted,
        inputs.return_rate,
        months_to_target,
    );

    let coast_fire_number =
        formulas::coast_fire_number(fire_number, inputs.return_rate, years_to_target);

    let fire_type = determine_fire_type(adjusted_annual);
    let age_message = select_age_message(
        inputs.current_age,
        years_to_fire,
        is_achievable || years_to_fire.is_some(),
    );

    let projection_data = build_projection(
        inputs.current_savings,
        current_monthly_savings,
        inputs.return_rate,
        inputs.current_age,
        inputs.retirement_age,
        fire_number,
        inputs.inflation_rate,
    );

    FireResult {
        fire_number: fire_number.round(),
        inflation_adjusted_fire_number: inflation_adjusted.round(),
        adjusted_monthly_expenses: adjusted_monthly.round(),
        adjusted_annual_expenses: adjusted_annual.round(),
        years_to_fire,
        target_fire_age,
        required_monthly_savings: required_monthly_savings.map(f64::round),
        current_monthly_savings: current_monthly_savings.round(),
        savings_rate: (savings_rate * 10.0).round() / 10.0,
        coast_fire_number: coast_fire_number.round(),
        fire_type,
        age_message,
        projection_data,
        is_achievable,
        portfolio_at_retirement: portfolio_at_retirement.round(),
    }
}

/// FIRE target and distance for each spending percentage, scaled from the
/// already-rounded result figures exactly as the comparison widget does.
pub fn spending_scenarios(
    inputs: &Inputs,
    results: &FireResult,
    percents: &[u32],
) -> Vec<SpendingScenario> {
    percents
        .iter()
        .map(|&spending_pct| {
            let annual_expenses = results.adjusted_annual_expenses * (spending_pct as f64 / 100.0);
            let fire_number = formulas::fire_number(annual_expenses, inputs.withdrawal_rate);
            let years_to_fire = years_to_fire_number(
                inputs.current_savings,
                results.current_monthly_savings,
                inputs.return_rate,
                inputs.inflation_rate,
                fire_number,
            );
            SpendingScenario {
                spending_pct,
                annual_expenses: annual_expenses.round(),
                fire_number: fire_number.round(),
                years_to_fire,
            }
        })
        .collect()
}
