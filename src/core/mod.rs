mod engine;
mod formulas;
mod types;

pub use engine::{
    BARISTA_EXPENSE_CEILING, DEFAULT_SCENARIO_PERCENTS, LEAN_EXPENSE_CEILING, MAX_SEARCH_YEARS,
    PROJECTION_MIN_YEARS, PROJECTION_PADDING_YEARS, REGULAR_EXPENSE_CEILING, build_projection,
    calculate_fire, determine_fire_type, select_age_message, spending_scenarios,
    years_to_fire_number,
};
pub use formulas::{
    DEFAULT_WITHDRAWAL_RATE, DEPENDENT_EXPENSE_LOADING, adjusted_monthly_expenses,
    coast_fire_number, fire_number, inflation_adjusted_fire_number, portfolio_future_value,
    required_monthly_savings,
};
pub use types::{AgeMessage, FireResult, FireType, Inputs, ProjectionPoint, SpendingScenario};
