use serde::Serialize;

/// Lifestyle tier implied by annual spending, using the common FIRE
/// community bands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FireType {
    Lean,
    Barista,
    Regular,
    Fat,
}

/// Guidance tier keyed on age band, achievability and how close the
/// projected FIRE year is. The key is the contract; the wording behind
/// `text()` is presentation and free to vary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeMessage {
    AdjustPlan,
    EarlyFastTrack,
    EarlyCompounding,
    MidFastTrack,
    MidBuilding,
    LateFocused,
    LateStretch,
}

impl AgeMessage {
    pub fn text(self) -> &'static str {
        match self {
            AgeMessage::AdjustPlan => {
                "Adjust your savings rate or retirement age to make FIRE achievable. \
                 Consider Coast FIRE or Barista FIRE as intermediate milestones."
            }
            AgeMessage::EarlyFastTrack => {
                "Starting early - compound interest is your superpower. Stay consistent \
                 and you'll reach financial independence faster than most."
            }
            AgeMessage::EarlyCompounding => {
                "Great start! Time is your biggest asset. Increasing your savings rate \
                 even slightly will dramatically accelerate your FIRE date."
            }
            AgeMessage::MidFastTrack => {
                "Strong trajectory - stay consistent and keep lifestyle inflation in \
                 check. You're in the prime wealth-building years."
            }
            AgeMessage::MidBuilding => {
                "You still have plenty of time. Focus on increasing income and reducing \
                 expenses to boost your savings rate."
            }
            AgeMessage::LateFocused => {
                "Achievable with focus! Consider Coast FIRE or Barista FIRE as \
                 intermediate milestones. Every dollar saved now has significant impact."
            }
            AgeMessage::LateStretch => {
                "A targeted approach with a higher savings rate and possibly higher \
                 return strategies can make this goal reachable. Consider consulting \
                 a financial advisor."
            }
        }
    }
}

/// Validated calculator inputs. The API/CLI boundary is responsible for
/// enforcing the documented domains before constructing this.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_income: f64,
    pub current_savings: f64,
    pub monthly_expenses: f64,
    pub dependents: u32,
    pub return_rate: f64,
    pub inflation_rate: f64,
    pub withdrawal_rate: f64,
}

/// One year of the charted trajectory. Values are rounded to whole
/// currency units when the point is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub age: u32,
    pub portfolio_value: f64,
    pub fire_number: f64,
}

/// Complete result of one calculation. Monetary fields are rounded to
/// whole units at assembly; savings_rate carries one decimal place.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireResult {
    pub fire_number: f64,
    pub inflation_adjusted_fire_number: f64,
    pub adjusted_monthly_expenses: f64,
    pub adjusted_annual_expenses: f64,
    pub years_to_fire: Option<u32>,
    pub target_fire_age: Option<u32>,
    pub required_monthly_savings: Option<f64>,
    pub current_monthly_savings: f64,
    pub savings_rate: f64,
    pub coast_fire_number: f64,
    pub fire_type: FireType,
    pub age_message: AgeMessage,
    pub projection_data: Vec<ProjectionPoint>,
    pub is_achievable: bool,
    pub portfolio_at_retirement: f64,
}

/// FIRE target at a scaled spending level, for side-by-side lifestyle
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingScenario {
    pub spending_pct: u32,
    pub annual_expenses: f64,
    pub fire_number: f64,
    pub years_to_fire: Option<u32>,
}
