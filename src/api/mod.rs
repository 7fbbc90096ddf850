use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    DEFAULT_SCENARIO_PERCENTS, FireResult, Inputs, SpendingScenario, calculate_fire,
    spending_scenarios,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MIN_CURRENT_AGE: u32 = 18;
const MAX_CURRENT_AGE: u32 = 70;
const MAX_RETIREMENT_AGE: u32 = 80;
const MAX_DEPENDENTS: u32 = 6;

/// Calculation request as the web form and share URLs send it. Every field
/// is optional and falls back to the site defaults; the short aliases are
/// the original share-URL query keys.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatePayload {
    #[serde(alias = "age")]
    current_age: Option<u32>,
    #[serde(alias = "ret")]
    retirement_age: Option<u32>,
    #[serde(alias = "inc")]
    annual_income: Option<f64>,
    #[serde(alias = "sav")]
    current_savings: Option<f64>,
    #[serde(alias = "exp")]
    monthly_expenses: Option<f64>,
    #[serde(alias = "dep")]
    dependents: Option<f64>,
    #[serde(alias = "rr")]
    return_rate: Option<f64>,
    #[serde(alias = "ir")]
    inflation_rate: Option<f64>,
    #[serde(alias = "wr")]
    withdrawal_rate: Option<f64>,
    scenario_percents: Option<Vec<u32>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "firecalc",
    about = "FIRE target and savings-trajectory calculator"
)]
struct Cli {
    #[arg(long, default_value_t = 30, help = "Current age in years (18-70)")]
    current_age: u32,
    #[arg(
        long,
        default_value_t = 55,
        help = "Target retirement age; must exceed current age, max 80"
    )]
    retirement_age: u32,
    #[arg(long, default_value_t = 85_000.0, help = "Gross annual income")]
    annual_income: f64,
    #[arg(long, default_value_t = 25_000.0, help = "Invested assets today")]
    current_savings: f64,
    #[arg(
        long,
        default_value_t = 3_500.0,
        help = "Baseline monthly spending before the dependents loading"
    )]
    monthly_expenses: f64,
    #[arg(
        long,
        default_value_t = 0,
        help = "Dependents count; each adds 20% to expenses, max 6"
    )]
    dependents: u32,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Assumed annual investment return in percent"
    )]
    return_rate: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Assumed annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Safe withdrawal rate in percent (4 = the 25x rule)"
    )]
    withdrawal_rate: f64,
}

#[derive(Debug, Clone)]
struct ApiOptions {
    scenario_percents: Vec<u32>,
}

#[derive(Debug)]
struct ApiRequest {
    inputs: Inputs,
    options: ApiOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    #[serde(flatten)]
    results: FireResult,
    age_message_text: &'static str,
    spending_scenarios: Vec<SpendingScenario>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    if !(MIN_CURRENT_AGE..=MAX_CURRENT_AGE).contains(&cli.current_age) {
        return Err(format!(
            "--current-age must be between {MIN_CURRENT_AGE} and {MAX_CURRENT_AGE}"
        ));
    }

    if cli.retirement_age <= cli.current_age {
        return Err("--retirement-age must be > --current-age".to_string());
    }

    if cli.retirement_age > MAX_RETIREMENT_AGE {
        return Err(format!(
            "--retirement-age must be <= {MAX_RETIREMENT_AGE}"
        ));
    }

    if cli.dependents > MAX_DEPENDENTS {
        return Err(format!("--dependents must be <= {MAX_DEPENDENTS}"));
    }

    for (name, value) in [
        ("--annual-income", cli.annual_income),
        ("--current-savings", cli.current_savings),
        ("--monthly-expenses", cli.monthly_expenses),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be a non-negative amount"));
        }
    }

    if !cli.return_rate.is_finite() || !(0.0..=50.0).contains(&cli.return_rate) {
        return Err("--return-rate must be between 0 and 50".to_string());
    }

    if !cli.inflation_rate.is_finite() || !(0.0..=50.0).contains(&cli.inflation_rate) {
        return Err("--inflation-rate must be between 0 and 50".to_string());
    }

    if !cli.withdrawal_rate.is_finite()
        || cli.withdrawal_rate <= 0.0
        || cli.withdrawal_rate > 100.0
    {
        return Err("--withdrawal-rate must be > 0 and <= 100".to_string());
    }

    Ok(Inputs {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        annual_income: cli.annual_income,
        current_savings: cli.current_savings,
        monthly_expenses: cli.monthly_expenses,
        dependents: cli.dependents,
        return_rate: cli.return_rate,
        inflation_rate: cli.inflation_rate,
        withdrawal_rate: cli.withdrawal_rate,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/calculate",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("firecalc HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

/// One-shot calculation for `firecalc calc [--flags]`; returns pretty JSON
/// identical to the API response.
pub fn run_cli_calculation(args: &[String]) -> Result<String, String> {
    let argv = std::iter::once("firecalc".to_string()).chain(args.iter().cloned());
    let cli = Cli::try_parse_from(argv).map_err(|e| e.to_string())?;
    let inputs = build_inputs(cli)?;
    let response = build_calculate_response(
        &inputs,
        &ApiOptions {
            scenario_percents: DEFAULT_SCENARIO_PERCENTS.to_vec(),
        },
    );
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_get_handler(Query(payload): Query<CalculatePayload>) -> Response {
    calculate_handler_impl(payload)
}

async fn calculate_post_handler(Json(payload): Json<CalculatePayload>) -> Response {
    calculate_handler_impl(payload)
}

fn calculate_handler_impl(payload: CalculatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let response = build_calculate_response(&request.inputs, &request.options);
    json_response(StatusCode::OK, response)
}

fn build_calculate_response(inputs: &Inputs, options: &ApiOptions) -> CalculateResponse {
    let results = calculate_fire(inputs);
    let scenarios = spending_scenarios(inputs, &results, &options.scenario_percents);
    CalculateResponse {
        age_message_text: results.age_message.text(),
        spending_scenarios: scenarios,
        results,
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<CalculatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: CalculatePayload) -> Result<ApiRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.annual_income {
        cli.annual_income = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.dependents {
        // Share URLs carry free-form numbers; round and clamp like the
        // original link parser instead of rejecting.
        cli.dependents = v.round().clamp(0.0, MAX_DEPENDENTS as f64) as u32;
    }
    if let Some(v) = payload.return_rate {
        cli.return_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        cli.withdrawal_rate = v;
    }

    let scenario_percents = match payload.scenario_percents {
        Some(percents) => {
            if percents.iter().any(|&pct| !(1..=200).contains(&pct)) {
                return Err("scenarioPercents values must be between 1 and 200".to_string());
            }
            percents
        }
        None => DEFAULT_SCENARIO_PERCENTS.to_vec(),
    };

    let inputs = build_inputs(cli)?;
    Ok(ApiRequest {
        inputs,
        options: ApiOptions { scenario_percents },
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 30,
        retirement_age: 55,
        annual_income: 85_000.0,
        current_savings: 25_000.0,
        monthly_expenses: 3_500.0,
        dependents: 0,
        return_rate: 7.0,
        inflation_rate: 3.0,
        withdrawal_rate: 4.0,
    }
}
