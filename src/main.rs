use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use immo_advisor::advisor::money::format_eur;
use immo_advisor::advisor::{
    self, AdvisorReport, FinancialProfile, InvestmentGoal, PropertyTarget, RiskProfile, WeightMap,
};
use immo_advisor::config::AppConfig;
use immo_advisor::error::{AppError, InputError};
use immo_advisor::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Property Financing Advisor",
    about = "Score mortgage financing chances and list savings recommendations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a financial profile against a property and print the report
    Advise(AdviseArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct AdviseArgs {
    /// Path to a JSON financial-profile snapshot
    #[arg(long)]
    profile: PathBuf,
    /// Path to a JSON property descriptor
    #[arg(long)]
    property: Option<PathBuf>,
    /// Investment goal driving the category weighting
    #[arg(long, default_value = "cashflow", value_parser = parse_goal)]
    goal: InvestmentGoal,
    /// Risk appetite driving the category weighting
    #[arg(long, default_value = "balanced", value_parser = parse_risk)]
    risk: RiskProfile,
}

#[derive(Debug, Deserialize)]
struct AdvisorReportRequest {
    /// Absent or null profile yields the empty zero-score report.
    #[serde(default)]
    profile: Option<FinancialProfile>,
    #[serde(default)]
    property: Option<PropertyTarget>,
    #[serde(default)]
    goal: Option<InvestmentGoal>,
    #[serde(default)]
    risk: Option<RiskProfile>,
}

#[derive(Debug, Deserialize)]
struct WeightsQuery {
    goal: InvestmentGoal,
    #[serde(default)]
    risk: RiskProfile,
}

#[derive(Debug, Serialize)]
struct WeightsResponse {
    goal: InvestmentGoal,
    risk: RiskProfile,
    score_threshold: u8,
    weights: WeightMap,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Advise(args) => run_advise(args),
    }
}

fn parse_goal(raw: &str) -> Result<InvestmentGoal, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "cashflow" => Ok(InvestmentGoal::Cashflow),
        "wealth-building" | "wealth_building" => Ok(InvestmentGoal::WealthBuilding),
        "fix-and-flip" | "flip" => Ok(InvestmentGoal::FixAndFlip),
        "retirement" | "retirement-provision" => Ok(InvestmentGoal::RetirementProvision),
        "tax" | "tax-optimization" => Ok(InvestmentGoal::TaxOptimization),
        other => Err(format!(
            "unknown investment goal '{other}' (expected cashflow, wealth-building, fix-and-flip, retirement, or tax)"
        )),
    }
}

fn parse_risk(raw: &str) -> Result<RiskProfile, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "conservative" => Ok(RiskProfile::Conservative),
        "balanced" => Ok(RiskProfile::Balanced),
        "aggressive" => Ok(RiskProfile::Aggressive),
        other => Err(format!(
            "unknown risk profile '{other}' (expected conservative, balanced, or aggressive)"
        )),
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/advisor/report", post(advisor_report_endpoint))
        .route("/api/v1/advisor/weights", get(weights_endpoint))
        .layer(prometheus_layer)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "financing advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_advise(args: AdviseArgs) -> Result<(), AppError> {
    let AdviseArgs {
        profile,
        property,
        goal,
        risk,
    } = args;

    let profile: FinancialProfile = load_json(&profile)?;
    let property: Option<PropertyTarget> = property.as_deref().map(load_json).transpose()?;

    let report = advisor::advise(Some(&profile), property.as_ref(), goal, risk);
    render_report(&report, goal, risk);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn advisor_report_endpoint(Json(payload): Json<AdvisorReportRequest>) -> Json<AdvisorReport> {
    let AdvisorReportRequest {
        profile,
        property,
        goal,
        risk,
    } = payload;

    let report = advisor::advise(
        profile.as_ref(),
        property.as_ref(),
        goal.unwrap_or(InvestmentGoal::Cashflow),
        risk.unwrap_or_default(),
    );
    Json(report)
}

async fn weights_endpoint(Query(query): Query<WeightsQuery>) -> Json<WeightsResponse> {
    let WeightsQuery { goal, risk } = query;
    Json(WeightsResponse {
        goal,
        risk,
        score_threshold: risk.score_threshold(),
        weights: advisor::weights::adjusted_weights_for(goal, risk),
    })
}

fn render_report(report: &AdvisorReport, goal: InvestmentGoal, risk: RiskProfile) {
    println!("Financing advisory report");
    println!(
        "Credit chance: {}% ({})",
        report.evaluation.score,
        report.band.label()
    );

    if report.evaluation.factors.is_empty() {
        println!("\nInfluencing factors: none (profile incomplete or no price)");
    } else {
        println!("\nInfluencing factors");
        for factor in &report.evaluation.factors {
            println!("- {} ({:+}%)", factor.description, factor.effect);
        }
    }

    if !report.evaluation.hints.is_empty() {
        println!("\nImprovement hints");
        for hint in &report.evaluation.hints {
            println!("- {} {}: {}", hint.icon, hint.title, hint.advice);
        }
    }

    if report.evaluation.substitute_equity > 0.0 {
        println!(
            "\nSubstitute equity available: {}",
            format_eur(report.evaluation.substitute_equity)
        );
    }

    println!(
        "\nSavings tips: {} found, potential savings {}",
        report.tips.len(),
        format_eur(report.total_projected_savings)
    );
    for tip in &report.tips {
        println!(
            "- [{}] {} ({}): {}",
            tip.priority.label(),
            tip.title,
            tip.category.label(),
            tip.savings_note
        );
    }

    println!(
        "\nCategory weights for {} ({} risk)",
        goal.label(),
        risk.label()
    );
    for (category, weight) in &report.weights {
        println!("- {}: {}%", category.label(), weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use immo_advisor::advisor::{CreditBand, EmploymentType};

    fn sample_profile() -> FinancialProfile {
        FinancialProfile {
            equity_capital: 90_000.0,
            employment: Some(EmploymentType::CivilServant),
            credit_band: Some(CreditBand::Excellent),
            ..FinancialProfile::default()
        }
    }

    #[tokio::test]
    async fn report_endpoint_scores_a_complete_request() {
        let request = AdvisorReportRequest {
            profile: Some(sample_profile()),
            property: Some(PropertyTarget {
                purchase_price: 300_000.0,
                ..PropertyTarget::default()
            }),
            goal: None,
            risk: None,
        };

        let Json(report) = super::advisor_report_endpoint(Json(request)).await;
        assert_eq!(report.evaluation.score, 95);
        assert_eq!(report.band_color, "#22c55e");
        assert_eq!(report.weights.len(), 9);
        assert!(!report.tips.is_empty(), "baseline tip always present");
    }

    #[tokio::test]
    async fn report_endpoint_fails_closed_without_a_profile() {
        let request = AdvisorReportRequest {
            profile: None,
            property: None,
            goal: None,
            risk: None,
        };

        let Json(report) = super::advisor_report_endpoint(Json(request)).await;
        assert_eq!(report.evaluation.score, 0);
        assert!(report.evaluation.factors.is_empty());
        assert!(report.tips.is_empty());
    }

    #[tokio::test]
    async fn weights_endpoint_reports_the_risk_threshold() {
        let query = WeightsQuery {
            goal: InvestmentGoal::FixAndFlip,
            risk: RiskProfile::Conservative,
        };

        let Json(response) = super::weights_endpoint(Query(query)).await;
        assert_eq!(response.score_threshold, 65);
        let total: u32 = response.weights.values().sum();
        assert!((99..=101).contains(&total));
    }

    #[test]
    fn goal_parser_accepts_aliases() {
        assert_eq!(parse_goal("flip"), Ok(InvestmentGoal::FixAndFlip));
        assert_eq!(parse_goal("Cashflow"), Ok(InvestmentGoal::Cashflow));
        assert!(parse_goal("moonshot").is_err());
    }
}
