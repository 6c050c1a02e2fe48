// Fiscal Panorama - Web Server
// JSON API over one generated session dataset

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use fiscal_panorama::{answer, format, FiscalData, GeneratorConfig};

/// Shared application state - the tables are immutable after generation,
/// so a plain Arc is enough (no locking)
#[derive(Clone)]
struct AppState {
    data: Arc<FiscalData>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn err(data: T, message: &str) -> Self {
        Self {
            success: false,
            data,
            error: Some(message.to_string()),
        }
    }
}

/// Headline aggregates across the four tables
#[derive(Serialize)]
struct SummaryResponse {
    mean_execution_rate: f64,
    top_sector: Option<String>,
    total_revenue: f64,
    top_region: Option<String>,
    total_debt: f64,
    mean_interest_rate_pct: f64,
    mean_inflation: f64,
    mean_gdp_variation: f64,
    inflation_trend_pct: Option<f64>,
    currency: &'static str,
}

#[derive(Deserialize)]
struct AskParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct AskResponse {
    question: String,
    answer: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/budget - Budget execution records
async fn get_budget(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.data.budget.records.clone()))
}

/// GET /api/revenue - Fiscal revenue records
async fn get_revenue(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.data.revenue.records.clone()))
}

/// GET /api/debt - Public debt records
async fn get_debt(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.data.debt.records.clone()))
}

/// GET /api/indicators - Macro indicator records
async fn get_indicators(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.data.indicators.records.clone()))
}

/// GET /api/summary - Headline aggregates
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let data = &state.data;

    let summary = SummaryResponse {
        mean_execution_rate: data.budget.mean_execution_rate(),
        top_sector: data.budget.top_sector_by_realized(),
        total_revenue: data.revenue.total_value(),
        top_region: data.revenue.top_region_by_value(),
        total_debt: data.debt.total_value(),
        mean_interest_rate_pct: data.debt.mean_interest_rate() * 100.0,
        mean_inflation: data.indicators.mean_inflation(),
        mean_gdp_variation: data.indicators.mean_gdp_variation(),
        inflation_trend_pct: data.indicators.inflation_trend(),
        currency: format::CURRENCY,
    };

    Json(ApiResponse::ok(summary))
}

/// GET /api/ask?q=... - Run the assistant on a question
async fn ask(State(state): State<AppState>, Query(params): Query<AskParams>) -> impl IntoResponse {
    let question = params.q.unwrap_or_default();

    // Empty questions never reach the engine
    if question.trim().is_empty() {
        let body = AskResponse {
            question,
            answer: String::new(),
        };
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(body, "missing query parameter 'q'")),
        )
            .into_response();
    }

    let body = AskResponse {
        answer: answer(&question, &state.data),
        question,
    };

    (StatusCode::OK, Json(ApiResponse::ok(body))).into_response()
}

/// GET / - Minimal endpoint index
async fn serve_index() -> impl IntoResponse {
    Html(
        "<html><body>\
         <h1>🇦🇴 Fiscal Panorama API</h1>\
         <ul>\
         <li><a href=\"/api/health\">/api/health</a></li>\
         <li><a href=\"/api/budget\">/api/budget</a></li>\
         <li><a href=\"/api/revenue\">/api/revenue</a></li>\
         <li><a href=\"/api/debt\">/api/debt</a></li>\
         <li><a href=\"/api/indicators\">/api/indicators</a></li>\
         <li><a href=\"/api/summary\">/api/summary</a></li>\
         <li>/api/ask?q=pergunta</li>\
         </ul>\
         </body></html>",
    )
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Fiscal Panorama - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Seed from the environment, default to the demo seed
    let seed = std::env::var("FISCAL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2023);

    let data = FiscalData::generate(&GeneratorConfig::with_seed(seed));
    println!(
        "✓ Generated session data (seed {}): {} budget, {} revenue, {} debt, {} indicator records",
        seed,
        data.budget.len(),
        data.revenue.len(),
        data.debt.len(),
        data.indicators.len()
    );

    let state = AppState {
        data: Arc::new(data),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/budget", get(get_budget))
        .route("/revenue", get(get_revenue))
        .route("/debt", get(get_debt))
        .route("/indicators", get(get_indicators))
        .route("/summary", get(get_summary))
        .route("/ask", get(ask))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/summary");
    println!("   Ask: http://localhost:3000/api/ask?q=qual+a+receita");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
