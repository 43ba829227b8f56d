//! Web API Module
//!
//! Exposes the planning engine over REST for the advising frontend.
//! All endpoints return JSON and require no authentication (prototype
//! mode). The engine itself is pure; this layer owns the read-only
//! catalog and the advising timeline.

use crate::history::{self, HistoryStore};
use crate::planner::{
    catalog::{CatalogEntry, CourseCatalog},
    generator::generate_plan,
    swap::repair_plan,
    types::{PlanRequest, RepairRequest},
};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state. The catalog is read-only after startup,
/// so handlers can run in parallel without coordination.
pub struct AppState {
    pub catalog: CourseCatalog,
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(catalog: CourseCatalog, history: HistoryStore) -> Self {
        Self { catalog, history }
    }

    /// Build state from the environment: CATALOG_PATH for the catalog
    /// and HISTORY_DB for a file-backed timeline (in-memory when
    /// unset).
    pub fn from_env() -> Result<Self, rusqlite::Error> {
        let catalog = CourseCatalog::from_env();
        let history = match std::env::var("HISTORY_DB") {
            Ok(path) => HistoryStore::open(Some(PathBuf::from(path)))?,
            Err(_) => HistoryStore::in_memory()?,
        };
        let _ = history.record_event(&history::HistoryEvent::new(
            history::HistoryEventType::CatalogLoaded,
            &format!("Catalog loaded with {} courses", catalog.course_ids().len()),
        ));
        Ok(Self::new(catalog, history))
    }
}

// ============================================================
// API RESPONSE TYPES
// ============================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

/// One catalog row for the listing endpoint
#[derive(Serialize)]
pub struct CatalogCourse {
    pub code: String,
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "PathPilot API",
        "version": "0.1.0"
    }))
}

/// Generate a two-term course plan
async fn plan_generate(
    data: web::Data<Arc<AppState>>,
    req: web::Json<PlanRequest>,
) -> impl Responder {
    let response = generate_plan(&data.catalog, &req);

    let course_count: usize = response.semesters.iter().map(|s| s.courses.len()).sum();
    log::info!(
        "Generated plan: {} courses, {} notes",
        course_count,
        response.notes.len()
    );
    if let Err(e) = history::record_plan_generated(&data.history, course_count, response.notes.len())
    {
        log::warn!("Could not record plan generation: {}", e);
    }

    HttpResponse::Ok().json(ApiResponse::success(response))
}

/// Apply a swap and repair the plan
async fn plan_repair(
    data: web::Data<Arc<AppState>>,
    req: web::Json<RepairRequest>,
) -> impl Responder {
    let response = repair_plan(&data.catalog, &req);

    let blocked = response
        .notes
        .first()
        .map(|n| n.starts_with("Swap blocked"))
        .unwrap_or(false);
    let record = if blocked {
        log::info!("Swap blocked for locked course");
        history::record_swap_blocked(
            &data.history,
            req.swap_out.as_deref().unwrap_or("unknown"),
        )
    } else {
        log::info!("Repaired plan: {} notes", response.notes.len());
        history::record_plan_repaired(&data.history, response.notes.len())
    };
    if let Err(e) = record {
        log::warn!("Could not record plan repair: {}", e);
    }

    HttpResponse::Ok().json(ApiResponse::success(response))
}

/// List the loaded course catalog
async fn get_catalog(data: web::Data<Arc<AppState>>) -> impl Responder {
    let courses: Vec<CatalogCourse> = data
        .catalog
        .course_ids()
        .into_iter()
        .filter_map(|code| {
            data.catalog.entry(&code).map(|entry| CatalogCourse {
                code: code.clone(),
                entry: entry.clone(),
            })
        })
        .collect();

    HttpResponse::Ok().json(ApiResponse::success(courses))
}

/// Recent advising-timeline events
async fn get_history(
    data: web::Data<Arc<AppState>>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(50);
    match data.history.recent_events(limit) {
        Ok(events) => HttpResponse::Ok().json(ApiResponse::success(events)),
        Err(e) => HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error(&format!("Database error: {}", e))),
    }
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/plan/generate", web::post().to(plan_generate))
        .route("/api/plan/repair", web::post().to(plan_repair))
        .route("/api/catalog", web::get().to(get_catalog))
        .route("/api/history", web::get().to(get_history));
}

/// Configure and run the API server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    log::info!("PathPilot API starting at http://{}:{}", host, port);
    log::info!("API Endpoints:");
    log::info!("   POST /api/plan/generate  - Generate course plan");
    log::info!("   POST /api/plan/repair    - Swap and repair plan");
    log::info!("   GET  /api/catalog        - List course catalog");
    log::info!("   GET  /api/history        - Advising timeline");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
