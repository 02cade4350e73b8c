//! HTTP handler functions for the zone map API.

use actix_web::{HttpResponse, web};
use zone_map_server_models::{
    ApiCreateZone, ApiError, ApiHealth, ApiReady, ApiZone, ZoneListParams,
};
use zone_map_zones::{CreateZoneInput, ZoneError};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "ok",
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/ready`
///
/// Answers `503` while zone storage is unreachable.
pub async fn ready(state: web::Data<AppState>) -> HttpResponse {
    match state.repo.ping().await {
        Ok(()) => HttpResponse::Ok().json(ApiReady {
            status: "ok",
            db: "ok",
        }),
        Err(e) => {
            log::warn!("Readiness check failed: {e}");
            HttpResponse::ServiceUnavailable().json(ApiReady {
                status: "unavailable",
                db: "error",
            })
        }
    }
}

/// `GET /api/zones`
///
/// Lists zones newest first, optionally filtered by `?name=`.
pub async fn list_zones(
    state: web::Data<AppState>,
    params: web::Query<ZoneListParams>,
) -> HttpResponse {
    match state.queries.list(params.name.as_deref()).await {
        Ok(zones) => {
            let api_zones: Vec<ApiZone> = zones.into_iter().map(ApiZone::from).collect();
            HttpResponse::Ok().json(api_zones)
        }
        Err(e) => error_response(&e),
    }
}

/// `POST /api/zones`
pub async fn create_zone(
    state: web::Data<AppState>,
    body: web::Json<ApiCreateZone>,
) -> HttpResponse {
    match state.records.create(create_input(body.into_inner())).await {
        Ok(zone) => HttpResponse::Created().json(ApiZone::from(zone)),
        Err(e) => error_response(&e),
    }
}

fn create_input(body: ApiCreateZone) -> CreateZoneInput {
    CreateZoneInput {
        name: body.name,
        zone_type: body.zone_type,
        geometry: body.geometry,
    }
}

fn api_error(e: &ZoneError) -> ApiError {
    match e.field() {
        Some(field) => ApiError::for_field(e.to_string(), field),
        None => ApiError::message(e.to_string()),
    }
}

fn error_response(e: &ZoneError) -> HttpResponse {
    if e.is_client_error() {
        return HttpResponse::BadRequest().json(api_error(e));
    }

    log::error!("Zone storage error: {e}");
    HttpResponse::InternalServerError().json(ApiError::message("Internal server error"))
}
