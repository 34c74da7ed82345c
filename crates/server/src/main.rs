use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use geocode::{NominatimGeocoder, ResolvedLocation};
use serde::Deserialize;
use shared::{
    domain::{CoffeeShopRecord, PhotoPayload, ShopStatus},
    error::{ApiError, ErrorCode},
};
use storage::InMemorySessionStore;
use tower_http::limit::RequestBodyLimitLayer;
use tracker_api::{add_shop, list_shops, lookup_address, ApiContext};
use tracing::{error, info};
use url::form_urlencoded;

mod config;
mod render;

use config::{load_settings, MapDefaults};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
    defaults: MapDefaults,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    added: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeQuery {
    q: String,
}

// Whole-request cap for form submissions; photos are stored base64 in
// memory, so unbounded uploads would be unbounded session growth.
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let geocoder = NominatimGeocoder::new(
        &settings.geocoder_base_url,
        settings.geocoder_user_agent.clone(),
    )
    .map_err(|err| {
        error!(
            url = %settings.geocoder_base_url,
            %err,
            "failed to construct geocoder; verify the configured base url"
        );
        err
    })?;

    let api = ApiContext {
        store: Arc::new(InMemorySessionStore::new()),
        geocoder: Arc::new(geocoder),
    };
    let state = AppState {
        api,
        defaults: settings.map_defaults(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/healthz", get(healthz))
        .route("/shops", post(submit_shop))
        .route("/api/shops", get(http_list_shops))
        .route("/api/geocode", get(http_geocode))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn page(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PageQuery>,
) -> Result<Html<String>, (StatusCode, Json<ApiError>)> {
    let shops = list_shops(&state.api).await.map_err(api_error_response)?;
    Ok(Html(render::page(
        &shops,
        state.defaults,
        q.added.as_deref(),
    )))
}

/// Entry-form submission: multipart because of the photo uploads.
/// Accepts whatever arrives — missing or unparsable fields fall back
/// to defaults rather than rejecting the record.
async fn submit_shop(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, (StatusCode, Json<ApiError>)> {
    let defaults = state.defaults;
    let mut name = String::new();
    let mut lat = defaults.lat;
    let mut lon = defaults.lon;
    let mut status = ShopStatus::Wishlist;
    let mut review: Option<String> = None;
    let mut pics = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        match field_name.as_str() {
            "name" => name = field.text().await.map_err(multipart_error)?,
            "lat" => {
                if let Ok(parsed) = field.text().await.map_err(multipart_error)?.trim().parse() {
                    lat = parsed;
                }
            }
            "lon" => {
                if let Ok(parsed) = field.text().await.map_err(multipart_error)?.trim().parse() {
                    lon = parsed;
                }
            }
            "status" => {
                let raw = field.text().await.map_err(multipart_error)?;
                status = raw.trim().parse().unwrap_or(ShopStatus::Wishlist);
            }
            "review" => {
                let text = field.text().await.map_err(multipart_error)?;
                review = (!text.trim().is_empty()).then_some(text);
            }
            "photos" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|f| !f.is_empty());
                let declared = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send one empty part when no file was picked.
                if bytes.is_empty() {
                    continue;
                }
                let mime_type = declared.filter(|m| !m.trim().is_empty()).or_else(|| {
                    filename
                        .as_deref()
                        .and_then(|f| mime_guess::from_path(f).first_raw())
                        .map(str::to_string)
                });
                pics.push(PhotoPayload {
                    filename,
                    mime_type,
                    data_b64: STANDARD.encode(&bytes),
                });
            }
            _ => {}
        }
    }

    let record = CoffeeShopRecord {
        name: name.clone(),
        lat,
        lon,
        status,
        review,
        pics,
    };
    add_shop(&state.api, record)
        .await
        .map_err(api_error_response)?;

    let added: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    Ok(Redirect::to(&format!("/?added={added}")))
}

async fn http_list_shops(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CoffeeShopRecord>>, (StatusCode, Json<ApiError>)> {
    let shops = list_shops(&state.api).await.map_err(api_error_response)?;
    Ok(Json(shops))
}

async fn http_geocode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<ResolvedLocation>, (StatusCode, Json<ApiError>)> {
    let location = lookup_address(&state.api, &query.q)
        .await
        .map_err(api_error_response)?;
    Ok(Json(location))
}

fn api_error_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

fn multipart_error(err: MultipartError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(ErrorCode::Validation, err.to_string())),
    )
}
