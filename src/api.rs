//! REST API for the kitchen organizer service.
//!
//! Provides HTTP endpoints for communication with the 3D frontend.
//! Uses Axum as the web framework and supports CORS.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{RwLock, mpsc};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::ai::{self, SuggestionSource};
use crate::config::{ApiConfig, AssistantConfig, LayoutConfig};
use crate::layout;
use crate::model::{
    InventoryItem, ItemCategory, ItemDimensions, ItemShape, KitchenZone, Suggestion,
    SuggestionAction, ValidationError, ZoneCapacityInfo,
};
use crate::policy;
use crate::presets;
use crate::store::{KitchenStore, StoreError};
use crate::types::Vec3;

#[derive(Clone)]
struct ApiState {
    store: Arc<RwLock<KitchenStore>>,
    assistant: AssistantConfig,
    layout: LayoutConfig,
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

// SRI hashes verified against https://unpkg.com/swagger-ui-dist@5.17.14/ on 2025-10-29.
const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>stow-it-now API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-standalone-preset.js"
            integrity="sha384-2YH8WDRaj7V2OqU/trsmzSagmk/E2SutiCsGkdgoQwC9pNUJV1u/141DHB6jgs8t"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                const ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                    layout: "StandaloneLayout",
                });
                window.ui = ui;
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Request structure for the layout endpoints.
///
/// Either names a zone (its assigned items and inner bounds are used) or
/// carries explicit bounds and items for ad-hoc computation.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "bounds": { "x": 0.8, "y": 0.8, "z": 0.6 },
        "items": [
            { "id": "7f8d1e7e-11d4-4f4b-9aab-2a6f3e3f2c10", "dims": { "width": 0.1, "height": 0.2, "depth": 0.1 } }
        ]
    })
)]
pub struct LayoutRequest {
    #[serde(default)]
    pub zone_id: Option<Uuid>,
    #[serde(default)]
    pub bounds: Option<Vec3>,
    #[serde(default)]
    pub items: Option<Vec<LayoutItemRequest>>,
}

/// One explicit item for an ad-hoc layout request.
#[derive(Deserialize, ToSchema)]
pub struct LayoutItemRequest {
    pub id: Uuid,
    pub dims: ItemDimensions,
}

/// Response structure with one position per input item.
#[derive(Serialize, ToSchema)]
pub struct LayoutResponse {
    /// Center positions in zone-local coordinates, keyed by item id.
    #[schema(value_type = Object)]
    pub positions: HashMap<Uuid, Vec3>,
}

/// Request structure for drop validity checks.
#[derive(Deserialize, ToSchema)]
pub struct DropCheckRequest {
    pub zone_id: Uuid,
    pub item_id: Uuid,
}

/// Response structure for drop validity checks.
#[derive(Serialize, ToSchema)]
pub struct DropCheckResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Suggestion list plus the generator that produced it.
#[derive(Serialize, ToSchema)]
pub struct SuggestionsResponse {
    pub source: SuggestionSource,
    pub suggestions: Vec<Suggestion>,
}

/// Request structure for applying a suggestion action.
#[derive(Deserialize, ToSchema)]
pub struct ApplySuggestionRequest {
    pub action: SuggestionAction,
}

/// Response structure after applying a suggestion action.
#[derive(Serialize, ToSchema)]
pub struct ApplySuggestionResponse {
    pub moved: usize,
}

/// Request structure for creating an item.
#[derive(Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub name: String,
    pub category: ItemCategory,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub expiry_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub shape: Option<ItemShape>,
    #[serde(default)]
    pub dims: Option<ItemDimensions>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request structure for assigning an item to a zone.
#[derive(Deserialize, ToSchema)]
pub struct AssignItemRequest {
    pub zone_id: Uuid,
}

/// Request structure for updating an item's quantity.
#[derive(Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    pub quantity: f64,
}

/// Request structure for moving or rotating a zone.
#[derive(Deserialize, ToSchema)]
pub struct ZoneTransformRequest {
    #[serde(default)]
    pub position: Option<Vec3>,
    #[serde(default)]
    pub rotation: Option<Vec3>,
}

/// Snapped transform actually stored for a zone.
#[derive(Serialize, ToSchema)]
pub struct ZoneTransformResponse {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// List of available layout presets.
#[derive(Serialize, ToSchema)]
pub struct PresetListResponse {
    pub presets: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(details: impl Into<String>) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        details,
    )
}

fn not_found_error(details: impl Into<String>) -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", details)
}

fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::ItemNotFound(_) | StoreError::ZoneNotFound(_) => {
            not_found_error(err.to_string())
        }
        StoreError::InvalidDrop(_) | StoreError::InvalidQuantity(_) => {
            validation_error(err.to_string())
        }
    }
}

/// Resolved input for a layout computation.
struct LayoutInput {
    entries: Vec<(Uuid, ItemDimensions)>,
    bounds: Vec3,
}

async fn resolve_layout_request(
    state: &ApiState,
    request: LayoutRequest,
) -> Result<LayoutInput, Response> {
    if let Some(zone_id) = request.zone_id {
        let store = state.store.read().await;
        let (entries, bounds) = store
            .layout_input(zone_id)
            .map_err(store_error_response)?;
        return Ok(LayoutInput { entries, bounds });
    }

    let (Some(bounds), Some(items)) = (request.bounds, request.items) else {
        return Err(validation_error(
            "Either zone_id or both bounds and items must be provided",
        ));
    };
    if !bounds.is_valid_dimension() {
        return Err(validation_error(format!(
            "Bounds must be positive, got: {:?}",
            bounds
        )));
    }
    for item in &items {
        if !item.dims.as_vec3().is_valid_dimension() {
            return Err(validation_error(format!(
                "Item {} has non-positive dimensions",
                item.id
            )));
        }
    }

    Ok(LayoutInput {
        entries: items.into_iter().map(|item| (item.id, item.dims)).collect(),
        bounds,
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_layout,
        handle_layout_stream,
        handle_capacity,
        handle_drop_check,
        handle_suggestions,
        handle_apply_suggestion,
        handle_list_items,
        handle_create_item,
        handle_delete_item,
        handle_assign_item,
        handle_unassign_item,
        handle_set_quantity,
        handle_list_zones,
        handle_delete_zone,
        handle_transform_zone,
        handle_list_presets,
        handle_load_preset
    ),
    components(
        schemas(
            LayoutRequest,
            LayoutItemRequest,
            LayoutResponse,
            DropCheckRequest,
            DropCheckResponse,
            SuggestionsResponse,
            ApplySuggestionRequest,
            ApplySuggestionResponse,
            CreateItemRequest,
            AssignItemRequest,
            SetQuantityRequest,
            ZoneTransformRequest,
            ZoneTransformResponse,
            PresetListResponse,
            ErrorResponse,
            InventoryItem,
            KitchenZone,
            ZoneCapacityInfo,
            Suggestion
        )
    ),
    tags(
        (name = "layout", description = "Endpoints for 3D item placement"),
        (name = "inventory", description = "Endpoints for items and zones"),
        (name = "suggestions", description = "Endpoints for organization advice")
    )
)]
struct ApiDoc;

/// Starts the API server.
///
/// Configures CORS for cross-origin requests from the frontend and
/// seeds the store with the first layout preset. Blocks until the
/// server is terminated.
pub async fn start_api_server(
    config: ApiConfig,
    assistant: AssistantConfig,
    layout_config: LayoutConfig,
) {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let mut store = KitchenStore::new();
    match presets::load(presets::PRESET_NAMES[0]) {
        Some(Ok(zones)) => store.load_preset(zones),
        Some(Err(err)) => eprintln!("⚠️ Could not build default preset: {}", err),
        None => {}
    }

    let state = ApiState {
        store: Arc::new(RwLock::new(store)),
        assistant,
        layout: layout_config,
    };

    let app = Router::new()
        // Layout endpoints
        .route("/layout", post(handle_layout))
        .route("/layout_stream", post(handle_layout_stream))
        // Inventory endpoints
        .route("/items", get(handle_list_items).post(handle_create_item))
        .route("/items/{id}", delete(handle_delete_item))
        .route("/items/{id}/assign", post(handle_assign_item))
        .route("/items/{id}/unassign", post(handle_unassign_item))
        .route("/items/{id}/quantity", post(handle_set_quantity))
        .route("/zones", get(handle_list_zones))
        .route("/zones/{id}", delete(handle_delete_zone))
        .route("/zones/{id}/transform", post(handle_transform_zone))
        .route("/capacity", get(handle_capacity))
        .route("/drop_check", post(handle_drop_check))
        // Suggestions
        .route("/suggestions", get(handle_suggestions))
        .route("/suggestions/apply", post(handle_apply_suggestion))
        // Presets
        .route("/presets", get(handle_list_presets))
        .route("/presets/{name}/load", post(handle_load_preset))
        // API documentation
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .with_state(state);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            panic!("❌ Could not bind API server to {}: {}", addr, err);
        }
    };

    let display_host = config.display_host().to_string();
    println!(
        "🚀 Server running on http://{}:{}",
        display_host,
        config.port()
    );
    if config.binds_to_all_interfaces() && config.uses_default_host() {
        println!("💡 Local access: http://localhost:{}", config.port());
    }
    println!("🍳 API Endpoints:");
    println!("   - POST /layout");
    println!("   - POST /layout_stream");
    println!("   - GET  /capacity");
    println!("   - GET  /suggestions");
    println!("📑 Documentation:");
    println!("   - GET /docs");
    println!("   - GET /docs/openapi.json");

    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("❌ API server terminated with an error: {err}");
    }
}

/// Handler for POST /layout.
///
/// Computes a position for every item inside the requested volume.
#[utoipa::path(
    post,
    path = "/layout",
    request_body = LayoutRequest,
    responses(
        (status = 200, description = "Computed item positions", body = LayoutResponse),
        (status = NOT_FOUND, description = "Unknown zone", body = ErrorResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid request",
            body = ErrorResponse
        )
    ),
    tag = "layout"
)]
async fn handle_layout(
    State(state): State<ApiState>,
    payload: Result<Json<LayoutRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let input = match resolve_layout_request(&state, request).await {
        Ok(input) => input,
        Err(response) => return response,
    };

    println!("📥 New layout request: {} items", input.entries.len());
    let positions = layout::pack_zone(&input.entries, input.bounds, state.layout.padding());
    (StatusCode::OK, Json(LayoutResponse { positions })).into_response()
}

/// Handler for POST /layout_stream (SSE).
///
/// Streams placement events in real-time as Server-Sent Events so the
/// frontend can animate items into place without waiting for the
/// complete result.
#[utoipa::path(
    post,
    path = "/layout_stream",
    request_body = LayoutRequest,
    responses(
        (
            status = 200,
            description = "Streams placement events in real-time",
            content_type = "text/event-stream",
            body = String
        ),
        (status = NOT_FOUND, description = "Unknown zone", body = ErrorResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid request",
            body = ErrorResponse
        )
    ),
    tag = "layout"
)]
async fn handle_layout_stream(
    State(state): State<ApiState>,
    payload: Result<Json<LayoutRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let input = match resolve_layout_request(&state, request).await {
        Ok(input) => input,
        Err(response) => return response,
    };

    let padding = state.layout.padding();
    let (tx, rx) = mpsc::channel::<String>(32);

    tokio::task::spawn_blocking(move || {
        let _ = layout::pack_zone_with_progress(&input.entries, input.bounds, padding, |event| {
            if let Ok(json) = serde_json::to_string(event) {
                // A failed send means the client disconnected; later events
                // are silently dropped.
                let _ = tx.blocking_send(json);
            }
        });
    });

    let stream = ReceiverStream::new(rx)
        .map(|msg| Ok::<_, std::convert::Infallible>(Event::default().data(msg)));
    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(std::time::Duration::from_secs(10))
                .text("keep-alive"),
        )
        .into_response()
}

/// Handler for GET /capacity.
#[utoipa::path(
    get,
    path = "/capacity",
    responses(
        (status = 200, description = "Capacity report per zone", body = [ZoneCapacityInfo])
    ),
    tag = "inventory"
)]
async fn handle_capacity(State(state): State<ApiState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(store.capacity_report())
}

/// Handler for POST /drop_check.
///
/// Evaluates the drop rules without mutating anything.
#[utoipa::path(
    post,
    path = "/drop_check",
    request_body = DropCheckRequest,
    responses(
        (status = 200, description = "Drop validity verdict", body = DropCheckResponse),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_drop_check(
    State(state): State<ApiState>,
    payload: Result<Json<DropCheckRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let store = state.store.read().await;
    let Some(item) = store.item(request.item_id) else {
        return not_found_error(format!("No item with id {}", request.item_id));
    };

    let response = match policy::check_drop(store.zones(), store.items(), request.zone_id, item) {
        Ok(()) => DropCheckResponse {
            valid: true,
            reason_code: None,
            reason: None,
        },
        Err(rejection) => DropCheckResponse {
            valid: false,
            reason_code: Some(rejection.code().to_string()),
            reason: Some(rejection.to_string()),
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for GET /suggestions.
///
/// Asks the configured assistant; any failure falls back to the local
/// rule-based generator and is never surfaced to the client.
#[utoipa::path(
    get,
    path = "/suggestions",
    responses(
        (status = 200, description = "Organization suggestions", body = SuggestionsResponse)
    ),
    tag = "suggestions"
)]
async fn handle_suggestions(State(state): State<ApiState>) -> impl IntoResponse {
    let (items, zones) = {
        let store = state.store.read().await;
        (store.items().to_vec(), store.zones().to_vec())
    };

    let today = Utc::now().date_naive();
    let (suggestions, source) =
        ai::suggestions_with_fallback(&state.assistant, &items, &zones, today).await;

    Json(SuggestionsResponse {
        source,
        suggestions,
    })
}

/// Handler for POST /suggestions/apply.
#[utoipa::path(
    post,
    path = "/suggestions/apply",
    request_body = ApplySuggestionRequest,
    responses(
        (status = 200, description = "Action applied", body = ApplySuggestionResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid request",
            body = ErrorResponse
        )
    ),
    tag = "suggestions"
)]
async fn handle_apply_suggestion(
    State(state): State<ApiState>,
    payload: Result<Json<ApplySuggestionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let mut store = state.store.write().await;
    let moved = store.apply_suggestion_action(&request.action);
    println!("🧹 Applied suggestion action: {} item(s) moved", moved);
    (StatusCode::OK, Json(ApplySuggestionResponse { moved })).into_response()
}

/// Handler for GET /items.
#[utoipa::path(
    get,
    path = "/items",
    responses((status = 200, description = "All items", body = [InventoryItem])),
    tag = "inventory"
)]
async fn handle_list_items(State(state): State<ApiState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(store.items().to_vec())
}

/// Handler for POST /items.
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = InventoryItem),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid item data",
            body = ErrorResponse
        )
    ),
    tag = "inventory"
)]
async fn handle_create_item(
    State(state): State<ApiState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let item = match build_item(request) {
        Ok(item) => item,
        Err(err) => return validation_error(err.to_string()),
    };

    let mut store = state.store.write().await;
    let id = store.add_item(item);
    let created = store.item(id).expect("just inserted").clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

fn build_item(request: CreateItemRequest) -> Result<InventoryItem, ValidationError> {
    if let Some(dims) = request.dims {
        // Re-validate override dimensions through the checked constructor.
        ItemDimensions::new(dims.width, dims.height, dims.depth)?;
    }
    let mut item = InventoryItem::new(
        request.name,
        request.category,
        request.quantity,
        request.unit,
    )?;
    item.expiry_date = request.expiry_date;
    item.shape = request.shape;
    item.dims = request.dims;
    item.notes = request.notes;
    Ok(item)
}

/// Handler for DELETE /items/{id}.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item removed"),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_delete_item(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    if store.remove_item(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found_error(format!("No item with id {}", id))
    }
}

/// Handler for POST /items/{id}/assign.
///
/// Runs the drop rules before assigning; an invalid drop yields 422
/// with the violated rule.
#[utoipa::path(
    post,
    path = "/items/{id}/assign",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = AssignItemRequest,
    responses(
        (status = 200, description = "Item assigned", body = InventoryItem),
        (status = NOT_FOUND, description = "Unknown item or zone", body = ErrorResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Drop rules rejected the assignment",
            body = ErrorResponse
        )
    ),
    tag = "inventory"
)]
async fn handle_assign_item(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<AssignItemRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let mut store = state.store.write().await;
    match store.assign_item(id, request.zone_id) {
        Ok(()) => {
            let item = store.item(id).expect("assigned item exists").clone();
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(StoreError::InvalidDrop(rejection))
            if rejection == policy::DropRejection::ZoneNotFound =>
        {
            not_found_error(format!("No zone with id {}", request.zone_id))
        }
        Err(err) => store_error_response(err),
    }
}

/// Handler for POST /items/{id}/unassign.
///
/// Clears the assignment without any rule check; taking an item out of
/// a cabinet is always allowed.
#[utoipa::path(
    post,
    path = "/items/{id}/unassign",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item unassigned", body = InventoryItem),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_unassign_item(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.clear_assignment(id) {
        Ok(()) => {
            let item = store.item(id).expect("item exists").clone();
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

/// Handler for POST /items/{id}/quantity.
#[utoipa::path(
    post,
    path = "/items/{id}/quantity",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = InventoryItem),
        (status = NOT_FOUND, description = "Unknown item", body = ErrorResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Quantity not positive",
            body = ErrorResponse
        )
    ),
    tag = "inventory"
)]
async fn handle_set_quantity(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let mut store = state.store.write().await;
    match store.set_quantity(id, request.quantity) {
        Ok(()) => {
            let item = store.item(id).expect("item exists").clone();
            (StatusCode::OK, Json(item)).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

/// Handler for GET /zones.
#[utoipa::path(
    get,
    path = "/zones",
    responses((status = 200, description = "All zones", body = [KitchenZone])),
    tag = "inventory"
)]
async fn handle_list_zones(State(state): State<ApiState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(store.zones().to_vec())
}

/// Handler for DELETE /zones/{id}.
///
/// Removal cascades by clearing the assignment of every item that
/// referenced the zone; no item is deleted.
#[utoipa::path(
    delete,
    path = "/zones/{id}",
    params(("id" = Uuid, Path, description = "Zone id")),
    responses(
        (status = 204, description = "Zone removed"),
        (status = NOT_FOUND, description = "Unknown zone", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_delete_zone(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    if store.remove_zone(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found_error(format!("No zone with id {}", id))
    }
}

/// Handler for POST /zones/{id}/transform.
///
/// Positions snap to the 0.25 m grid, rotations to 15 degree steps.
#[utoipa::path(
    post,
    path = "/zones/{id}/transform",
    params(("id" = Uuid, Path, description = "Zone id")),
    request_body = ZoneTransformRequest,
    responses(
        (status = 200, description = "Snapped transform", body = ZoneTransformResponse),
        (status = NOT_FOUND, description = "Unknown zone", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_transform_zone(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ZoneTransformRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(err) => return json_deserialize_error(err),
    };

    let mut store = state.store.write().await;
    if let Some(position) = request.position {
        if let Err(err) = store.move_zone(id, position) {
            return store_error_response(err);
        }
    }
    if let Some(rotation) = request.rotation {
        if let Err(err) = store.rotate_zone(id, rotation) {
            return store_error_response(err);
        }
    }

    match store.zone(id) {
        Some(zone) => (
            StatusCode::OK,
            Json(ZoneTransformResponse {
                position: zone.position,
                rotation: zone.rotation,
            }),
        )
            .into_response(),
        None => not_found_error(format!("No zone with id {}", id)),
    }
}

/// Handler for GET /presets.
#[utoipa::path(
    get,
    path = "/presets",
    responses((status = 200, description = "Available presets", body = PresetListResponse)),
    tag = "inventory"
)]
async fn handle_list_presets() -> impl IntoResponse {
    Json(PresetListResponse {
        presets: presets::PRESET_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}

/// Handler for POST /presets/{name}/load.
///
/// Replaces all zones with the preset; items keep existing but lose
/// assignments to zones that no longer exist.
#[utoipa::path(
    post,
    path = "/presets/{name}/load",
    params(("name" = String, Path, description = "Preset name")),
    responses(
        (status = 200, description = "Zones after loading", body = [KitchenZone]),
        (status = NOT_FOUND, description = "Unknown preset", body = ErrorResponse)
    ),
    tag = "inventory"
)]
async fn handle_load_preset(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let zones = match presets::load(&name) {
        Some(Ok(zones)) => zones,
        Some(Err(err)) => return validation_error(err.to_string()),
        None => return not_found_error(format!("No preset named '{}'", name)),
    };

    let mut store = state.store.write().await;
    store.load_preset(zones);
    println!("🏠 Loaded preset '{}' with {} zones", name, store.zone_count());
    (StatusCode::OK, Json(store.zones().to_vec())).into_response()
}

async fn serve_openapi_json(State(_state): State<ApiState>) -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui(State(_state): State<ApiState>) -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_doc_lists_expected_paths() {
        let doc = openapi_doc();
        let paths = &doc.paths.paths;
        for path in [
            "/layout",
            "/layout_stream",
            "/capacity",
            "/drop_check",
            "/suggestions",
            "/items",
            "/zones",
        ] {
            assert!(
                paths.contains_key(path),
                "OpenAPI documentation is missing the {} path",
                path
            );
        }
    }

    #[test]
    fn openapi_doc_contains_key_schemas() {
        let doc = openapi_doc();
        let components = doc
            .components
            .as_ref()
            .expect("OpenAPI documentation contains no components");
        let schemas = &components.schemas;
        for name in [
            "LayoutRequest",
            "LayoutResponse",
            "DropCheckResponse",
            "SuggestionsResponse",
            "ErrorResponse",
        ] {
            assert!(
                schemas.contains_key(name),
                "Expected schema '{}' is missing from the OpenAPI document",
                name
            );
        }
    }

    #[test]
    fn layout_request_parses_zone_mode() {
        let json = r#"{ "zone_id": "7f8d1e7e-11d4-4f4b-9aab-2a6f3e3f2c10" }"#;
        let request: LayoutRequest = serde_json::from_str(json).expect("Should parse valid JSON");
        assert!(request.zone_id.is_some());
        assert!(request.bounds.is_none());
        assert!(request.items.is_none());
    }

    #[test]
    fn layout_request_parses_explicit_mode() {
        let json = r#"{
            "bounds": { "x": 0.8, "y": 0.8, "z": 0.6 },
            "items": [
                {
                    "id": "7f8d1e7e-11d4-4f4b-9aab-2a6f3e3f2c10",
                    "dims": { "width": 0.1, "height": 0.2, "depth": 0.1 }
                }
            ]
        }"#;
        let request: LayoutRequest = serde_json::from_str(json).expect("Should parse valid JSON");
        assert!(request.zone_id.is_none());
        assert!(request.bounds.is_some());
        assert_eq!(request.items.map(|items| items.len()), Some(1));
    }

    #[test]
    fn drop_check_response_omits_reason_when_valid() {
        let response = DropCheckResponse {
            valid: true,
            reason_code: None,
            reason: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);
    }

    #[test]
    fn build_item_applies_overrides() {
        let request = CreateItemRequest {
            name: "Flour".to_string(),
            category: ItemCategory::Food,
            quantity: 1.0,
            unit: "bag".to_string(),
            expiry_date: None,
            shape: Some(ItemShape::Bag),
            dims: Some(ItemDimensions::raw(0.2, 0.3, 0.1)),
            notes: Some("whole grain".to_string()),
        };
        let item = build_item(request).unwrap();
        assert_eq!(item.shape, Some(ItemShape::Bag));
        assert!(item.dims.is_some());
    }

    #[test]
    fn build_item_rejects_bad_dims() {
        let request = CreateItemRequest {
            name: "Flour".to_string(),
            category: ItemCategory::Food,
            quantity: 1.0,
            unit: String::new(),
            expiry_date: None,
            shape: None,
            dims: Some(ItemDimensions::raw(0.0, 0.3, 0.1)),
            notes: None,
        };
        assert!(build_item(request).is_err());
    }
}
