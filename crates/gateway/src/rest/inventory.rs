//! Inventory REST endpoints: stock items, supplier orders and adjustments

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use hotel_database::entities::{
    InventoryChanges, InventoryFilter, InventoryItem, InventoryTransaction,
    InventoryTransactionFilter, NewInventoryItem, NewOrder, ReceivedOrder, StockAdjustment,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::ledger::LedgerEntryResponse;
use super::{parse_optional, ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub unit_cost_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            hotel_id: item.hotel_id,
            name: item.name,
            category: item.category,
            unit: item.unit,
            quantity: item.quantity,
            reorder_level: item.reorder_level,
            unit_cost_cents: item.unit_cost_cents,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryTransactionResponse {
    pub id: i64,
    pub inventory_id: i64,
    pub hotel_id: i64,
    pub item_name: String,
    /// order or adjustment
    pub kind: String,
    pub quantity: i64,
    pub unit_cost_cents: i64,
    pub total_cents: i64,
    /// pending, completed or cancelled
    pub status: String,
    pub supplier: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<InventoryTransaction> for InventoryTransactionResponse {
    fn from(transaction: InventoryTransaction) -> Self {
        Self {
            id: transaction.id,
            inventory_id: transaction.inventory_id,
            hotel_id: transaction.hotel_id,
            item_name: transaction.item_name,
            kind: transaction.kind.to_string(),
            quantity: transaction.quantity,
            unit_cost_cents: transaction.unit_cost_cents,
            total_cents: transaction.total_cents,
            status: transaction.status.to_string(),
            supplier: transaction.supplier,
            note: transaction.note,
            created_at: transaction.created_at,
            completed_at: transaction.completed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceivedOrderResponse {
    pub transaction: InventoryTransactionResponse,
    pub item: InventoryItemResponse,
    pub ledger_entry: Option<LedgerEntryResponse>,
}

impl From<ReceivedOrder> for ReceivedOrderResponse {
    fn from(received: ReceivedOrder) -> Self {
        Self {
            transaction: received.transaction.into(),
            item: received.item.into(),
            ledger_entry: received.ledger_entry.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub hotel_id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub reorder_level: i64,
    #[serde(default)]
    pub unit_cost_cents: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub reorder_level: Option<i64>,
    pub unit_cost_cents: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub quantity: i64,
    /// Defaults to the item's current unit cost.
    pub unit_cost_cents: Option<i64>,
    pub supplier: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    /// Signed change in quantity; must not be zero.
    pub delta: i64,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListItemsQuery {
    pub hotel_id: Option<i64>,
    pub category: Option<String>,
    #[serde(default)]
    pub low_stock_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListInventoryTransactionsQuery {
    pub item_id: Option<i64>,
    pub hotel_id: Option<i64>,
    pub status: Option<String>,
    pub kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create inventory routes
pub fn create_inventory_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/inventory", get(list_items).post(create_item))
        .route("/inventory/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/inventory/:id/orders", post(place_order))
        .route("/inventory/:id/adjustments", post(adjust_stock))
        .route("/inventory-transactions", get(list_inventory_transactions))
        .route("/inventory-transactions/:id", get(get_inventory_transaction))
        .route("/inventory-transactions/:id/receive", post(receive_order))
        .route("/inventory-transactions/:id/cancel", post(cancel_order))
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Stock items", body = Vec<InventoryItemResponse>)
    )
)]
pub async fn list_items(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListItemsQuery>,
) -> GatewayResult<Json<Vec<InventoryItemResponse>>> {
    let filter = InventoryFilter {
        hotel_id: params.hotel_id,
        category: params.category,
        low_stock_only: params.low_stock_only,
        low_stock_threshold: None,
    };

    let items = state
        .services
        .inventory
        .list_items(filter, params.limit, params.offset)
        .await?;
    Ok(Json(items.into_iter().map(InventoryItemResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = InventoryItemResponse),
        (status = 400, description = "Invalid item details", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "Item name already used in the hotel", body = ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateItemRequest>,
) -> GatewayResult<impl IntoResponse> {
    let item = state
        .services
        .inventory
        .create_item(NewInventoryItem {
            hotel_id: payload.hotel_id,
            name: payload.name,
            category: payload.category,
            unit: payload.unit,
            quantity: payload.quantity,
            reorder_level: payload.reorder_level,
            unit_cost_cents: payload.unit_cost_cents,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InventoryItemResponse::from(item))))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = InventoryItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<InventoryItemResponse>> {
    let item = state.services.inventory.get_item(id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = InventoryItemResponse),
        (status = 400, description = "Invalid item details", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Item name already used in the hotel", body = ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateItemRequest>,
) -> GatewayResult<Json<InventoryItemResponse>> {
    let changes = InventoryChanges {
        name: payload.name,
        category: payload.category,
        unit: payload.unit,
        reorder_level: payload.reorder_level,
        unit_cost_cents: payload.unit_cost_cents,
    };

    let item = state.services.inventory.update_item(id, changes).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Item has stock history", body = ErrorResponse)
    )
)]
pub async fn delete_item(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<StatusCode> {
    state.services.inventory.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/inventory/{id}/orders",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Pending supplier order", body = InventoryTransactionResponse),
        (status = 400, description = "Invalid order", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn place_order(
    State(state): State<Arc<GatewayState>>,
    ApiPath(item_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<PlaceOrderRequest>,
) -> GatewayResult<impl IntoResponse> {
    let order = state
        .services
        .inventory
        .place_order(NewOrder {
            inventory_id: item_id,
            quantity: payload.quantity,
            unit_cost_cents: payload.unit_cost_cents,
            supplier: payload.supplier,
            note: payload.note,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InventoryTransactionResponse::from(order))))
}

#[utoipa::path(
    post,
    path = "/api/inventory/{id}/adjustments",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = AdjustStockRequest,
    responses(
        (status = 201, description = "Adjustment recorded", body = InventoryTransactionResponse),
        (status = 400, description = "Zero adjustment", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Stock would go negative", body = ErrorResponse)
    )
)]
pub async fn adjust_stock(
    State(state): State<Arc<GatewayState>>,
    ApiPath(item_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AdjustStockRequest>,
) -> GatewayResult<impl IntoResponse> {
    let adjustment = state
        .services
        .inventory
        .adjust_stock(StockAdjustment {
            inventory_id: item_id,
            delta: payload.delta,
            note: payload.note,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InventoryTransactionResponse::from(adjustment))))
}

#[utoipa::path(
    get,
    path = "/api/inventory-transactions",
    tag = "Inventory",
    params(ListInventoryTransactionsQuery),
    responses(
        (status = 200, description = "Orders and adjustments", body = Vec<InventoryTransactionResponse>),
        (status = 400, description = "Unknown status or kind", body = ErrorResponse)
    )
)]
pub async fn list_inventory_transactions(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListInventoryTransactionsQuery>,
) -> GatewayResult<Json<Vec<InventoryTransactionResponse>>> {
    let filter = InventoryTransactionFilter {
        inventory_id: params.item_id,
        hotel_id: params.hotel_id,
        status: parse_optional(params.status.as_deref())?,
        kind: parse_optional(params.kind.as_deref())?,
    };

    let transactions = state
        .services
        .inventory
        .list_transactions(filter, params.limit, params.offset)
        .await?;
    Ok(Json(
        transactions
            .into_iter()
            .map(InventoryTransactionResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/inventory-transactions/{id}",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Inventory transaction ID")),
    responses(
        (status = 200, description = "Order or adjustment", body = InventoryTransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn get_inventory_transaction(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<InventoryTransactionResponse>> {
    let transaction = state.services.inventory.get_transaction(id).await?;
    Ok(Json(transaction.into()))
}

#[utoipa::path(
    post,
    path = "/api/inventory-transactions/{id}/receive",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order received into stock and booked as an expense", body = ReceivedOrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order is not pending", body = ErrorResponse)
    )
)]
pub async fn receive_order(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<ReceivedOrderResponse>> {
    let received = state.services.inventory.receive_order(id).await?;
    Ok(Json(received.into()))
}

#[utoipa::path(
    post,
    path = "/api/inventory-transactions/{id}/cancel",
    tag = "Inventory",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = InventoryTransactionResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order is not pending", body = ErrorResponse)
    )
)]
pub async fn cancel_order(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<InventoryTransactionResponse>> {
    let order = state.services.inventory.cancel_order(id).await?;
    Ok(Json(order.into()))
}
