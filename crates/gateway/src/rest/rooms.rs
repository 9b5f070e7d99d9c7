//! Room REST endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use hotel_database::entities::{NewRoom, Room, RoomChanges, RoomFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::{parse_optional, parse_required, ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub room_number: String,
    /// single, double, suite or deluxe
    pub room_type: String,
    pub rate_cents: i64,
    pub capacity: i64,
    /// available, occupied or maintenance
    pub status: String,
    pub image_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            hotel_id: room.hotel_id,
            room_number: room.room_number,
            room_type: room.room_type.to_string(),
            rate_cents: room.rate_cents,
            capacity: room.capacity,
            status: room.status.to_string(),
            image_path: room.image_path,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub hotel_id: i64,
    pub room_number: String,
    pub room_type: String,
    pub rate_cents: i64,
    pub capacity: i64,
    pub image_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRoomRequest {
    pub room_type: Option<String>,
    pub rate_cents: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListRoomsQuery {
    pub hotel_id: Option<i64>,
    pub status: Option<String>,
    pub room_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: Option<i64>,
}

/// Create room routes
pub fn create_room_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/:id", get(get_room).put(update_room).delete(delete_room))
        .route("/hotels/:id/available-rooms", get(available_rooms))
}

#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    params(ListRoomsQuery),
    responses(
        (status = 200, description = "Rooms matching the filters", body = Vec<RoomResponse>),
        (status = 400, description = "Unknown status or room type", body = ErrorResponse)
    )
)]
pub async fn list_rooms(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListRoomsQuery>,
) -> GatewayResult<Json<Vec<RoomResponse>>> {
    let filter = RoomFilter {
        hotel_id: params.hotel_id,
        status: parse_optional(params.status.as_deref())?,
        room_type: parse_optional(params.room_type.as_deref())?,
    };

    let rooms = state
        .services
        .rooms
        .list(filter, params.limit, params.offset)
        .await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 400, description = "Invalid room details", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "Room number already used in the hotel", body = ErrorResponse)
    )
)]
pub async fn create_room(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateRoomRequest>,
) -> GatewayResult<impl IntoResponse> {
    let room = state
        .services
        .rooms
        .create(NewRoom {
            hotel_id: payload.hotel_id,
            room_number: payload.room_number,
            room_type: parse_required(&payload.room_type)?,
            rate_cents: payload.rate_cents,
            capacity: payload.capacity,
            image_path: payload.image_path,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = RoomResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    )
)]
pub async fn get_room(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<RoomResponse>> {
    let room = state.services.rooms.get(id).await?;
    Ok(Json(room.into()))
}

#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = i64, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 400, description = "Invalid room details", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Status change clashes with a guest in the room", body = ErrorResponse)
    )
)]
pub async fn update_room(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateRoomRequest>,
) -> GatewayResult<Json<RoomResponse>> {
    let changes = RoomChanges {
        room_type: parse_optional(payload.room_type.as_deref())?,
        rate_cents: payload.rate_cents,
        capacity: payload.capacity,
        status: parse_optional(payload.status.as_deref())?,
        image_path: payload.image_path,
    };

    let room = state.services.rooms.update(id, changes).await?;
    Ok(Json(room.into()))
}

#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    tag = "Rooms",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Room has active bookings", body = ErrorResponse)
    )
)]
pub async fn delete_room(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<StatusCode> {
    state.services.rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/available-rooms",
    tag = "Rooms",
    params(("id" = i64, Path, description = "Hotel ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Rooms free for the whole stay", body = Vec<RoomResponse>),
        (status = 400, description = "Invalid stay dates", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    )
)]
pub async fn available_rooms(
    State(state): State<Arc<GatewayState>>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<AvailabilityQuery>,
) -> GatewayResult<Json<Vec<RoomResponse>>> {
    let rooms = state
        .services
        .rooms
        .available(hotel_id, params.check_in, params.check_out, params.guests)
        .await?;

    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}
