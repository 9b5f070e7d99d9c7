//! Hotel REST endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use hotel_database::entities::{Hotel, HotelChanges, HotelFilter, NewHotel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::{ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub star_rating: i64,
    pub image_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            address: hotel.address,
            city: hotel.city,
            phone: hotel.phone,
            email: hotel.email,
            star_rating: hotel.star_rating,
            image_path: hotel.image_path,
            created_at: hotel.created_at,
            updated_at: hotel.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHotelRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub star_rating: i64,
    pub image_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateHotelRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub star_rating: Option<i64>,
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListHotelsQuery {
    pub city: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create hotel routes
pub fn create_hotel_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/hotels", get(list_hotels).post(create_hotel))
        .route("/hotels/:id", get(get_hotel).put(update_hotel).delete(delete_hotel))
}

#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Hotels",
    params(ListHotelsQuery),
    responses(
        (status = 200, description = "Hotels, optionally filtered by city", body = Vec<HotelResponse>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn list_hotels(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListHotelsQuery>,
) -> GatewayResult<Json<Vec<HotelResponse>>> {
    let filter = HotelFilter { city: params.city };
    let hotels = state
        .services
        .hotels
        .list(filter, params.limit, params.offset)
        .await?;

    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/hotels",
    tag = "Hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelResponse),
        (status = 400, description = "Invalid hotel details", body = ErrorResponse)
    )
)]
pub async fn create_hotel(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateHotelRequest>,
) -> GatewayResult<impl IntoResponse> {
    let hotel = state
        .services
        .hotels
        .create(NewHotel {
            name: payload.name,
            address: payload.address,
            city: payload.city,
            phone: payload.phone,
            email: payload.email,
            star_rating: payload.star_rating,
            image_path: payload.image_path,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(HotelResponse::from(hotel))))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel details", body = HotelResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    )
)]
pub async fn get_hotel(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<HotelResponse>> {
    let hotel = state.services.hotels.get(id).await?;
    Ok(Json(hotel.into()))
}

#[utoipa::path(
    put,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    request_body = UpdateHotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = HotelResponse),
        (status = 400, description = "Invalid hotel details", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    )
)]
pub async fn update_hotel(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateHotelRequest>,
) -> GatewayResult<Json<HotelResponse>> {
    let changes = HotelChanges {
        name: payload.name,
        address: payload.address,
        city: payload.city,
        phone: payload.phone,
        email: payload.email,
        star_rating: payload.star_rating,
        image_path: payload.image_path,
    };

    let hotel = state.services.hotels.update(id, changes).await?;
    Ok(Json(hotel.into()))
}

#[utoipa::path(
    delete,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    params(("id" = i64, Path, description = "Hotel ID")),
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "Hotel still has rooms, staff or bookings", body = ErrorResponse)
    )
)]
pub async fn delete_hotel(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<StatusCode> {
    state.services.hotels.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
