use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::geocoding::dtos::{AddressResponseDto, ReverseGeocodeQuery};
use crate::features::geocoding::services::GeocodingService;
use crate::shared::types::ApiResponse;

/// Look up the address of a coordinate pair
#[utoipa::path(
    get,
    path = "/api/geocode/reverse",
    params(ReverseGeocodeQuery),
    responses(
        (status = 200, description = "Resolved address", body = ApiResponse<AddressResponseDto>),
        (status = 400, description = "Coordinates out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No address at this location"),
        (status = 502, description = "Geocoding service unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "geocoding"
)]
pub async fn reverse_geocode(
    _user: AuthenticatedUser,
    State(service): State<Arc<GeocodingService>>,
    AppQuery(query): AppQuery<ReverseGeocodeQuery>,
) -> Result<Json<ApiResponse<AddressResponseDto>>> {
    query.validate()?;

    let address = service.reverse(query.lat, query.lng).await?;
    Ok(Json(ApiResponse::success(Some(address), None, None)))
}
