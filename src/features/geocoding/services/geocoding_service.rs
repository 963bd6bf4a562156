use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::geocoding::dtos::AddressResponseDto;

/// Nominatim `/reverse` body: a place, or `{"error": "Unable to geocode"}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NominatimReply {
    Error { error: String },
    Place(NominatimPlace),
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    neighbourhood: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country_code: Option<String>,
}

impl NominatimAddress {
    fn city(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
    }
}

/// Reverse geocoding through Nominatim
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a coordinate pair to an address
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<AddressResponseDto> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&addressdetails=1",
            self.base_url, lat, lng
        );

        tracing::debug!("Reverse geocoding ({}, {}) -> {}", lat, lng, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError("Geocoding service unavailable".to_string())
        })?;

        if !response.status().is_success() {
            tracing::error!("Nominatim returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Geocoding service returned {}",
                response.status()
            )));
        }

        let reply: NominatimReply = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError("Invalid response from geocoding service".to_string())
        })?;

        to_address(reply, lat, lng)
    }
}

fn to_address(reply: NominatimReply, lat: f64, lng: f64) -> Result<AddressResponseDto> {
    let place = match reply {
        NominatimReply::Place(place) => place,
        NominatimReply::Error { error } => {
            tracing::debug!("Nominatim has no address for ({}, {}): {}", lat, lng, error);
            return Err(AppError::NotFound(
                "No address found for this location".to_string(),
            ));
        }
    };

    let address = place.address.unwrap_or_default();
    Ok(AddressResponseDto {
        city: address.city(),
        display_name: place.display_name,
        road: address.road,
        suburb: address.suburb.or(address.neighbourhood),
        state: address.state,
        postcode: address.postcode,
        country_code: address.country_code,
        latitude: lat,
        longitude: lng,
    })
}
