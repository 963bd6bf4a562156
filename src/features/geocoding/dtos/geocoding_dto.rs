use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query for a reverse lookup
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct ReverseGeocodeQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub lng: f64,
}

/// Address resolved for a coordinate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressResponseDto {
    /// Full address line, suitable for the issue's `address` field
    pub display_name: String,
    pub road: Option<String>,
    pub suburb: Option<String>,
    /// City, falling back to town or village
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_range() {
        assert!(ReverseGeocodeQuery { lat: 28.61, lng: 77.21 }.validate().is_ok());
        assert!(ReverseGeocodeQuery { lat: 91.0, lng: 0.0 }.validate().is_err());
        assert!(ReverseGeocodeQuery { lat: 0.0, lng: -180.5 }.validate().is_err());
    }
}
