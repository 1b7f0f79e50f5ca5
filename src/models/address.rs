/// A validated, normalized address lookup ready to be sent upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressQuery {
    pub country_iso: String,
    pub postal_code: String,
    pub house_number: String,
    pub city_name: Option<String>,
    pub street_name: Option<String>,
    pub house_number_addition: Option<String>,
}

impl AddressQuery {
    /// Query parameters in the order the provider documents them.
    /// Optional fields are only present when they carry a value.
    pub fn to_query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("countryIso", self.country_iso.as_str()),
            ("postalCode", self.postal_code.as_str()),
            ("houseNumber", self.house_number.as_str()),
        ];

        if let Some(city) = &self.city_name {
            params.push(("cityName", city.as_str()));
        }
        if let Some(street) = &self.street_name {
            params.push(("streetName", street.as_str()));
        }
        if let Some(addition) = &self.house_number_addition {
            params.push(("houseNumberAddition", addition.as_str()));
        }

        params
    }
}
