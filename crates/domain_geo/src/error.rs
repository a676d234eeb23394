//! Geo domain errors

use thiserror::Error;

/// Errors that can occur in the geo domain
#[derive(Debug, Error)]
pub enum GeoError {
    /// The department is not present in the loaded department list
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// A city was selected while its cascade had no list available
    #[error("No city list loaded for department {0}")]
    CitiesNotLoaded(String),

    /// The city is not an option of the current department's list
    #[error("City {city} does not belong to department {department}")]
    UnknownCity { city: String, department: String },
}

impl GeoError {
    pub fn unknown_department(name: impl Into<String>) -> Self {
        GeoError::UnknownDepartment(name.into())
    }

    pub fn unknown_city(city: impl Into<String>, department: impl Into<String>) -> Self {
        GeoError::UnknownCity {
            city: city.into(),
            department: department.into(),
        }
    }
}
