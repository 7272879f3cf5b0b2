pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("No day numbered {day} in this itinerary")]
    DayNotFound { day: u32 },

    #[error("Activity index {index} out of range for day {day} (len {len})")]
    ActivityIndexOutOfRange { day: u32, index: usize, len: usize },

    #[error("Day insertion position {position} out of range (len {len})")]
    DayPositionOutOfRange { position: usize, len: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
