use serde::Serialize;
use std::str::FromStr;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    /// SHA-256 hex of the configured service token; requests are compared against this.
    pub service_token_fingerprint: String,
}

/* -------------------------
   Shared API DTOs
--------------------------*/

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub data: OkData,
}

#[derive(Debug, Serialize)]
pub struct OkData {
    pub ok: bool,
}

/* -------------------------
   Appointment status
--------------------------*/

/// Closed status set stored as text in appointments.status.
/// The declaration order here is also the display order for status charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid appointment status: {0}")]
pub struct ParseStatusError(pub String);

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in AppointmentStatus::ALL {
            assert_eq!(status, status.as_str().parse().unwrap());
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "arrived".parse::<AppointmentStatus>().unwrap_err();
        assert_eq!(err.0, "arrived");
    }
}
