use crate::models::appointments::AppointmentStatus;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct BookRequest {
    pub class_id: i64,
}

#[derive(Deserialize)]
pub struct CancelRequest {
    pub appointment_id: i64,
    pub class_id: i64,
}

#[derive(Deserialize)]
pub struct RemainingRequest {
    pub class_id: i64,
}

#[derive(Deserialize)]
pub struct SearchClassRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct SearchBookingRequest {
    /// Absent lists bookings in every state.
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}
