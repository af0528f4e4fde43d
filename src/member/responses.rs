use serde::Serialize;

#[derive(Default, Serialize)]
pub struct BookResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub appointment_id: i64,
}

#[derive(Default, Serialize)]
pub struct RemainingResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub class_id: i64,
    pub rest: i32,
}

#[derive(Default, Serialize)]
pub struct SearchClassItem {
    pub class_id: i64,
    pub name: String,
    pub trainer_id: Option<i64>,
    pub schedule: String,
    pub capacity: i32,
    pub rest: i32,
}

#[derive(Default, Serialize)]
pub struct SearchClassResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub classes: Vec<SearchClassItem>,
}

#[derive(Default, Serialize)]
pub struct SearchBookingItem {
    pub appointment_id: i64,
    pub class_id: i64,
    pub class_name: String,
    pub schedule: String,
    pub class_status: String,
    pub status: String,
    pub appo_time: String,
}

#[derive(Default, Serialize)]
pub struct SearchBookingResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub bookings: Vec<SearchBookingItem>,
}

crate::impl_err_response! {
    BookResponse,
    RemainingResponse,
    SearchClassResponse,
    SearchBookingResponse,
}
