use serde::Serialize;

#[derive(Default, Serialize)]
pub struct AddClassResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub class_id: i64,
}

#[derive(Default, Serialize)]
pub struct CancelClassResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub released: usize,
}

#[derive(Default, Serialize)]
pub struct MarkAttendanceResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub status: String,
}

#[derive(Default, Serialize)]
pub struct SearchRosterItem {
    pub appointment_id: i64,
    pub member_id: i64,
    pub status: String,
    pub appo_time: String,
}

#[derive(Default, Serialize)]
pub struct SearchRosterResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
    pub appointments: Vec<SearchRosterItem>,
}

crate::impl_err_response! {
    AddClassResponse,
    CancelClassResponse,
    MarkAttendanceResponse,
    SearchRosterResponse,
}
