use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddClassRequest {
    pub name: String,
    pub capacity: i32,
    pub schedule: String,
    pub trainer_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct ClassRequest {
    pub class_id: i64,
}

#[derive(Deserialize)]
pub struct MarkAttendanceRequest {
    pub appointment_id: i64,
    pub attended: bool,
}
