use crate::schema::appointments;
use chrono::NaiveDateTime;
use diesel::deserialize::FromSqlRow;
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

pub type AppointmentId = i64;
pub type MemberId = i64;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Booked,
    Cancelled,
    Attended,
    Absent,
}

impl_text_enum! {
    AppointmentStatus {
        Booked => "booked",
        Cancelled => "cancelled",
        Attended => "attended",
        Absent => "absent",
    }
}

impl AppointmentStatus {
    /// Whether an appointment in this state occupies a seat in its class.
    pub fn holds_seat(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Appointment {
    pub id: AppointmentId,
    pub user_id: MemberId,
    pub class_id: i64,
    pub status: AppointmentStatus,
    pub date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = appointments)]
pub struct NewAppointment {
    pub user_id: MemberId,
    pub class_id: i64,
    pub status: AppointmentStatus,
    pub date: NaiveDateTime,
}
