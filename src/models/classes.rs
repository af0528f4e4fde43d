use crate::schema::classes;
use chrono::NaiveDateTime;
use diesel::deserialize::FromSqlRow;
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

pub type ClassId = i64;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl_text_enum! {
    ClassStatus {
        Scheduled => "scheduled",
        Cancelled => "cancelled",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = classes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GymClass {
    pub id: ClassId,
    pub name: String,
    pub trainer_id: Option<i64>,
    pub capacity: i32,
    pub booked: i32,
    pub schedule: NaiveDateTime,
    pub status: ClassStatus,
}

impl GymClass {
    /// Slots left for display. Stale as soon as it is read; only the check
    /// made under the write lock decides a booking. A class that already
    /// started has none.
    pub fn remaining(&self, now: NaiveDateTime) -> i32 {
        match self.status {
            ClassStatus::Scheduled if self.schedule > now => (self.capacity - self.booked).max(0),
            _ => 0,
        }
    }

    pub fn accepts_bookings(&self, now: NaiveDateTime) -> bool {
        self.status == ClassStatus::Scheduled && self.schedule > now && self.booked < self.capacity
    }
}

#[derive(Insertable)]
#[diesel(table_name = classes)]
pub struct NewGymClass {
    pub name: String,
    pub trainer_id: Option<i64>,
    pub capacity: i32,
    pub booked: i32,
    pub schedule: NaiveDateTime,
    pub status: ClassStatus,
}
