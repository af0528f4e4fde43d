use super::{BookingError, BookingService, Identity};
use crate::models::{
    appointments::{Appointment, AppointmentStatus},
    classes::{ClassStatus, GymClass},
};
use chrono::{NaiveDateTime, Utc};
use diesel::{prelude::*, sql_types::Bool};

pub const DEFAULT_PAGE_LIMIT: i64 = 30;

#[derive(Debug, Clone)]
pub struct ClassQuery {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub first_index: i64,
    pub limit: i64,
}

/// A bookable class with its advisory slot count.
#[derive(Debug, Clone)]
pub struct ClassSlot {
    pub class: GymClass,
    pub remaining: i32,
}

#[derive(Debug, Clone)]
pub struct BookingItem {
    pub appointment: Appointment,
    pub class: GymClass,
}

impl BookingService {
    pub fn search_classes(&self, query: &ClassQuery) -> Result<Vec<ClassSlot>, BookingError> {
        use crate::schema::classes;

        let now = Utc::now().naive_utc();
        let mut conn = self.conn()?;
        let found = classes::table
            .filter(classes::status.eq(ClassStatus::Scheduled))
            .filter(classes::schedule.between(query.from, query.to))
            .order((classes::schedule.asc(), classes::id.asc()))
            .offset(query.first_index.max(0))
            .limit(query.limit.max(0))
            .select(GymClass::as_select())
            .load(&mut conn)?;

        Ok(found
            .into_iter()
            .map(|class| ClassSlot {
                remaining: class.remaining(now),
                class,
            })
            .collect())
    }

    /// The caller's appointments, most recent class first. `status` of
    /// `None` lists every state.
    pub fn member_bookings(
        &self,
        who: &Identity,
        status: Option<AppointmentStatus>,
        first_index: i64,
        limit: i64,
    ) -> Result<Vec<BookingItem>, BookingError> {
        use crate::schema::{appointments, classes};

        let any_status = status.is_none();
        let status = status.unwrap_or(AppointmentStatus::Booked);

        let mut conn = self.conn()?;
        let found = appointments::table
            .inner_join(classes::table)
            .filter(appointments::user_id.eq(who.member_id))
            .filter(appointments::status.eq(status).or(any_status.into_sql::<Bool>()))
            .order((classes::schedule.desc(), appointments::id.desc()))
            .offset(first_index.max(0))
            .limit(limit.max(0))
            .select((Appointment::as_select(), GymClass::as_select()))
            .load::<(Appointment, GymClass)>(&mut conn)?;

        Ok(found
            .into_iter()
            .map(|(appointment, class)| BookingItem { appointment, class })
            .collect())
    }
}
