//! Capacity-checked class booking.
//!
//! Every mutation of `classes.booked` or of an appointment's status goes
//! through [`BookingService`], inside one write transaction per call. The
//! counter always equals the number of seat-holding appointments of its
//! class; the store backs this up with a `CHECK (booked <= capacity)` and a
//! unique index over active `(user_id, class_id)` pairs.

mod attendance;
mod error;
mod identity;
mod listing;
mod schedule;

pub use self::{
    error::BookingError,
    identity::{Identity, Role},
    listing::{BookingItem, ClassQuery, ClassSlot, DEFAULT_PAGE_LIMIT},
    schedule::NewClassRequest,
};

use crate::{
    database::{assert, write_transaction, DbConn},
    models::{
        appointments::{AppointmentId, AppointmentStatus, NewAppointment},
        classes::{ClassId, ClassStatus},
    },
    DbPool,
};
use chrono::Utc;
use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use tracing::{info, warn};

#[derive(Clone)]
pub struct BookingService {
    pool: DbPool,
}

impl BookingService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn, BookingError> {
        Ok(self.pool.get()?)
    }

    /// Books a seat in `class_id` for the calling member.
    pub fn book(&self, who: &Identity, class_id: ClassId) -> Result<AppointmentId, BookingError> {
        use crate::schema::appointments;

        assert::assert_member(who)?;
        let member_id = who.member_id;

        let mut conn = self.conn()?;
        let appointment_id = write_transaction(&mut conn, "book", |conn| {
            let now = Utc::now().naive_utc();
            let class = assert::assert_class(conn, class_id)?;
            if !class.accepts_bookings(now) {
                return Err(BookingError::ClassUnavailable);
            }
            assert::assert_no_active_booking(conn, member_id, class.id)?;

            let data = NewAppointment {
                user_id: member_id,
                class_id: class.id,
                status: AppointmentStatus::Booked,
                date: now,
            };
            let appointment_id = diesel::insert_into(appointments::table)
                .values(data)
                .returning(appointments::id)
                .get_result::<AppointmentId>(conn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BookingError::AlreadyBooked
                    }
                    err => err.into(),
                })?;

            increment_booked(conn, class.id)?;
            Ok(appointment_id)
        })?;

        info!(member_id, class_id, appointment_id, "class booked");
        Ok(appointment_id)
    }

    /// Cancels the caller's active booking `appointment_id` in `class_id`.
    pub fn cancel(
        &self,
        who: &Identity,
        appointment_id: AppointmentId,
        class_id: ClassId,
    ) -> Result<(), BookingError> {
        use crate::schema::appointments;

        assert::assert_member(who)?;
        let member_id = who.member_id;

        let mut conn = self.conn()?;
        write_transaction(&mut conn, "cancel", |conn| {
            let appointment =
                assert::assert_active_booking(conn, member_id, appointment_id, class_id)?;
            // a completed class keeps its roster for attendance
            let class = assert::assert_class(conn, appointment.class_id)?;
            if class.status != ClassStatus::Scheduled {
                return Err(BookingError::ClassUnavailable);
            }

            diesel::update(appointments::table.find(appointment.id))
                .set(appointments::status.eq(AppointmentStatus::Cancelled))
                .execute(conn)?;

            decrement_booked(conn, appointment.class_id)?;
            Ok(())
        })?;

        info!(member_id, class_id, appointment_id, "booking cancelled");
        Ok(())
    }

    /// Slots left in `class_id`, for display only. Read without any lock.
    pub fn remaining_capacity(&self, class_id: ClassId) -> Result<i32, BookingError> {
        let mut conn = self.conn()?;
        let class = assert::assert_class(&mut conn, class_id)?;
        Ok(class.remaining(Utc::now().naive_utc()))
    }
}

fn increment_booked(conn: &mut SqliteConnection, class_id: ClassId) -> Result<(), BookingError> {
    use crate::schema::classes;

    diesel::update(classes::table.find(class_id))
        .set(classes::booked.eq(classes::booked + 1))
        .execute(conn)?;
    Ok(())
}

fn decrement_booked(conn: &mut SqliteConnection, class_id: ClassId) -> Result<(), BookingError> {
    use crate::schema::classes;

    let updated = diesel::update(classes::table.find(class_id).filter(classes::booked.gt(0)))
        .set(classes::booked.eq(classes::booked - 1))
        .execute(conn)?;
    if updated == 0 {
        warn!(class_id, "booked counter already at zero, not decremented");
    }
    Ok(())
}
