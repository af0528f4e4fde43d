use super::{BookingError, BookingService, Identity};
use crate::{
    database::{assert, write_transaction},
    models::{
        appointments::{Appointment, AppointmentId, AppointmentStatus},
        classes::{ClassId, ClassStatus},
    },
};
use diesel::prelude::*;
use tracing::info;

impl BookingService {
    /// Records whether the member showed up. Only allowed once the class is
    /// completed; the seat stays taken either way, so `booked` is untouched.
    pub fn mark_attendance(
        &self,
        who: &Identity,
        appointment_id: AppointmentId,
        attended: bool,
    ) -> Result<AppointmentStatus, BookingError> {
        use crate::schema::appointments;

        let status = if attended {
            AppointmentStatus::Attended
        } else {
            AppointmentStatus::Absent
        };

        let mut conn = self.conn()?;
        write_transaction(&mut conn, "mark_attendance", |conn| {
            let appointment = assert::assert_appointment(conn, appointment_id)?;
            if !appointment.status.holds_seat() {
                return Err(BookingError::BookingNotFound);
            }
            let class = assert::assert_class_manager(conn, who, appointment.class_id)?;
            if class.status != ClassStatus::Completed {
                return Err(BookingError::Invalid(format!(
                    "attendance can only be marked for completed classes, class {} is {}",
                    class.id, class.status
                )));
            }

            diesel::update(appointments::table.find(appointment.id))
                .set(appointments::status.eq(status))
                .execute(conn)?;
            Ok(())
        })?;

        info!(appointment_id, %status, staff_id = who.member_id, "attendance marked");
        Ok(status)
    }

    /// Seat-holding appointments of a class, oldest booking first.
    pub fn class_roster(
        &self,
        who: &Identity,
        class_id: ClassId,
    ) -> Result<Vec<Appointment>, BookingError> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let class = assert::assert_class_manager(&mut conn, who, class_id)?;
        let roster = appointments::table
            .filter(appointments::class_id.eq(class.id))
            .filter(appointments::status.ne(AppointmentStatus::Cancelled))
            .order((appointments::date.asc(), appointments::id.asc()))
            .select(Appointment::as_select())
            .load(&mut conn)?;
        Ok(roster)
    }
}
