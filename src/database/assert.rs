use crate::{
    booking::{BookingError, Identity, Role},
    models::{
        appointments::{Appointment, AppointmentId, AppointmentStatus, MemberId},
        classes::{ClassId, GymClass},
    },
};
use diesel::prelude::*;

pub fn assert_class(conn: &mut SqliteConnection, class_id: ClassId) -> Result<GymClass, BookingError> {
    use crate::schema::classes;

    classes::table
        .find(class_id)
        .select(GymClass::as_select())
        .first(conn)
        .optional()?
        .ok_or(BookingError::ClassUnavailable)
}

/// Loads a class the caller may manage: admins manage every class, trainers
/// only the ones they run.
pub fn assert_class_manager(
    conn: &mut SqliteConnection,
    who: &Identity,
    class_id: ClassId,
) -> Result<GymClass, BookingError> {
    assert_staff(who)?;
    let class = assert_class(conn, class_id)?;
    if who.role == Role::Trainer && class.trainer_id != Some(who.member_id) {
        return Err(BookingError::Forbidden(who.role));
    }
    Ok(class)
}

pub fn assert_member(who: &Identity) -> Result<(), BookingError> {
    if who.role != Role::Member {
        return Err(BookingError::Forbidden(who.role));
    }
    Ok(())
}

pub fn assert_staff(who: &Identity) -> Result<(), BookingError> {
    if !who.role.is_staff() {
        return Err(BookingError::Forbidden(who.role));
    }
    Ok(())
}

pub fn assert_no_active_booking(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    class_id: ClassId,
) -> Result<(), BookingError> {
    use crate::schema::appointments;

    let res = appointments::table
        .filter(appointments::user_id.eq(member_id))
        .filter(appointments::class_id.eq(class_id))
        .filter(appointments::status.eq(AppointmentStatus::Booked))
        .count()
        .get_result::<i64>(conn)?;
    if res > 0 {
        return Err(BookingError::AlreadyBooked);
    }
    Ok(())
}

/// The member's own `booked` appointment in the given class.
pub fn assert_active_booking(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    appointment_id: AppointmentId,
    class_id: ClassId,
) -> Result<Appointment, BookingError> {
    use crate::schema::appointments;

    appointments::table
        .find(appointment_id)
        .filter(appointments::user_id.eq(member_id))
        .filter(appointments::class_id.eq(class_id))
        .filter(appointments::status.eq(AppointmentStatus::Booked))
        .select(Appointment::as_select())
        .first(conn)
        .optional()?
        .ok_or(BookingError::BookingNotFound)
}

pub fn assert_appointment(
    conn: &mut SqliteConnection,
    appointment_id: AppointmentId,
) -> Result<Appointment, BookingError> {
    use crate::schema::appointments;

    appointments::table
        .find(appointment_id)
        .select(Appointment::as_select())
        .first(conn)
        .optional()?
        .ok_or(BookingError::BookingNotFound)
}
