use super::{BookingError, BookingService, Identity, Role};
use crate::{
    database::{assert, write_transaction},
    models::{
        appointments::AppointmentStatus,
        classes::{ClassId, ClassStatus, NewGymClass},
    },
};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use tracing::info;

#[derive(Debug, Clone)]
pub struct NewClassRequest {
    pub name: String,
    pub capacity: i32,
    pub schedule: NaiveDateTime,
    /// Ignored when a trainer schedules: trainers always run their own classes.
    pub trainer_id: Option<i64>,
}

impl BookingService {
    pub fn schedule_class(
        &self,
        who: &Identity,
        req: NewClassRequest,
    ) -> Result<ClassId, BookingError> {
        use crate::schema::classes;

        assert::assert_staff(who)?;
        if req.name.trim().is_empty() {
            return Err(BookingError::Invalid("class name is empty".to_string()));
        }
        if req.capacity <= 0 {
            return Err(BookingError::Invalid(format!(
                "capacity must be positive, got {}",
                req.capacity
            )));
        }
        if req.schedule <= Utc::now().naive_utc() {
            return Err(BookingError::Invalid(
                "class must be scheduled in the future".to_string(),
            ));
        }

        let trainer_id = match who.role {
            Role::Trainer => Some(who.member_id),
            _ => req.trainer_id,
        };
        let data = NewGymClass {
            name: req.name,
            trainer_id,
            capacity: req.capacity,
            booked: 0,
            schedule: req.schedule,
            status: ClassStatus::Scheduled,
        };

        let mut conn = self.conn()?;
        let class_id = write_transaction(&mut conn, "schedule_class", |conn| {
            Ok(diesel::insert_into(classes::table)
                .values(data)
                .returning(classes::id)
                .get_result::<ClassId>(conn)?)
        })?;

        info!(class_id, staff_id = who.member_id, "class scheduled");
        Ok(class_id)
    }

    /// Cancels a scheduled class and every booking in it. Returns how many
    /// bookings were released.
    pub fn cancel_class(&self, who: &Identity, class_id: ClassId) -> Result<usize, BookingError> {
        use crate::schema::{appointments, classes};

        let mut conn = self.conn()?;
        let released = write_transaction(&mut conn, "cancel_class", |conn| {
            let class = assert::assert_class_manager(conn, who, class_id)?;
            if class.status != ClassStatus::Scheduled {
                return Err(BookingError::ClassUnavailable);
            }

            let released = diesel::update(
                appointments::table
                    .filter(appointments::class_id.eq(class.id))
                    .filter(appointments::status.eq(AppointmentStatus::Booked)),
            )
            .set(appointments::status.eq(AppointmentStatus::Cancelled))
            .execute(conn)?;

            diesel::update(classes::table.find(class.id))
                .set((
                    classes::status.eq(ClassStatus::Cancelled),
                    classes::booked.eq(0),
                ))
                .execute(conn)?;

            Ok(released)
        })?;

        info!(class_id, released, staff_id = who.member_id, "class cancelled");
        Ok(released)
    }

    /// Closes a scheduled class for booking so attendance can be recorded.
    pub fn complete_class(&self, who: &Identity, class_id: ClassId) -> Result<(), BookingError> {
        use crate::schema::classes;

        let mut conn = self.conn()?;
        write_transaction(&mut conn, "complete_class", |conn| {
            let class = assert::assert_class_manager(conn, who, class_id)?;
            if class.status != ClassStatus::Scheduled {
                return Err(BookingError::ClassUnavailable);
            }

            diesel::update(classes::table.find(class.id))
                .set(classes::status.eq(ClassStatus::Completed))
                .execute(conn)?;
            Ok(())
        })?;

        info!(class_id, staff_id = who.member_id, "class completed");
        Ok(())
    }
}
