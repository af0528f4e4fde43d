#![allow(dead_code)]

use chrono::{Duration, Utc};
use diesel::prelude::*;
use gym_server::{
    booking::{BookingService, Identity, NewClassRequest, Role},
    config::DbSettings,
    database,
    models::{
        appointments::AppointmentStatus,
        classes::{ClassId, GymClass},
    },
    schema::{appointments, classes},
    DbPool,
};
use tempfile::TempDir;

pub const ADMIN: Identity = Identity {
    member_id: 1,
    role: Role::Admin,
};

pub struct TestGym {
    pub service: BookingService,
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn gym() -> TestGym {
    gym_with(|_| {})
}

pub fn gym_with<F: FnOnce(&mut DbSettings)>(tweak: F) -> TestGym {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = DbSettings::new(dir.path().join("gym.db").to_string_lossy().into_owned());
    settings.pool_size = 8;
    settings.lock_wait_timeout = std::time::Duration::from_secs(10);
    tweak(&mut settings);

    let pool = database::build_pool(&settings).unwrap();
    database::init_schema(&pool).unwrap();
    TestGym {
        service: BookingService::new(pool.clone()),
        pool,
        _dir: dir,
    }
}

impl TestGym {
    pub fn add_class(&self, capacity: i32) -> ClassId {
        self.service
            .schedule_class(
                &ADMIN,
                NewClassRequest {
                    name: "Spin".to_string(),
                    capacity,
                    schedule: Utc::now().naive_utc() + Duration::days(1),
                    trainer_id: None,
                },
            )
            .unwrap()
    }

    pub fn class(&self, class_id: ClassId) -> GymClass {
        let mut conn = self.pool.get().unwrap();
        classes::table
            .find(class_id)
            .select(GymClass::as_select())
            .first(&mut conn)
            .unwrap()
    }

    pub fn count_appointments(&self, class_id: ClassId, status: AppointmentStatus) -> i64 {
        let mut conn = self.pool.get().unwrap();
        appointments::table
            .filter(appointments::class_id.eq(class_id))
            .filter(appointments::status.eq(status))
            .count()
            .get_result(&mut conn)
            .unwrap()
    }

    pub fn appointment_status(&self, appointment_id: i64) -> AppointmentStatus {
        let mut conn = self.pool.get().unwrap();
        appointments::table
            .find(appointment_id)
            .select(appointments::status)
            .first(&mut conn)
            .unwrap()
    }

    /// Asserts that the counter matches the seat-holding appointment rows.
    pub fn assert_counter_consistent(&self, class_id: ClassId) {
        let class = self.class(class_id);
        let seats = self.count_appointments(class_id, AppointmentStatus::Booked)
            + self.count_appointments(class_id, AppointmentStatus::Attended)
            + self.count_appointments(class_id, AppointmentStatus::Absent);
        assert_eq!(i64::from(class.booked), seats, "counter drifted for class {}", class_id);
        assert!(class.booked <= class.capacity);
    }
}

pub fn member(id: i64) -> Identity {
    Identity::member(id)
}
