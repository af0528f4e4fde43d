mod common;

use chrono::{Duration, Utc};
use common::{gym, member, ADMIN};
use diesel::{connection::SimpleConnection, prelude::*};
use gym_server::{
    booking::{BookingError, Identity, Role},
    models::{
        appointments::AppointmentStatus,
        classes::{ClassStatus, NewGymClass},
    },
    schema::classes,
};

#[test]
fn second_member_cannot_book_a_full_class() {
    let gym = gym();
    let class_id = gym.add_class(1);

    let a1 = gym.service.book(&member(10), class_id).unwrap();
    assert_eq!(gym.class(class_id).booked, 1);
    assert_eq!(gym.appointment_status(a1), AppointmentStatus::Booked);

    let err = gym.service.book(&member(11), class_id).unwrap_err();
    assert!(matches!(err, BookingError::ClassUnavailable), "{:?}", err);
    assert_eq!(gym.class(class_id).booked, 1);
    assert_eq!(gym.count_appointments(class_id, AppointmentStatus::Booked), 1);
}

#[test]
fn member_cannot_book_the_same_class_twice() {
    let gym = gym();
    let class_id = gym.add_class(5);

    gym.service.book(&member(10), class_id).unwrap();
    let err = gym.service.book(&member(10), class_id).unwrap_err();
    assert!(matches!(err, BookingError::AlreadyBooked), "{:?}", err);
    assert_eq!(gym.class(class_id).booked, 1);
    gym.assert_counter_consistent(class_id);
}

#[test]
fn cancelling_releases_the_seat() {
    let gym = gym();
    let class_id = gym.add_class(1);

    let a1 = gym.service.book(&member(10), class_id).unwrap();
    gym.service.cancel(&member(10), a1, class_id).unwrap();

    assert_eq!(gym.class(class_id).booked, 0);
    assert_eq!(gym.appointment_status(a1), AppointmentStatus::Cancelled);

    // the freed seat goes to someone else
    gym.service.book(&member(11), class_id).unwrap();
    assert_eq!(gym.class(class_id).booked, 1);
    gym.assert_counter_consistent(class_id);
}

#[test]
fn member_can_book_again_after_cancelling() {
    let gym = gym();
    let class_id = gym.add_class(2);

    let first = gym.service.book(&member(10), class_id).unwrap();
    gym.service.cancel(&member(10), first, class_id).unwrap();
    let second = gym.service.book(&member(10), class_id).unwrap();

    assert_ne!(first, second);
    assert_eq!(gym.class(class_id).booked, 1);
    assert_eq!(gym.count_appointments(class_id, AppointmentStatus::Cancelled), 1);
    gym.assert_counter_consistent(class_id);
}

#[test]
fn cancelling_an_unknown_appointment_fails() {
    let gym = gym();
    let class_id = gym.add_class(1);

    let err = gym.service.cancel(&member(10), 999, class_id).unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound), "{:?}", err);
}

#[test]
fn second_cancel_is_rejected_without_touching_the_counter() {
    let gym = gym();
    let class_id = gym.add_class(3);

    let a1 = gym.service.book(&member(10), class_id).unwrap();
    gym.service.book(&member(11), class_id).unwrap();
    gym.service.cancel(&member(10), a1, class_id).unwrap();
    assert_eq!(gym.class(class_id).booked, 1);

    let err = gym.service.cancel(&member(10), a1, class_id).unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound), "{:?}", err);
    assert_eq!(gym.class(class_id).booked, 1);
    gym.assert_counter_consistent(class_id);
}

#[test]
fn members_cannot_cancel_each_others_bookings() {
    let gym = gym();
    let class_id = gym.add_class(2);
    let other_class = gym.add_class(2);

    let a1 = gym.service.book(&member(10), class_id).unwrap();

    let err = gym.service.cancel(&member(11), a1, class_id).unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound), "{:?}", err);

    let err = gym.service.cancel(&member(10), a1, other_class).unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound), "{:?}", err);

    assert_eq!(gym.appointment_status(a1), AppointmentStatus::Booked);
    assert_eq!(gym.class(class_id).booked, 1);
}

#[test]
fn cancelled_class_accepts_no_bookings() {
    let gym = gym();
    let class_id = gym.add_class(10);
    gym.service.cancel_class(&ADMIN, class_id).unwrap();

    let err = gym.service.book(&member(10), class_id).unwrap_err();
    assert!(matches!(err, BookingError::ClassUnavailable), "{:?}", err);
    assert_eq!(gym.count_appointments(class_id, AppointmentStatus::Booked), 0);
}

#[test]
fn unknown_class_is_unavailable() {
    let gym = gym();
    let err = gym.service.book(&member(10), 4242).unwrap_err();
    assert!(matches!(err, BookingError::ClassUnavailable), "{:?}", err);
}

#[test]
fn class_that_already_started_is_unavailable() {
    let gym = gym();
    let mut conn = gym.pool.get().unwrap();
    let class_id: i64 = diesel::insert_into(classes::table)
        .values(NewGymClass {
            name: "Sunrise yoga".to_string(),
            trainer_id: None,
            capacity: 10,
            booked: 0,
            schedule: Utc::now().naive_utc() - Duration::hours(1),
            status: ClassStatus::Scheduled,
        })
        .returning(classes::id)
        .get_result(&mut conn)
        .unwrap();

    let err = gym.service.book(&member(10), class_id).unwrap_err();
    assert!(matches!(err, BookingError::ClassUnavailable), "{:?}", err);
    assert_eq!(gym.service.remaining_capacity(class_id).unwrap(), 0);
}

#[test]
fn only_members_book() {
    let gym = gym();
    let class_id = gym.add_class(10);

    for role in [Role::Trainer, Role::Admin] {
        let err = gym.service.book(&Identity::new(10, role), class_id).unwrap_err();
        assert!(matches!(err, BookingError::Forbidden(r) if r == role), "{:?}", err);
    }
    assert_eq!(gym.class(class_id).booked, 0);
}

#[test]
fn only_members_cancel() {
    let gym = gym();
    let class_id = gym.add_class(3);
    let a1 = gym.service.book(&member(10), class_id).unwrap();

    // same numeric id, different role
    for role in [Role::Trainer, Role::Admin] {
        let err = gym
            .service
            .cancel(&Identity::new(10, role), a1, class_id)
            .unwrap_err();
        assert!(matches!(err, BookingError::Forbidden(r) if r == role), "{:?}", err);
    }
    assert_eq!(gym.appointment_status(a1), AppointmentStatus::Booked);
    assert_eq!(gym.class(class_id).booked, 1);
}

#[test]
fn completed_class_keeps_its_bookings() {
    let gym = gym();
    let class_id = gym.add_class(3);
    let a1 = gym.service.book(&member(10), class_id).unwrap();
    gym.service.complete_class(&ADMIN, class_id).unwrap();

    let err = gym.service.cancel(&member(10), a1, class_id).unwrap_err();
    assert!(matches!(err, BookingError::ClassUnavailable), "{:?}", err);
    assert_eq!(gym.appointment_status(a1), AppointmentStatus::Booked);
    assert_eq!(gym.class(class_id).booked, 1);
    gym.assert_counter_consistent(class_id);
}

#[test]
fn failure_mid_transaction_leaves_no_trace() {
    let gym = gym();
    let class_id = gym.add_class(5);
    gym.service.book(&member(10), class_id).unwrap();

    // the appointment insert succeeds, then the counter update aborts
    let mut conn = gym.pool.get().unwrap();
    conn.batch_execute(
        "CREATE TRIGGER fail_counter BEFORE UPDATE OF booked ON classes
         BEGIN SELECT RAISE(ABORT, 'forced failure'); END;",
    )
    .unwrap();

    let err = gym.service.book(&member(11), class_id).unwrap_err();
    assert!(err.is_transient(), "{:?}", err);

    assert_eq!(gym.class(class_id).booked, 1);
    assert_eq!(gym.count_appointments(class_id, AppointmentStatus::Booked), 1);

    conn.batch_execute("DROP TRIGGER fail_counter").unwrap();
    gym.service.book(&member(11), class_id).unwrap();
    assert_eq!(gym.class(class_id).booked, 2);
    gym.assert_counter_consistent(class_id);
}

#[test]
fn failed_cancel_keeps_the_booking() {
    let gym = gym();
    let class_id = gym.add_class(5);
    let a1 = gym.service.book(&member(10), class_id).unwrap();

    let mut conn = gym.pool.get().unwrap();
    conn.batch_execute(
        "CREATE TRIGGER fail_counter BEFORE UPDATE OF booked ON classes
         BEGIN SELECT RAISE(ABORT, 'forced failure'); END;",
    )
    .unwrap();

    let err = gym.service.cancel(&member(10), a1, class_id).unwrap_err();
    assert!(err.is_transient(), "{:?}", err);
    assert_eq!(gym.appointment_status(a1), AppointmentStatus::Booked);
    assert_eq!(gym.class(class_id).booked, 1);
}

#[test]
fn remaining_capacity_is_advisory() {
    let gym = gym();
    let class_id = gym.add_class(3);
    assert_eq!(gym.service.remaining_capacity(class_id).unwrap(), 3);

    gym.service.book(&member(10), class_id).unwrap();
    gym.service.book(&member(11), class_id).unwrap();
    assert_eq!(gym.service.remaining_capacity(class_id).unwrap(), 1);

    gym.service.cancel_class(&ADMIN, class_id).unwrap();
    assert_eq!(gym.service.remaining_capacity(class_id).unwrap(), 0);

    let err = gym.service.remaining_capacity(777).unwrap_err();
    assert!(matches!(err, BookingError::ClassUnavailable), "{:?}", err);
}
