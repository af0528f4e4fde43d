use crate::booking::BookingError;
use serde::Serialize;

/// Body of every endpoint that only reports an outcome. Failed requests
/// still answer 200 with `success: false`, a readable `err` and a stable
/// `code` the front end can switch on.
#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
    pub code: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }
}

pub fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<BookingError>() {
        Some(BookingError::ClassUnavailable) => "class_unavailable",
        Some(BookingError::AlreadyBooked) => "already_booked",
        Some(BookingError::BookingNotFound) => "booking_not_found",
        Some(BookingError::Forbidden(_)) => "forbidden",
        Some(BookingError::Invalid(_)) => "invalid",
        Some(BookingError::Transient(_)) => "transient",
        None => "bad_request",
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err(err: anyhow::Error) -> Self {
                    Self {
                        success: false,
                        code: $crate::protocol::error_code(&err).to_string(),
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}
