use super::identity::Role;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("class is full, not scheduled, or does not exist")]
    ClassUnavailable,
    #[error("you have already booked this class")]
    AlreadyBooked,
    #[error("no active booking found")]
    BookingNotFound,
    #[error("not permitted for role '{0}'")]
    Forbidden(Role),
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("temporary datastore failure, try again")]
    Transient(#[source] BoxError),
}

impl BookingError {
    /// Failures caused by the datastore rather than by the request itself;
    /// the same call may succeed later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<diesel::result::Error> for BookingError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Transient(Box::new(err))
    }
}

impl From<r2d2::Error> for BookingError {
    fn from(err: r2d2::Error) -> Self {
        Self::Transient(Box::new(err))
    }
}
