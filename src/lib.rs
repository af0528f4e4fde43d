pub mod booking;
pub mod config;
pub mod database;
pub mod member;
pub mod models;
pub mod protocol;
pub mod schema;
pub mod session;
pub mod staff;
pub mod utils;

use actix_web::web;
use diesel::{r2d2::ConnectionManager, SqliteConnection};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Mounts every route scope; the caller provides `web::Data<BookingService>`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // member
        .service(web::scope("/member").configure(member::config))
        // trainer / administrator
        .service(web::scope("/staff").configure(staff::config));
}
