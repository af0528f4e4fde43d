mod requests;
mod responses;

use crate::{
    booking::{BookingService, ClassQuery, Identity, DEFAULT_PAGE_LIMIT},
    protocol::SimpleResponse,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::Context;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(book)
        .service(cancel)
        .service(remaining)
        .service(search_class)
        .service(search_booking);
}

crate::post_funcs! {
    (book, "/book", BookRequest, BookResponse),
    (cancel, "/cancel", CancelRequest, SimpleResponse),
    (remaining, "/remaining", RemainingRequest, RemainingResponse),
    (search_class, "/search_class", SearchClassRequest, SearchClassResponse),
    (search_booking, "/search_booking", SearchBookingRequest, SearchBookingResponse),
}

async fn book_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<BookRequest>,
) -> anyhow::Result<BookResponse> {
    let class_id = info.into_inner().class_id;
    let appointment_id = web::block(move || service.book(&identity, class_id))
        .await
        .context("Worker pool error")??;

    Ok(BookResponse {
        success: true,
        appointment_id,
        ..Default::default()
    })
}

async fn cancel_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<CancelRequest>,
) -> anyhow::Result<SimpleResponse> {
    let info = info.into_inner();
    web::block(move || service.cancel(&identity, info.appointment_id, info.class_id))
        .await
        .context("Worker pool error")??;

    Ok(SimpleResponse::ok())
}

async fn remaining_impl(
    service: web::Data<BookingService>,
    _identity: Identity,
    info: web::Json<RemainingRequest>,
) -> anyhow::Result<RemainingResponse> {
    let class_id = info.into_inner().class_id;
    let rest = web::block(move || service.remaining_capacity(class_id))
        .await
        .context("Worker pool error")??;

    Ok(RemainingResponse {
        success: true,
        class_id,
        rest,
        ..Default::default()
    })
}

async fn search_class_impl(
    service: web::Data<BookingService>,
    _identity: Identity,
    info: web::Json<SearchClassRequest>,
) -> anyhow::Result<SearchClassResponse> {
    let info = info.into_inner();
    let (from, to) = crate::utils::parse_time_pair_str_opt(info.start_time, info.end_time)?;
    let query = ClassQuery {
        from,
        to,
        first_index: info.first_index.unwrap_or(0),
        limit: info.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    };
    let slots = web::block(move || service.search_classes(&query))
        .await
        .context("Worker pool error")??;

    let classes = slots
        .into_iter()
        .map(|slot| SearchClassItem {
            class_id: slot.class.id,
            name: slot.class.name,
            trainer_id: slot.class.trainer_id,
            schedule: crate::utils::format_time_str(&slot.class.schedule),
            capacity: slot.class.capacity,
            rest: slot.remaining,
        })
        .collect();

    Ok(SearchClassResponse {
        success: true,
        classes,
        ..Default::default()
    })
}

async fn search_booking_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<SearchBookingRequest>,
) -> anyhow::Result<SearchBookingResponse> {
    let info = info.into_inner();
    let first_index = info.first_index.unwrap_or(0);
    let limit = info.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let items = web::block(move || {
        service.member_bookings(&identity, info.status, first_index, limit)
    })
    .await
    .context("Worker pool error")??;

    let bookings = items
        .into_iter()
        .map(|item| SearchBookingItem {
            appointment_id: item.appointment.id,
            class_id: item.class.id,
            class_name: item.class.name,
            schedule: crate::utils::format_time_str(&item.class.schedule),
            class_status: item.class.status.to_string(),
            status: item.appointment.status.to_string(),
            appo_time: crate::utils::format_time_str(&item.appointment.date),
        })
        .collect();

    Ok(SearchBookingResponse {
        success: true,
        bookings,
        ..Default::default()
    })
}
