mod requests;
mod responses;

use crate::{
    booking::{BookingService, Identity, NewClassRequest},
    protocol::SimpleResponse,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::Context;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_class)
        .service(cancel_class)
        .service(complete_class)
        .service(mark_attendance)
        .service(search_roster);
}

crate::post_funcs! {
    (add_class, "/add_class", AddClassRequest, AddClassResponse),
    (cancel_class, "/cancel_class", ClassRequest, CancelClassResponse),
    (complete_class, "/complete_class", ClassRequest, SimpleResponse),
    (mark_attendance, "/mark_attendance", MarkAttendanceRequest, MarkAttendanceResponse),
    (search_roster, "/search_roster", ClassRequest, SearchRosterResponse),
}

async fn add_class_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<AddClassRequest>,
) -> anyhow::Result<AddClassResponse> {
    let info = info.into_inner();
    let schedule =
        crate::utils::parse_time_str(&info.schedule).context("Wrong format on 'schedule'")?;
    let req = NewClassRequest {
        name: info.name,
        capacity: info.capacity,
        schedule,
        trainer_id: info.trainer_id,
    };
    let class_id = web::block(move || service.schedule_class(&identity, req))
        .await
        .context("Worker pool error")??;

    Ok(AddClassResponse {
        success: true,
        class_id,
        ..Default::default()
    })
}

async fn cancel_class_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<ClassRequest>,
) -> anyhow::Result<CancelClassResponse> {
    let class_id = info.into_inner().class_id;
    let released = web::block(move || service.cancel_class(&identity, class_id))
        .await
        .context("Worker pool error")??;

    Ok(CancelClassResponse {
        success: true,
        released,
        ..Default::default()
    })
}

async fn complete_class_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<ClassRequest>,
) -> anyhow::Result<SimpleResponse> {
    let class_id = info.into_inner().class_id;
    web::block(move || service.complete_class(&identity, class_id))
        .await
        .context("Worker pool error")??;

    Ok(SimpleResponse::ok())
}

async fn mark_attendance_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<MarkAttendanceRequest>,
) -> anyhow::Result<MarkAttendanceResponse> {
    let info = info.into_inner();
    let status = web::block(move || {
        service.mark_attendance(&identity, info.appointment_id, info.attended)
    })
    .await
    .context("Worker pool error")??;

    Ok(MarkAttendanceResponse {
        success: true,
        status: status.to_string(),
        ..Default::default()
    })
}

async fn search_roster_impl(
    service: web::Data<BookingService>,
    identity: Identity,
    info: web::Json<ClassRequest>,
) -> anyhow::Result<SearchRosterResponse> {
    let class_id = info.into_inner().class_id;
    let roster = web::block(move || service.class_roster(&identity, class_id))
        .await
        .context("Worker pool error")??;

    let appointments = roster
        .into_iter()
        .map(|appo| SearchRosterItem {
            appointment_id: appo.id,
            member_id: appo.user_id,
            status: appo.status.to_string(),
            appo_time: crate::utils::format_time_str(&appo.date),
        })
        .collect();

    Ok(SearchRosterResponse {
        success: true,
        appointments,
        ..Default::default()
    })
}
