//! Caller identity as handed over by the session layer in front of this
//! server, which authenticates the user and forwards who they are in two
//! request headers.

use crate::booking::{Identity, Role};
use actix_web::{dev::Payload, error::ErrorUnauthorized, http::header::HeaderMap, FromRequest, HttpRequest};
use anyhow::{anyhow, Context};
use std::future::{ready, Ready};

pub const MEMBER_ID_HEADER: &str = "x-member-id";
pub const MEMBER_ROLE_HEADER: &str = "x-member-role";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> anyhow::Result<&'a str> {
    headers
        .get(name)
        .ok_or_else(|| anyhow!("missing header {}", name))?
        .to_str()
        .with_context(|| format!("header {} is not valid text", name))
}

pub fn identity_from_headers(headers: &HeaderMap) -> anyhow::Result<Identity> {
    let member_id = header_str(headers, MEMBER_ID_HEADER)?
        .trim()
        .parse::<i64>()
        .context("member id is not a number")?;
    let role = header_str(headers, MEMBER_ROLE_HEADER)?
        .trim()
        .parse::<Role>()?;
    Ok(Identity::new(member_id, role))
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_headers(req.headers()).map_err(ErrorUnauthorized))
    }
}
