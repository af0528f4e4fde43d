#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:literal, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    service: web::Data<BookingService>,
                    identity: Identity,
                    info: web::Json<$request>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](service, identity, info).await {
                        Ok(response) => response,
                        Err(err) => <$response>::err(err),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Parses an RFC 3339 timestamp (`2026-10-18T09:00:00+02:00` or `...Z`)
/// into naive UTC.
pub fn parse_time_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDateTime> {
    let s = s.as_ref();
    DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Wrong time format '{}'", s))
        .map(|t| t.naive_utc())
}

/// Time window for listings; an open start means "from now", an open end
/// means one year ahead of the start.
pub fn parse_time_pair_str_opt<S1: AsRef<str>, S2: AsRef<str>>(
    start_time: Option<S1>,
    end_time: Option<S2>,
) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    let start_time = match start_time {
        Some(t) => parse_time_str(t).context("Wrong format on 'start_time'")?,
        None => Utc::now().naive_utc(),
    };
    let end_time = match end_time {
        Some(t) => parse_time_str(t).context("Wrong format on 'end_time'")?,
        None => start_time + Duration::days(365),
    };
    if start_time > end_time {
        anyhow::bail!("Invalid time interval");
    }
    Ok((start_time, end_time))
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}
