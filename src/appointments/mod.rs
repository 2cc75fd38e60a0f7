mod requests;
mod responses;

use std::convert::TryFrom;

use crate::{
    config::Config,
    database::{assert, blocking, get_db_conn},
    models::{
        appointments::{to_appointment, to_schedule, AppointmentData, UpdateAppointment},
        chairs::ChairData,
    },
    protocol::SimpleResponse,
    schedule::{
        booking::{artist_overlaps, validate_booking, Proposal},
        Appointment, Chair, Color, ScheduleError, TimeRange,
    },
    session::{get_optional_session, get_session_from_token, Session},
    utils::{day_bounds, format_time_str, parse_date_str},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub use self::responses::AppointItem;

pub const REDACTED_CLIENT: &str = "Booked";

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_day)
        .service(view)
        .service(check)
        .service(appoint)
        .service(modify)
        .service(cancel);
}

crate::post_funcs! {
    (search_day, "/search_day", SearchDayRequest, SearchDayResponse),
    (view, "/view", ViewAppointRequest, ViewAppointResponse),
    (check, "/check", CheckAppointRequest, CheckAppointResponse),
    (appoint, "/appoint", AppointRequest, AppointResponse),
    (modify, "/modify", ModifyAppointRequest, SimpleResponse),
    (cancel, "/cancel", CancelAppointRequest, SimpleResponse),
}

/// Appointments starting on `day`, ordered by start, with artist names.
pub async fn load_day(
    pool: &web::Data<DbPool>,
    day: NaiveDate,
) -> anyhow::Result<Vec<(AppointmentData, String)>> {
    use crate::schema::{appointments, artists};

    let (start, end) = day_bounds(day)?;
    let conn = get_db_conn(pool)?;
    web::block(move || {
        appointments::table
            .inner_join(artists::table.on(appointments::artist_id.eq(artists::id)))
            .filter(appointments::start_time.ge(start))
            .filter(appointments::start_time.lt(end))
            .order(appointments::start_time.asc())
            .select((appointments::all_columns, artists::name))
            .get_results::<(AppointmentData, String)>(&conn)
    })
    .await
    .context("DB error")
}

/// [`load_day`] converted to schedule appointments.
pub async fn load_day_schedule(
    pool: &web::Data<DbPool>,
    day: NaiveDate,
) -> anyhow::Result<Vec<(Appointment, String)>> {
    Ok(load_day(pool, day)
        .await?
        .iter()
        .filter_map(|(data, artist_name)| Some((to_appointment(data)?, artist_name.clone())))
        .collect())
}

/// Client details are only shown to staff; everyone else sees that the
/// slot is taken.
pub fn to_item(appo: &Appointment, artist_name: &str, session: Option<&Session>) -> AppointItem {
    let staff = session.map_or(false, |s| s.role.is_staff());
    let details = |field: &Option<String>| field.clone().filter(|_| staff);
    AppointItem {
        id: appo.id.clone(),
        chair_id: appo.chair_id,
        artist_id: appo.artist_id.clone(),
        artist_name: artist_name.to_string(),
        client_name: if staff {
            appo.client_name.clone()
        } else {
            REDACTED_CLIENT.to_string()
        },
        service: details(&appo.service),
        price: appo.price.filter(|_| staff),
        description: details(&appo.description),
        color: appo.display_color().to_string(),
        start_time: format_time_str(&appo.range().start()),
        end_time: format_time_str(&appo.range().end()),
    }
}

struct BookingDetails {
    chair_id: i32,
    artist_id: String,
    client_name: String,
    range: TimeRange,
    service: Option<String>,
    price: Option<f64>,
    description: Option<String>,
    color: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn booking_details(info: AppointRequest, config: &Config) -> anyhow::Result<BookingDetails> {
    let range = info.when.to_range(&config.studio_offset)?;
    if !range.is_single_day() {
        return Err(ScheduleError::MultiDay.into());
    }
    let client_name = info.client_name.trim().to_string();
    if client_name.is_empty() {
        bail!("Client name is required");
    }
    if let Some(price) = info.price {
        if !price.is_finite() || price < 0.0 {
            bail!("Price must not be negative");
        }
    }
    let color = match non_empty(info.color) {
        Some(c) => Some(c.parse::<Color>()?.to_string()),
        None => None,
    };
    Ok(BookingDetails {
        chair_id: info.chair_id,
        artist_id: info.artist_id,
        client_name,
        range,
        service: non_empty(info.service),
        price: info.price,
        description: non_empty(info.description),
        color,
    })
}

/// The authoritative check: locks the chair row, re-reads overlapping
/// bookings and validates again, so two concurrent bookers cannot both win.
fn lock_and_validate(
    conn: &MysqlConnection,
    proposal: &Proposal,
) -> anyhow::Result<()> {
    use crate::schema::{appointments, chairs};

    let chair = chairs::table
        .find(proposal.chair_id)
        .for_update()
        .get_result::<ChairData>(conn)
        .optional()
        .context("DB error")?;
    let chair = match chair {
        Some(chair) => Chair::try_from(chair)?,
        None => bail!("No such chair"),
    };

    let rows = appointments::table
        .filter(appointments::chair_id.eq(proposal.chair_id))
        .filter(appointments::start_time.lt(proposal.range.end()))
        .filter(appointments::end_time.gt(proposal.range.start()))
        .get_results::<AppointmentData>(conn)
        .context("DB error")?;

    let verdict = validate_booking(&chair, proposal, &to_schedule(&rows))
        .and_then(|_| stored_conflict(proposal, &rows));
    if let Err(err) = verdict {
        tracing::warn!(chair = proposal.chair_id, range = %proposal.range, error = %err, "booking rejected at commit");
        return Err(err.into());
    }
    Ok(())
}

/// Checks the raw rows, so a stored booking that does not convert into an
/// `Appointment` still blocks the chair.
fn stored_conflict(proposal: &Proposal, rows: &[AppointmentData]) -> Result<(), ScheduleError> {
    let conflict = rows
        .iter()
        .filter(|row| row.chair_id == proposal.chair_id)
        .filter(|row| proposal.replacing.as_deref() != Some(row.id.as_str()))
        .find(|row| {
            row.start_time < proposal.range.end() && proposal.range.start() < row.end_time
        });
    match conflict {
        Some(row) => Err(ScheduleError::ChairConflict {
            chair_id: proposal.chair_id,
            appointment_id: row.id.clone(),
        }),
        None => Ok(()),
    }
}

async fn search_day_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<SearchDayRequest>,
) -> anyhow::Result<SearchDayResponse> {
    let info = info.into_inner();
    let session = get_optional_session(info.login_token, &pool, &config).await?;
    let day = parse_date_str(&info.date)?;

    let chair_id = info.chair_id;
    let appointments = load_day_schedule(&pool, day)
        .await?
        .iter()
        .filter(|(appo, _)| chair_id.map_or(true, |id| appo.chair_id == id))
        .map(|(appo, artist_name)| to_item(appo, artist_name, session.as_ref()))
        .collect();

    Ok(SearchDayResponse {
        success: true,
        appointments,
        ..Default::default()
    })
}

async fn view_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<ViewAppointRequest>,
) -> anyhow::Result<ViewAppointResponse> {
    use crate::schema::{appointments, artists};

    let info = info.into_inner();
    let session = get_optional_session(info.login_token, &pool, &config).await?;

    let conn = get_db_conn(&pool)?;
    let id = info.id;
    let row = web::block(move || {
        appointments::table
            .inner_join(artists::table.on(appointments::artist_id.eq(artists::id)))
            .filter(appointments::id.eq(id))
            .select((appointments::all_columns, artists::name))
            .get_result::<(AppointmentData, String)>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    let (data, artist_name) = match row {
        Some(row) => row,
        None => bail!("No such appointment"),
    };

    let appo = Appointment::try_from(&data)?;
    Ok(ViewAppointResponse {
        success: true,
        appointment: Some(to_item(&appo, &artist_name, session.as_ref())),
        ..Default::default()
    })
}

/// Advisory preflight. It reads a snapshot without locking, so a later
/// `appoint` may still be rejected.
async fn check_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<CheckAppointRequest>,
) -> anyhow::Result<CheckAppointResponse> {
    let info = info.into_inner();
    let session = get_optional_session(info.login_token, &pool, &config).await?;
    if info.replacing.is_some() {
        match &session {
            Some(session) => session.require_staff("edit appointments")?,
            None => return Err(crate::session::AccessError::NotSignedIn.into()),
        }
    }

    let range = info.when.to_range(&config.studio_offset)?;
    let chairs = crate::directory::load_chairs(&pool).await?;
    let chair_id = info.chair_id;
    let chair = match chairs.iter().find(|chair| chair.id == chair_id) {
        Some(chair) => chair,
        None => bail!("No such chair"),
    };

    let existing: Vec<_> = load_day_schedule(&pool, range.day())
        .await?
        .into_iter()
        .map(|(appo, _)| appo)
        .collect();

    let mut proposal = Proposal::new(info.chair_id, range);
    proposal.replacing = info.replacing.clone();
    validate_booking(chair, &proposal, &existing)?;

    // fall back to the artist linked to the caller's profile
    let artist_id = info
        .artist_id
        .clone()
        .or_else(|| session.as_ref().and_then(|s| s.artist_id.clone()));
    let artist_overlaps = match &artist_id {
        Some(artist_id) => artist_overlaps(artist_id, &range, &existing, info.replacing.as_deref())
            .into_iter()
            .map(|a| a.id.clone())
            .collect(),
        None => Vec::new(),
    };

    Ok(CheckAppointResponse {
        success: true,
        artist_overlaps,
        ..Default::default()
    })
}

async fn appoint_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<AppointRequest>,
) -> anyhow::Result<AppointResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    let session = get_session_from_token(info.login_token.clone(), &pool, &config).await?;
    session.require_staff("book appointments")?;

    let details = booking_details(info, &config)?;
    assert::assert_artist(&pool, details.artist_id.clone()).await?;
    assert::assert_chair(&pool, details.chair_id).await?;

    let id = uuid::Uuid::new_v4().to_string();
    let data = AppointmentData {
        id: id.clone(),
        chair_id: details.chair_id,
        artist_id: details.artist_id,
        client_name: details.client_name,
        start_time: details.range.start(),
        end_time: details.range.end(),
        service: details.service,
        price: details.price,
        description: details.description,
        color: details.color,
        created_at: Utc::now().naive_utc(),
    };
    let proposal = Proposal::new(details.chair_id, details.range);

    let conn = get_db_conn(&pool)?;
    blocking(move || {
        conn.transaction(|| {
            lock_and_validate(&conn, &proposal)?;
            diesel::insert_into(appointments::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    tracing::info!(appointment = %id, chair = details.chair_id, range = %details.range, "appointment booked");
    Ok(AppointResponse {
        success: true,
        id,
        ..Default::default()
    })
}

async fn modify_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<ModifyAppointRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    let session = get_session_from_token(info.appoint.login_token.clone(), &pool, &config).await?;
    session.require_staff("edit appointments")?;

    let id = info.id;
    assert::assert_appoint(&pool, id.clone()).await?;
    let details = booking_details(info.appoint, &config)?;
    assert::assert_artist(&pool, details.artist_id.clone()).await?;

    let data = UpdateAppointment {
        chair_id: details.chair_id,
        artist_id: details.artist_id,
        client_name: details.client_name,
        start_time: details.range.start(),
        end_time: details.range.end(),
        service: details.service,
        price: details.price,
        description: details.description,
        color: details.color,
    };
    let proposal = Proposal::new(details.chair_id, details.range).replacing(id.clone());

    let conn = get_db_conn(&pool)?;
    let appointment_id = id.clone();
    blocking(move || {
        conn.transaction(|| {
            lock_and_validate(&conn, &proposal)?;
            diesel::update(appointments::table.filter(appointments::id.eq(&appointment_id)))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    tracing::info!(appointment = %id, chair = details.chair_id, range = %details.range, "appointment modified");
    Ok(SimpleResponse::ok())
}

async fn cancel_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<CancelAppointRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    let session = get_session_from_token(info.login_token, &pool, &config).await?;
    session.require_staff("cancel appointments")?;

    let conn = get_db_conn(&pool)?;
    let id = info.id;
    let appointment_id = id.clone();
    let res = web::block(move || {
        diesel::delete(appointments::table.filter(appointments::id.eq(appointment_id))).execute(&conn)
    })
    .await
    .context("DB error")?;
    if res == 0 {
        bail!("No such appointment");
    }

    tracing::info!(appointment = %id, "appointment cancelled");
    Ok(SimpleResponse::ok())
}
