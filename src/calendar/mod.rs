mod requests;
mod responses;

use crate::{
    appointments::{load_day_schedule, to_item},
    config::Config,
    directory::load_chairs,
    schedule::{
        availability::{chair_slots, is_hour_free},
        layout::project,
        studio::{studio_slots, STUDIO_OPEN_HOURS},
        Appointment, ScheduleError,
    },
    session::get_optional_session,
    utils::parse_date_str,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(studio_slots_view)
        .service(chair_slots_view)
        .service(day_grid)
        .service(day_summary);
}

crate::post_funcs! {
    (studio_slots_view, "/studio_slots", StudioSlotsRequest, StudioSlotsResponse),
    (chair_slots_view, "/chair_slots", ChairSlotsRequest, ChairSlotsResponse),
    (day_grid, "/day_grid", DayGridRequest, DayGridResponse),
    (day_summary, "/day_summary", DaySummaryRequest, DaySummaryResponse),
}

fn day_revenue(appointments: &[Appointment]) -> f64 {
    appointments.iter().filter_map(|a| a.price).sum()
}

async fn load_appointments(
    pool: &web::Data<DbPool>,
    day: chrono::NaiveDate,
) -> anyhow::Result<Vec<Appointment>> {
    Ok(load_day_schedule(pool, day)
        .await?
        .into_iter()
        .map(|(appo, _)| appo)
        .collect())
}

async fn studio_slots_view_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<StudioSlotsRequest>,
) -> anyhow::Result<StudioSlotsResponse> {
    let day = parse_date_str(&info.date)?;
    let appointments = load_appointments(&pool, day).await?;

    let capacity = config.studio_capacity;
    Ok(StudioSlotsResponse {
        success: true,
        capacity,
        slots: studio_slots(day, STUDIO_OPEN_HOURS, &appointments, capacity),
        ..Default::default()
    })
}

async fn chair_slots_view_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<ChairSlotsRequest>,
) -> anyhow::Result<ChairSlotsResponse> {
    let day = parse_date_str(&info.date)?;
    let chairs = load_chairs(&pool).await?;
    let appointments = load_appointments(&pool, day).await?;

    let chairs = chairs
        .into_iter()
        .filter(|chair| info.chair_id.map_or(true, |id| chair.id == id))
        .map(|chair| {
            let slots = chair_slots(day, &chair, &appointments)
                .into_iter()
                .map(|slot| ChairSlotItem {
                    hour: slot.hour,
                    occupant_count: slot.occupant_count,
                    capacity: slot.capacity,
                    free: is_hour_free(day, &chair, slot.hour, &appointments),
                })
                .collect();
            ChairSlotsItem {
                chair_id: chair.id,
                name: chair.name,
                slots,
            }
        })
        .collect();

    Ok(ChairSlotsResponse {
        success: true,
        chairs,
        ..Default::default()
    })
}

/// Request overrides fall back to the configured grid.
fn grid_scale(
    window_start_hour: Option<u32>,
    pixels_per_hour: Option<f64>,
    config: &Config,
) -> anyhow::Result<(u32, f64)> {
    let window_start_hour = window_start_hour.unwrap_or(config.grid_window_start_hour);
    if window_start_hour > 23 {
        return Err(ScheduleError::InvalidHour(window_start_hour).into());
    }
    let pixels_per_hour = match pixels_per_hour {
        Some(pph) if pph.is_finite() && pph > 0.0 => pph,
        Some(_) => anyhow::bail!("Pixels per hour must be a positive number"),
        None => config.grid_pixels_per_hour,
    };
    Ok((window_start_hour, pixels_per_hour))
}

async fn day_grid_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<DayGridRequest>,
) -> anyhow::Result<DayGridResponse> {
    let info = info.into_inner();
    let session = get_optional_session(info.login_token, &pool, &config).await?;
    let day = parse_date_str(&info.date)?;
    let chairs = load_chairs(&pool).await?;
    let appointments = load_day_schedule(&pool, day).await?;

    let (window_start_hour, pixels_per_hour) =
        grid_scale(info.window_start_hour, info.pixels_per_hour, &config)?;
    let mut columns: Vec<GridColumn> = chairs
        .into_iter()
        .map(|chair| GridColumn {
            chair_id: chair.id,
            start_hour: chair.work_start_hour(),
            end_hour: chair.work_end_hour(),
            name: chair.name,
            boxes: Vec::new(),
        })
        .collect();

    for (appo, artist_name) in &appointments {
        let column = match columns.iter_mut().find(|c| c.chair_id == appo.chair_id) {
            Some(column) => column,
            None => continue,
        };
        let grid_box = project(appo.range(), window_start_hour, pixels_per_hour);
        column.boxes.push(GridBoxItem {
            top_offset_px: grid_box.top_offset_px,
            height_px: grid_box.height_px,
            appointment: to_item(appo, artist_name, session.as_ref()),
        });
    }

    Ok(DayGridResponse {
        success: true,
        window_start_hour,
        pixels_per_hour,
        columns,
        ..Default::default()
    })
}

async fn day_summary_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<DaySummaryRequest>,
) -> anyhow::Result<DaySummaryResponse> {
    let info = info.into_inner();
    let session = get_optional_session(info.login_token, &pool, &config).await?;
    let day = parse_date_str(&info.date)?;
    let appointments = load_appointments(&pool, day).await?;

    let staff = session.map_or(false, |s| s.role.is_staff());
    Ok(DaySummaryResponse {
        success: true,
        count: appointments.len(),
        revenue: if staff { Some(day_revenue(&appointments)) } else { None },
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeRange;
    use chrono::{FixedOffset, NaiveDate};

    fn config() -> Config {
        Config {
            database_url: String::new(),
            bind_addr: String::new(),
            studio_capacity: 4,
            studio_offset: FixedOffset::east_opt(0).unwrap(),
            grid_window_start_hour: 8,
            grid_pixels_per_hour: 80.0,
            session_ttl_secs: 3600,
        }
    }

    fn priced(id: &str, price: Option<f64>) -> Appointment {
        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let range = TimeRange::new(
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(11, 0, 0).unwrap(),
        )
        .unwrap();
        let mut appo = Appointment::new(id, 1, "ar", range, "c").unwrap();
        appo.price = price;
        appo
    }

    #[test]
    fn revenue_skips_unpriced_appointments() {
        let appos = vec![
            priced("a", Some(80.0)),
            priced("b", None),
            priced("c", Some(45.5)),
        ];
        assert_eq!(day_revenue(&appos), 125.5);
        assert_eq!(day_revenue(&[]), 0.0);
    }

    #[test]
    fn grid_scale_uses_overrides_and_rejects_bad_ones() {
        assert_eq!(grid_scale(None, None, &config()).unwrap(), (8, 80.0));
        assert_eq!(grid_scale(Some(10), Some(60.0), &config()).unwrap(), (10, 60.0));

        let err = grid_scale(Some(24), None, &config()).unwrap_err();
        assert_eq!(crate::protocol::error_kind(&err), "invalid_hour");
        for pph in [f64::INFINITY, f64::NAN, 0.0, -5.0].iter() {
            assert!(grid_scale(None, Some(*pph), &config()).is_err(), "{}", pph);
        }
    }
}
