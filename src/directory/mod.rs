mod requests;
mod responses;

use std::convert::TryFrom;

use crate::{
    config::Config,
    database::get_db_conn,
    models::{artists::ArtistData, chairs::ChairData},
    schedule::{Artist, Chair},
    session::get_session_from_token,
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_chair)
        .service(search_artist)
        .service(add_artist);
}

crate::post_funcs! {
    (search_chair, "/search_chair", SearchChairRequest, SearchChairResponse),
    (search_artist, "/search_artist", SearchArtistRequest, SearchArtistResponse),
    (add_artist, "/add_artist", AddArtistRequest, AddArtistResponse),
}

/// All chairs ordered by id. A misconfigured chair fails the whole load.
pub async fn load_chairs(pool: &web::Data<DbPool>) -> anyhow::Result<Vec<Chair>> {
    use crate::schema::chairs;

    let conn = get_db_conn(pool)?;
    let rows = web::block(move || {
        chairs::table
            .order(chairs::id.asc())
            .get_results::<ChairData>(&conn)
    })
    .await
    .context("DB error")?;

    rows.into_iter()
        .map(|row| Chair::try_from(row).map_err(anyhow::Error::from))
        .collect()
}

async fn search_chair_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    _info: web::Json<SearchChairRequest>,
) -> anyhow::Result<SearchChairResponse> {
    let chairs = load_chairs(&pool)
        .await?
        .into_iter()
        .map(|chair| SearchChairItem {
            id: chair.id,
            start_hour: chair.work_start_hour(),
            end_hour: chair.work_end_hour(),
            name: chair.name,
        })
        .collect();

    Ok(SearchChairResponse {
        success: true,
        chairs,
        ..Default::default()
    })
}

async fn search_artist_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<SearchArtistRequest>,
) -> anyhow::Result<SearchArtistResponse> {
    use crate::schema::artists;

    let info = info.into_inner();
    let name_pattern = match info.name {
        Some(name) => format!("%{}%", name.trim()),
        None => "%".to_string(),
    };

    let conn = get_db_conn(&pool)?;
    let rows = web::block(move || {
        artists::table
            .filter(artists::name.like(name_pattern))
            .order(artists::name.asc())
            .get_results::<ArtistData>(&conn)
    })
    .await
    .context("DB error")?;

    let artists = rows
        .into_iter()
        .map(Artist::from)
        .map(|artist| SearchArtistItem {
            id: artist.id,
            name: artist.name,
        })
        .collect();

    Ok(SearchArtistResponse {
        success: true,
        artists,
        ..Default::default()
    })
}

async fn add_artist_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<AddArtistRequest>,
) -> anyhow::Result<AddArtistResponse> {
    use crate::schema::artists;

    let info = info.into_inner();
    let session = get_session_from_token(info.login_token, &pool, &config).await?;
    session.require_admin("add artists")?;

    let name = info.name.trim().to_string();
    if name.is_empty() {
        bail!("Artist name is required");
    }

    let id = uuid::Uuid::new_v4().to_string();
    let data = ArtistData {
        id: id.clone(),
        name,
        created_at: Utc::now().naive_utc(),
    };
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::insert_into(artists::table)
            .values(data)
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    tracing::info!(artist = %id, "artist added");
    Ok(AddArtistResponse {
        success: true,
        id,
        ..Default::default()
    })
}
