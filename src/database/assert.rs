use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{database::get_db_conn, DbPool};

pub async fn assert_artist(pool: &web::Data<DbPool>, artist_id: String) -> anyhow::Result<()> {
    use crate::schema::artists;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        artists::table
            .filter(artists::id.eq(artist_id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such artist");
    }

    Ok(())
}

pub async fn assert_chair(pool: &web::Data<DbPool>, chair_id: i32) -> anyhow::Result<()> {
    use crate::schema::chairs;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        chairs::table
            .filter(chairs::id.eq(chair_id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such chair");
    }

    Ok(())
}

pub async fn assert_appoint(pool: &web::Data<DbPool>, id: String) -> anyhow::Result<()> {
    use crate::schema::appointments;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        appointments::table
            .filter(appointments::id.eq(id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such appointment");
    }

    Ok(())
}
