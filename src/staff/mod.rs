mod requests;
mod responses;

use crate::{
    config::Config,
    database::{assert, blocking, get_db_conn},
    models::{
        profile_logins::ProfileLoginData,
        profiles::{ProfileData, UpdateProfile},
    },
    protocol::SimpleResponse,
    session::{get_session_from_token, Role},
    utils::{check_email, check_password, hash_password},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(view_profile)
        .service(modify_profile)
        .service(modify_password)
        .service(search_profile);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, SimpleResponse),
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (view_profile, "/view_profile", ViewProfileRequest, ViewProfileResponse),
    (modify_profile, "/modify_profile", ModifyProfileRequest, SimpleResponse),
    (modify_password, "/modify_password", ModifyPasswordRequest, SimpleResponse),
    (search_profile, "/search_profile", SearchProfileRequest, SearchProfileResponse),
}

fn profile_with_artist(
    id: String,
    conn: &MysqlConnection,
) -> QueryResult<(ProfileData, Option<String>)> {
    use crate::schema::{artists, profiles};

    profiles::table
        .left_join(artists::table.on(profiles::artist_id.eq(artists::id.nullable())))
        .filter(profiles::id.eq(id))
        .select((profiles::all_columns, artists::name.nullable()))
        .get_result::<(ProfileData, Option<String>)>(conn)
}

async fn register_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<RegisterRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::profiles;

    let info = info.into_inner();
    let email = info.email.trim().to_lowercase();
    check_email(&email)?;
    check_password(&info.password)?;

    let conn = get_db_conn(&pool)?;
    let role = Role::from_preferred(info.preferred_role.trim());
    blocking(move || {
        conn.transaction(|| {
            let res = profiles::table
                .filter(profiles::email.eq(&email))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res > 0 {
                bail!("Email already registered");
            }

            let data = ProfileData {
                id: uuid::Uuid::new_v4().to_string(),
                email,
                password: hash_password(&info.password),
                display_name: info
                    .display_name
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty()),
                artist_id: None,
                role: role.as_str().to_string(),
            };
            diesel::insert_into(profiles::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    tracing::info!(role = %role, "profile registered");
    Ok(SimpleResponse::ok())
}

async fn login_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    use crate::schema::{profile_logins, profiles};

    let info = info.into_inner();
    let email = info.email.trim().to_lowercase();

    let conn = get_db_conn(&pool)?;
    let (login_token, role) = blocking(move || {
        conn.transaction(|| {
            let profile = profiles::table
                .filter(profiles::email.eq(&email))
                .filter(profiles::password.eq(hash_password(&info.password)))
                .get_result::<ProfileData>(&conn)
                .optional()
                .context("DB error")?;
            let profile = match profile {
                Some(profile) => profile,
                None => bail!("Wrong email or password"),
            };

            let now = Utc::now().naive_utc();
            let seed = format!("{}{}", profile.id, now.format("%s%.f"));
            let login_token = format!("{:x}", Blake2b::digest(seed.as_bytes()));
            let token_data = ProfileLoginData {
                token: login_token.clone(),
                profile_id: profile.id,
                login_time: now,
            };
            diesel::insert_into(profile_logins::table)
                .values(token_data)
                .execute(&conn)
                .context("DB error")?;

            Ok((login_token, profile.role))
        })
    })
    .await?;

    tracing::info!(role = %role, "signed in");
    Ok(LoginResponse {
        success: true,
        login_token,
        role,
        ..Default::default()
    })
}

async fn logout_impl(
    pool: web::Data<DbPool>,
    _config: web::Data<Config>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::profile_logins;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::delete(profile_logins::table.filter(profile_logins::token.eq(info.login_token)))
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn view_profile_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<ViewProfileRequest>,
) -> anyhow::Result<ViewProfileResponse> {
    let info = info.into_inner();
    let session = get_session_from_token(info.login_token, &pool, &config).await?;

    let conn = get_db_conn(&pool)?;
    let (profile, artist_name) = web::block(move || profile_with_artist(session.profile_id, &conn))
        .await
        .context("DB error")?;

    Ok(ViewProfileResponse {
        success: true,
        id: profile.id,
        email: profile.email,
        display_name: profile.display_name.unwrap_or_default(),
        role: profile.role,
        artist_id: profile.artist_id.unwrap_or_default(),
        artist_name: artist_name.unwrap_or_default(),
        ..Default::default()
    })
}

async fn modify_profile_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<ModifyProfileRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::profiles;

    let info = info.into_inner();
    let session = get_session_from_token(info.login_token, &pool, &config).await?;

    let artist_id = match info.artist_id.map(|id| id.trim().to_string()) {
        Some(id) if id.is_empty() => Some(None),
        Some(id) => {
            assert::assert_artist(&pool, id.clone()).await?;
            Some(Some(id))
        }
        None => None,
    };
    let data = UpdateProfile {
        display_name: info
            .display_name
            .map(|name| Some(name.trim().to_string()).filter(|name| !name.is_empty())),
        artist_id,
    };
    if data.display_name.is_none() && data.artist_id.is_none() {
        return Ok(SimpleResponse::ok());
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::update(profiles::table.filter(profiles::id.eq(session.profile_id)))
            .set(&data)
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn modify_password_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<ModifyPasswordRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::profiles;

    let info = info.into_inner();
    let session = get_session_from_token(info.login_token.clone(), &pool, &config).await?;
    check_password(&info.password_new)?;

    let conn = get_db_conn(&pool)?;
    blocking(move || {
        conn.transaction(|| {
            let res = profiles::table
                .filter(profiles::id.eq(&session.profile_id))
                .filter(profiles::password.eq(hash_password(&info.password_old)))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if res != 1 {
                bail!("Wrong password");
            }

            diesel::update(profiles::table.filter(profiles::id.eq(&session.profile_id)))
                .set(profiles::password.eq(hash_password(&info.password_new)))
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn search_profile_impl(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    info: web::Json<SearchProfileRequest>,
) -> anyhow::Result<SearchProfileResponse> {
    use crate::schema::{artists, profiles};

    let info = info.into_inner();
    let session = get_session_from_token(info.login_token, &pool, &config).await?;
    session.require_admin("list profiles")?;

    let conn = get_db_conn(&pool)?;
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(30).max(0);
    let rows = web::block(move || {
        profiles::table
            .left_join(artists::table.on(profiles::artist_id.eq(artists::id.nullable())))
            .select((profiles::all_columns, artists::name.nullable()))
            .order(profiles::email.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<(ProfileData, Option<String>)>(&conn)
    })
    .await
    .context("DB error")?;

    let profiles = rows
        .into_iter()
        .map(|(profile, artist_name)| SearchProfileItem {
            id: profile.id,
            email: profile.email,
            display_name: profile.display_name.unwrap_or_default(),
            role: profile.role,
            artist_id: profile.artist_id.unwrap_or_default(),
            artist_name: artist_name.unwrap_or_default(),
        })
        .collect();

    Ok(SearchProfileResponse {
        success: true,
        profiles,
        ..Default::default()
    })
}
