use std::{fmt, str::FromStr};

use actix_web::web;
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;
use thiserror::Error;

use crate::{config::Config, database::get_db_conn, DbPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Employee,
    Admin,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
            Role::Other => "other",
        }
    }

    /// Employees and admins see client details and may change bookings.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Employee | Role::Admin)
    }

    /// Sign-up only ever grants employee; admin is assigned out of band.
    pub fn from_preferred(preferred: &str) -> Self {
        if preferred == "employee" {
            Role::Employee
        } else {
            Role::Other
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            "other" => Ok(Role::Other),
            other => anyhow::bail!("Unknown role '{}'", other),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Login has expired")]
    Expired,
    #[error("Not allowed to {0}")]
    Forbidden(&'static str),
}

impl AccessError {
    pub fn kind(&self) -> &'static str {
        match self {
            AccessError::NotSignedIn | AccessError::Expired => "not_signed_in",
            AccessError::Forbidden(_) => "forbidden",
        }
    }
}

/// Identity of the caller, resolved once per request and handed to the
/// code that needs it.
#[derive(Debug, Clone)]
pub struct Session {
    pub profile_id: String,
    pub role: Role,
    pub artist_id: Option<String>,
}

impl Session {
    pub fn require_staff(&self, action: &'static str) -> Result<(), AccessError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AccessError::Forbidden(action))
        }
    }

    pub fn require_admin(&self, action: &'static str) -> Result<(), AccessError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AccessError::Forbidden(action))
        }
    }
}

pub async fn get_session_from_token(
    token: String,
    pool: &web::Data<DbPool>,
    config: &Config,
) -> anyhow::Result<Session> {
    use crate::schema::{profile_logins, profiles};

    let conn = get_db_conn(pool)?;
    let data = web::block(move || {
        profile_logins::table
            .inner_join(profiles::table.on(profiles::id.eq(profile_logins::profile_id)))
            .filter(profile_logins::token.eq(token))
            .order(profile_logins::login_time.desc())
            .limit(1)
            .select((
                profile_logins::login_time,
                profiles::id,
                profiles::role,
                profiles::artist_id,
            ))
            .get_result::<(chrono::NaiveDateTime, String, String, Option<String>)>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    let (login_time, profile_id, role, artist_id) = data.ok_or(AccessError::NotSignedIn)?;
    let time_diff = Utc::now().naive_utc().signed_duration_since(login_time);
    if time_diff.num_seconds() > config.session_ttl_secs {
        return Err(AccessError::Expired.into());
    }

    Ok(Session {
        profile_id,
        role: role.parse()?,
        artist_id,
    })
}

/// Like [`get_session_from_token`], but anonymous callers get `None`.
pub async fn get_optional_session(
    token: Option<String>,
    pool: &web::Data<DbPool>,
    config: &Config,
) -> anyhow::Result<Option<Session>> {
    match token {
        Some(token) if !token.is_empty() => {
            get_session_from_token(token, pool, config).await.map(Some)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            profile_id: "p".to_string(),
            role,
            artist_id: None,
        }
    }

    #[test]
    fn roles_round_trip_through_storage() {
        for role in [Role::Employee, Role::Admin, Role::Other].iter() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn sign_up_never_grants_admin() {
        assert_eq!(Role::from_preferred("employee"), Role::Employee);
        assert_eq!(Role::from_preferred("admin"), Role::Other);
        assert_eq!(Role::from_preferred(""), Role::Other);
    }

    #[test]
    fn staff_and_admin_gates() {
        assert!(session(Role::Employee).require_staff("book").is_ok());
        assert!(session(Role::Admin).require_staff("book").is_ok());
        assert!(matches!(
            session(Role::Other).require_staff("book"),
            Err(AccessError::Forbidden("book"))
        ));
        assert!(session(Role::Employee).require_admin("list profiles").is_err());
        assert!(session(Role::Admin).require_admin("list profiles").is_ok());
    }
}
