use crate::schema::profile_logins;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "profile_logins"]
pub struct ProfileLoginData {
    pub token: String,
    pub profile_id: String,
    pub login_time: NaiveDateTime,
}
