table! {
    appointments (id) {
        id -> Char,
        chair_id -> Integer,
        artist_id -> Char,
        client_name -> Varchar,
        start_time -> Datetime,
        end_time -> Datetime,
        service -> Nullable<Varchar>,
        price -> Nullable<Double>,
        description -> Nullable<Varchar>,
        color -> Nullable<Char>,
        created_at -> Datetime,
    }
}

table! {
    artists (id) {
        id -> Char,
        name -> Varchar,
        created_at -> Datetime,
    }
}

table! {
    chairs (id) {
        id -> Integer,
        name -> Varchar,
        start_hour -> Integer,
        end_hour -> Integer,
    }
}

table! {
    profile_logins (token, profile_id, login_time) {
        token -> Char,
        profile_id -> Char,
        login_time -> Datetime,
    }
}

table! {
    profiles (id) {
        id -> Char,
        email -> Varchar,
        password -> Char,
        display_name -> Nullable<Varchar>,
        artist_id -> Nullable<Char>,
        role -> Char,
    }
}

allow_tables_to_appear_in_same_query!(
    appointments,
    artists,
    chairs,
    profile_logins,
    profiles,
);
