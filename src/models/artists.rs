use crate::schema::artists;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "artists"]
pub struct ArtistData {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<ArtistData> for crate::schedule::Artist {
    fn from(data: ArtistData) -> Self {
        Self {
            id: data.id,
            name: data.name,
        }
    }
}
