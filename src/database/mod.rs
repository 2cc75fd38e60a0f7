pub mod assert;

use crate::DbPool;
use actix_web::{error::BlockingError, web};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

pub fn get_db_conn(
    pool: &web::Data<DbPool>,
) -> anyhow::Result<PooledConnection<ConnectionManager<MysqlConnection>>> {
    pool.get().context("DB connection")
}

/// Runs a blocking DB closure, keeping its own error intact so typed
/// failures (e.g. a chair conflict) can still be classified.
pub async fn blocking<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.map_err(|err| match err {
        BlockingError::Error(err) => err,
        BlockingError::Canceled => anyhow::anyhow!("DB task canceled"),
    })
}
