#[macro_use]
extern crate diesel;

mod appointments;
mod calendar;
mod config;
mod database;
mod directory;
mod models;
mod protocol;
mod schedule;
mod schema;
mod session;
mod staff;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    enable_tracing();

    let config = Config::from_env().expect("Invalid configuration");
    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url.clone());
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let bind = config.bind_addr.clone();
    tracing::info!(
        bind = %bind,
        capacity = config.studio_capacity,
        offset = %config.studio_offset,
        "starting studio scheduler"
    );

    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .data(pool.clone())
            .app_data(config.clone())
            // sign-in and profiles
            .service(web::scope("/staff").configure(staff::config))
            // chairs and artists
            .service(web::scope("/directory").configure(directory::config))
            // bookings
            .service(web::scope("/appointments").configure(appointments::config))
            // availability views
            .service(web::scope("/calendar").configure(calendar::config))
    })
    .bind(bind)?
    .run()
    .await
}
