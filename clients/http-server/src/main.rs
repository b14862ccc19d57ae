use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web, App, HttpServer,
};
use clap::Parser;
use database::{
    consts::consts::{COLLECTION_NAME, DATABASE_NAME},
    service::PersonService,
    store::MongoStore,
};
use std::{io, sync::Arc};

use crate::auth::Credentials;

mod auth;
mod error;
mod openapi;
mod routes;

/// 📀 Persons API, a basic-auth protected CRUD service over a document store
#[derive(Parser)]
struct Cli {
    /// Connection string of the document store
    #[clap(long, env = "MDB_CONN_STR", hide_env_values = true)]
    mongo_uri: String,

    /// Username every request must present
    #[clap(long, env = "API_USER")]
    api_user: String,

    /// Password every request must present
    #[clap(long, env = "API_PASSWORD", hide_env_values = true)]
    api_password: String,

    /// Database holding the person collection
    #[clap(long, default_value = DATABASE_NAME)]
    database: String,

    /// Collection persons are stored in
    #[clap(long, default_value = COLLECTION_NAME)]
    collection: String,

    /// Port the http server will run on
    #[clap(short, long, default_value = "8000")]
    port: u16,

    /// Address the http server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Logs every http request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let store = MongoStore::connect(&args.mongo_uri, &args.database, &args.collection)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let service = web::Data::new(PersonService::new(Arc::new(store)));
    let credentials = web::Data::new(Credentials::new(args.api_user, args.api_password));

    log::info!("starting HTTP server on {}:{}.", args.address, args.port);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(credentials.clone())
            .configure(openapi::configure)
            .configure(routes::configure)
            .wrap(Cors::permissive())
            .wrap(Condition::new(args.log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await
}
