// main.rs - entry point to run the Users and Orders mock services

use actix_cors::Cors;
use actix_web::{dev::Server, web::Data, App, HttpServer};
use clap::Parser;
use dotenvy::dotenv;
use store::{Order, ResourceStore, TokenService, User};
use tracing::info;
use tracing::subscriber::set_global_default;
use tracing_actix_web::TracingLogger;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

mod auth;
mod config;
mod error;
mod routes;
mod utils;

use config::Args;
use routes::{orders_service, users_service};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Parse CLI args, using ENV vars if not provided
    let args = Args::parse();

    // Adds log tracer as the default tracer for the log crate
    LogTracer::init().expect("Failed to set log tracer");
    // Set log level based on env variable
    let env_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("Failed to build log filter");
    let fmt_layer = fmt::layer().with_target(false);
    let subscriber = Registry::default().with(env_layer).with(fmt_layer);
    set_global_default(subscriber).expect("Failed to set global default subscriber");

    let mut servers = Vec::new();
    if args.service.runs_users() {
        servers.push(users_server(&args)?);
    }
    if args.service.runs_orders() {
        servers.push(orders_server(&args)?);
    }

    // Either server stopping ends the process
    futures::future::try_join_all(servers).await?;
    Ok(())
}

fn users_server(args: &Args) -> std::io::Result<Server> {
    let tokens = Data::new(TokenService::new(args.token_settings()));
    let users = Data::new(ResourceStore::<User>::new());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(tokens.clone())
            .app_data(users.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(users_service)
    })
    .bind((args.host.as_str(), args.users_port))?
    .run();

    info!(
        "Service A (Users) running at http://{}:{}",
        args.host, args.users_port
    );
    Ok(server)
}

fn orders_server(args: &Args) -> std::io::Result<Server> {
    let tokens = Data::new(TokenService::new(args.token_settings()));
    let orders = Data::new(ResourceStore::<Order>::new());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(tokens.clone())
            .app_data(orders.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(orders_service)
    })
    .bind((args.host.as_str(), args.orders_port))?
    .run();

    info!(
        "Service B (Orders) running at http://{}:{}",
        args.host, args.orders_port
    );
    Ok(server)
}
