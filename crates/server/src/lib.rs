//! Gatehouse HTTP Server
//!
//! Cookie-gated authentication demo over actix-web. All routing,
//! rendering, and cookie plumbing lives here; the authentication
//! semantics live in `gatehouse-auth`.
//!
//! ## Submodules
//!
//! - [`handlers`] — One handler per route
//! - [`pages`] — Inline HTML rendering
//! - [`visitor`] — Session-cookie extractor

pub mod handlers;
pub mod pages;
pub mod visitor;

pub use visitor::Visitor;

use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use gatehouse_auth::Roster;
use gatehouse_auth::Sessions;

/// Route table, shared between the real server and the tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/login", web::get().to(handlers::login_form))
        .route("/login", web::post().to(handlers::login))
        .route("/signup", web::get().to(handlers::signup_form))
        .route("/signup", web::post().to(handlers::signup))
        .route("/landing", web::get().to(handlers::landing))
        .route("/logout", web::get().to(handlers::logout));
}

pub async fn run() -> Result<(), std::io::Error> {
    let roster = web::Data::new(Roster::seeded().await.expect("seed demo accounts"));
    let sessions = web::Data::new(Sessions::new());
    let addr = gatehouse_core::bind_addr();
    log::info!("serving at http://{}", addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .app_data(roster.clone())
            .app_data(sessions.clone())
            .configure(routes)
    })
    .bind(addr)?
    .run()
    .await
}
