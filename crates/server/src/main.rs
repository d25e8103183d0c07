//! Gatehouse Server Binary
//!
//! Serves the signup/login/landing flow on BIND_ADDR (default
//! 127.0.0.1:3000). All state is in-memory and vanishes on exit.

use gatehouse_core::*;

#[tokio::main]
async fn main() {
    log();
    kys();
    gatehouse_server::run().await.unwrap();
}
