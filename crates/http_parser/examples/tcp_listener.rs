//! Accepts TCP connections and prints the request head of each one.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example tcp_listener -- 127.0.0.1:42069
//! curl http://127.0.0.1:42069/coffee
//! ```

use std::net::SocketAddr;

use carbon_http_parser::request_from_reader;
use log::{error, info};
use tokio::net::{TcpListener, TcpStream};

const DEFAULT_ADDR: &str = "127.0.0.1:42069";

async fn handle_connection(stream: TcpStream, addr: SocketAddr) {
    match request_from_reader(stream).await {
        Ok(request) => {
            let Some(line) = request.request_line() else {
                return;
            };
            println!("Request line:");
            println!("- Method: {}", line.method);
            println!("- Target: {}", line.target);
            println!("- Version: {}", line.http_version);
            println!("Headers:");
            for (name, value) in request.headers().iter() {
                println!("- {name}: {value}");
            }
        }
        Err(err) => error!("{addr}: {err}"),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);

    loop {
        let (stream, addr) = listener.accept().await?;
        info!("accepted connection from {addr}");
        tokio::spawn(handle_connection(stream, addr));
    }
}
