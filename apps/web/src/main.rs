//! Stockroom entry point.
//!
//! ```bash
//! stockroom-web                 # print the page for the stored inventory
//! stockroom-web "?role=guest"   # guest view (revokes the stored admin flag)
//! stockroom-web --json          # page state as JSON
//! stockroom-web -i              # drive the page from the terminal
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    stockroom_web::run_from_args(std::env::args().skip(1)).await
}
