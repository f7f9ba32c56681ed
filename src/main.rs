//! teamsfx binary entry point.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    teamsfx::cli::run(args).await.into()
}
