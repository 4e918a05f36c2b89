// ctrlq - ask the control plane, read the verdict

use ctrlq::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
