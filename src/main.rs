#[tokio::main]
async fn main() {
    if let Err(e) = apm_backend::run().await {
        eprintln!("apm_backend failed: {}", e);
        std::process::exit(1);
    }
}
