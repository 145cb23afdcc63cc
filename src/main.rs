#[tokio::main]
async fn main() {
    if let Err(e) = cardiolens::run().await {
        eprintln!("cardiolens: {e}");
        std::process::exit(1);
    }
}
