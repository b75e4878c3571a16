#[tokio::main]
async fn main() {
    volwatch::cli::run().await;
}
