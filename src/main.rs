#[tokio::main]
async fn main() {
    std::process::exit(envscan::app::startup::startup().await);
}
