#[tokio::main]
async fn main() {
    happy_thoughts::start_server().await;
}
