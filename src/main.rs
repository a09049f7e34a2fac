#[tokio::main]
async fn main() -> anyhow::Result<()> {
    yarn_library::run_server().await
}
