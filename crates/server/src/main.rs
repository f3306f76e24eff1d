#[tokio::main]
async fn main() -> anyhow::Result<()> {
    labelcheck_server::start().await
}
