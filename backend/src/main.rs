#[tokio::main]
async fn main() -> anyhow::Result<()> {
  gamus_server::run().await
}
