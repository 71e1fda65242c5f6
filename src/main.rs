#[tokio::main]
async fn main() -> anyhow::Result<()> {
    oasis_gateway::node::run_cli().await
}
