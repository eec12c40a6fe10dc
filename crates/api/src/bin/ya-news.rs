use ya_api::router::Site;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ya_api::server::run(Site::News).await
}
