#[tokio::main]
async fn main() {
    vetclinic_backend::run().await;
}
