use eyre::Report;

#[tokio::main]
async fn main() -> Result<(), Report> {
    tourpay::run().await
}
