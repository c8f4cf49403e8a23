use logs_adapter::error::AdapterError;

#[tokio::main]
async fn main() -> Result<(), AdapterError> {
    logs_adapter::app::run().await
}
