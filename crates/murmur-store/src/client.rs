use aws_sdk_dynamodb::Client;

/// Load the default-chain AWS configuration.
pub async fn load_config() -> aws_config::SdkConfig {
    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await
}

/// Build a DynamoDB client from a loaded configuration.
pub fn build_client(config: &aws_config::SdkConfig) -> Client {
    Client::new(config)
}
