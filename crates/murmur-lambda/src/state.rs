use aws_sdk_dynamodb::Client as DynamoClient;

use murmur_auth::jwt::DecodingKey;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    /// AWS configuration shared by the store and the model provider.
    pub config: aws_config::SdkConfig,
    pub db: DynamoClient,
    pub table: String,
    /// Identity provider signing key and expected issuer.
    pub decoding_key: DecodingKey,
    pub issuer: String,
    pub default_model_id: String,
    pub search_model_id: String,
}
