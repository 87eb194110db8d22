use anyhow::Result;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::{Credentials, provider::SharedCredentialsProvider};
use aws_sdk_ec2::Client as EC2Client;
use tracing::info;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Credentials and region used to talk to AWS
pub struct AwsInterface {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
}

impl AwsInterface {
    /// Read static credentials from the environment, if present
    pub fn from_env(region: &str) -> Self {
        Self {
            access_key_id: std::env::var(ACCESS_KEY_ID_VAR).ok(),
            secret_access_key: std::env::var(SECRET_ACCESS_KEY_VAR).ok(),
            region: region.to_string(),
        }
    }

    /// Build an AWS SDK configuration. Static keys win; otherwise the default
    /// provider chain (profiles, instance metadata, ...) is used.
    pub async fn get_config(&self) -> Result<SdkConfig> {
        let region = Region::new(self.region.clone());

        match (&self.access_key_id, &self.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                info!("Using static AWS credentials for region '{}'", self.region);
                let credentials =
                    Credentials::from_keys(access_key_id.clone(), secret_access_key.clone(), None);
                let static_provider = SharedCredentialsProvider::new(credentials);
                let config = SdkConfig::builder()
                    .behavior_version(BehaviorVersion::v2025_01_17())
                    .region(region)
                    .credentials_provider(static_provider)
                    .build();
                Ok(config)
            }
            _ => {
                info!(
                    "Using the default AWS credential chain for region '{}'",
                    self.region
                );
                Ok(aws_config::defaults(BehaviorVersion::v2025_01_17())
                    .region(region)
                    .load()
                    .await)
            }
        }
    }

    /// Get an EC2 client configured with the provided credentials and region.
    pub async fn get_ec2_client(&self) -> Result<EC2Client> {
        Ok(EC2Client::new(&self.get_config().await?))
    }
}
