//! AWS client configuration
//!
//! Credentials and region are carried in an explicit config object handed to
//! each adapter at construction; nothing is read from process-wide state.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_ec2::config::Credentials;

/// Static credentials and region for one provisioning run
#[derive(Debug, Clone)]
pub struct AwsConfig {
    pub region: String,
    pub access_key: String,
    pub secret_access_key: String,
}

impl AwsConfig {
    /// Resolve this configuration into an SDK config usable by any AWS client
    pub async fn load(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(Credentials::new(
                self.access_key.clone(),
                self.secret_access_key.clone(),
                None,
                None,
                "skylift",
            ))
            .load()
            .await
    }
}
