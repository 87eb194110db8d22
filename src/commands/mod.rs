pub mod eip;
pub mod image;
pub mod infra;
pub mod zone;

use crate::config::InfraDefaults;
use crate::integrations::providers::aws::{AwsEc2Client, AwsInterface, AwsProvider};
use crate::models::Infra;
use crate::store::YamlInfraStore;
use crate::utils::ThreadRandom;

use anyhow::Result;
use tracing::info;

/// Load the infra document at `path` and connect a provider for it
pub(crate) async fn open_infra(
    path: &str,
) -> Result<(YamlInfraStore, AwsProvider<AwsEc2Client, ThreadRandom>)> {
    let store = YamlInfraStore::new(path);
    let infra = store.load()?;
    info!("Loaded infra '{}' from '{}'", infra.name, path);

    let provider = connect(infra, InfraDefaults::from_env()).await?;
    Ok((store, provider))
}

pub(crate) async fn connect(
    infra: Infra,
    defaults: InfraDefaults,
) -> Result<AwsProvider<AwsEc2Client, ThreadRandom>> {
    let interface = AwsInterface::from_env(&defaults.region);
    let client = AwsEc2Client::new(interface.get_ec2_client().await?);
    Ok(AwsProvider::new(infra, client, defaults, ThreadRandom))
}
