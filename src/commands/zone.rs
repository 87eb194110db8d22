use crate::commands::open_infra;
use crate::store::InfraStore;

use anyhow::Result;

pub async fn resolve(yaml_file_path: &str) -> Result<()> {
    let (store, mut provider) = open_infra(yaml_file_path).await?;

    provider.get_available_zone_id().await?;
    store.save(&provider.infra)?;

    println!(
        "Infra '{}' uses availability zone '{}'",
        provider.infra.name, provider.infra.status.cluster.zone_id
    );
    Ok(())
}
