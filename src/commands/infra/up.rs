use crate::commands::open_infra;
use crate::utils::{self, ProgressTracker};

use anyhow::Result;
use tracing::error;

const NETWORK_STEPS: u64 = 3;

pub async fn up(yaml_file_path: &str, skip_confirmation: bool) -> Result<()> {
    let (store, mut provider) = open_infra(yaml_file_path).await?;

    println!(
        "\nInfra '{}' will get a VPC, Subnet, Egress Gateway and Security Group in region '{}'.",
        provider.infra.name, provider.defaults.region
    );
    if !(utils::user_confirmation(
        skip_confirmation,
        "Do you confirm you want to create this network?",
    )?) {
        return Ok(());
    }

    let multi = ProgressTracker::create_multi();
    let tracker = ProgressTracker::add_to_multi(&multi, NETWORK_STEPS, Some("Starting..."));
    match provider.apply_network(&store, &tracker).await {
        Ok(()) => {
            tracker.finish_with_message("Network ready");
        }
        Err(e) => {
            tracker.finish_with_message("Network creation failed");
            error!("{:?}", e);
            anyhow::bail!(
                "Failed to create network for infra '{}': {}. Status saved to '{}'",
                provider.infra.name,
                e,
                store.path().display()
            );
        }
    }

    let cluster = &provider.infra.status.cluster;
    println!(
        "\nInfra '{}' network is ready (VPC '{}', Security Group '{}').",
        provider.infra.name, cluster.vpc_id, cluster.security_group_id
    );
    Ok(())
}
