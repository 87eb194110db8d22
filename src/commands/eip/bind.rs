use crate::commands::open_infra;
use crate::utils::ProgressTracker;

use anyhow::Result;
use tracing::error;

pub async fn bind(yaml_file_path: &str) -> Result<()> {
    let (store, mut provider) = open_infra(yaml_file_path).await?;

    let multi = ProgressTracker::create_multi();
    let tracker = ProgressTracker::new_indeterminate(&multi, "Looking up master0...");
    if let Err(e) = provider.bind_master_eip(&store, &tracker).await {
        tracker.finish_with_message("Elastic IP binding failed");
        error!("{:?}", e);
        anyhow::bail!("Failed to bind Elastic IP for master0: {}", e);
    }
    tracker.finish_with_message("Elastic IP bound");

    let cluster = &provider.infra.status.cluster;
    println!(
        "\nmaster0 '{}' ({}) is reachable at {}",
        cluster.master0_id, cluster.master0_internal_ip, cluster.eip
    );
    Ok(())
}
