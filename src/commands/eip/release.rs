use crate::commands::open_infra;
use crate::utils::{self, ProgressTracker};

use anyhow::Result;
use tracing::error;

pub async fn release(yaml_file_path: &str, skip_confirmation: bool) -> Result<()> {
    let (store, mut provider) = open_infra(yaml_file_path).await?;

    let eip = provider.infra.status.cluster.eip.clone();
    if eip.is_empty() {
        println!("Infra '{}' has no Elastic IP to release.", provider.infra.name);
        return Ok(());
    }

    if !(utils::user_confirmation(
        skip_confirmation,
        &format!("Do you confirm you want to release Elastic IP '{}'?", eip),
    )?) {
        return Ok(());
    }

    let multi = ProgressTracker::create_multi();
    let tracker = ProgressTracker::new_indeterminate(&multi, "Releasing Elastic IP...");
    if let Err(e) = provider.release_master_eip(&store, &tracker).await {
        tracker.finish_with_message("Elastic IP release failed");
        error!("{:?}", e);
        anyhow::bail!("Failed to release Elastic IP '{}': {}", eip, e);
    }
    tracker.finish_with_message("Elastic IP released");

    println!("\nElastic IP '{}' is now released.", eip);
    Ok(())
}
