use crate::commands::open_infra;
use crate::utils::{self, ProgressTracker};

use anyhow::Result;
use tracing::error;

const TEARDOWN_STEPS: u64 = 3;

pub async fn down(yaml_file_path: &str, skip_confirmation: bool) -> Result<()> {
    let (store, mut provider) = open_infra(yaml_file_path).await?;

    if !(utils::user_confirmation(
        skip_confirmation,
        &format!(
            "Do you confirm you want to destroy the network of infra '{}'?",
            provider.infra.name
        ),
    )?) {
        return Ok(());
    }

    let multi = ProgressTracker::create_multi();
    let tracker = ProgressTracker::add_to_multi(&multi, TEARDOWN_STEPS, Some("Starting..."));
    if let Err(e) = provider.destroy_network(&store, &tracker).await {
        tracker.finish_with_message("Network teardown failed");
        error!("{:?}", e);
        anyhow::bail!(
            "Failed to destroy network for infra '{}': {}",
            provider.infra.name,
            e
        );
    }
    tracker.finish_with_message("Network destroyed");

    println!("\nInfra '{}' network is now destroyed.", provider.infra.name);
    Ok(())
}
