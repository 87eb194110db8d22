use crate::commands::connect;
use crate::config::InfraDefaults;
use crate::models::Infra;

use anyhow::Result;

pub async fn root_device(image_id: &str, region: Option<String>) -> Result<()> {
    let mut defaults = InfraDefaults::from_env();
    if let Some(region) = region {
        defaults.region = region;
    }

    let provider = connect(Infra::new(image_id), defaults).await?;
    let root_device_name = provider.get_image_root_device_name(image_id).await?;

    println!("{}", root_device_name);
    Ok(())
}
