use crate::error::{InfraError, Result};
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::DescribeImagesInput;
use crate::integrations::providers::aws::AwsProvider;
use crate::utils::RandomSource;

use tracing::info;

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    /// Root device name of an image, needed to size the boot volume
    pub async fn get_image_root_device_name(&self, image_id: &str) -> Result<String> {
        let response = self
            .client
            .describe_images(DescribeImagesInput {
                image_ids: vec![image_id.to_string()],
            })
            .await?;

        let image = response.images.into_iter().next().ok_or_else(|| {
            InfraError::not_found("image", format!("not find this image: '{}'", image_id))
        })?;
        let root_device_name = image.root_device_name.ok_or_else(|| {
            InfraError::not_found(
                "root device",
                format!("image '{}' has no root device name", image_id),
            )
        })?;

        info!(
            "Image '{}' uses root device '{}'",
            image_id, root_device_name
        );
        Ok(root_device_name)
    }
}
