use crate::error::Result;
use crate::integrations::Ec2Api;
use crate::integrations::data_transfer_objects::{
    DescribeInstancesInput, InstanceInfo, ResourceFilter,
};
use crate::integrations::providers::aws::AwsProvider;
use crate::utils::RandomSource;

use std::collections::BTreeMap;
use tracing::info;

pub const PRODUCT_TAG: &str = "product";
pub const ROLE_TAG: &str = "role";
pub const ARCH_TAG: &str = "arch";

/// EC2 state code of a running instance
pub const RUNNING_STATE_CODE: i32 = 16;

/// One `tag:<key>` filter per entry, ordered by key
pub fn tag_filters(tags: &BTreeMap<&str, String>) -> Vec<ResourceFilter> {
    tags.iter()
        .map(|(key, value)| ResourceFilter {
            name: format!("tag:{}", key),
            values: vec![value.clone()],
        })
        .collect()
}

impl<C: Ec2Api, R: RandomSource> AwsProvider<C, R> {
    pub async fn get_instance_infos(
        &self,
        filters: Vec<ResourceFilter>,
    ) -> Result<Vec<InstanceInfo>> {
        let response = self
            .client
            .describe_instances(DescribeInstancesInput { filters })
            .await?;
        info!("Found {} matching EC2 instances", response.instances.len());
        Ok(response.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filters_are_ordered_by_key() {
        let tags = BTreeMap::from([
            (ROLE_TAG, "master,node".to_string()),
            (PRODUCT_TAG, "demo".to_string()),
            (ARCH_TAG, "amd64".to_string()),
        ]);

        let filters = tag_filters(&tags);
        let names: Vec<&str> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["tag:arch", "tag:product", "tag:role"]);
        assert_eq!(filters[2].values, vec!["master,node".to_string()]);
    }
}
