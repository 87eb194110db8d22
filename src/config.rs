use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_PREFIX: &str = "CLUSTERNET_";

/// Defaults applied when creating networking resources.
///
/// Values can be overridden with `CLUSTERNET_*` environment variables (for
/// example `CLUSTERNET_REGION=eu-central-1`), which are typically loaded from
/// a `.env` file at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraDefaults {
    pub region: String,
    pub vpc_cidr_block: String,
    pub subnet_cidr_block: String,
    pub tag_key: String,
    pub tag_value: String,
    pub security_group_prefix: String,
    pub security_group_description: String,
}

impl Default for InfraDefaults {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            vpc_cidr_block: "10.0.0.0/16".to_string(),
            subnet_cidr_block: "10.0.1.0/24".to_string(),
            tag_key: "managed-by".to_string(),
            tag_value: "clusternet".to_string(),
            security_group_prefix: "clusternet".to_string(),
            security_group_description: "clusternet security group".to_string(),
        }
    }
}

impl InfraDefaults {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build defaults, replacing every field for which `lookup` returns a non-empty value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut defaults = Self::default();
        let fields: [(&str, &mut String); 7] = [
            ("REGION", &mut defaults.region),
            ("VPC_CIDR", &mut defaults.vpc_cidr_block),
            ("SUBNET_CIDR", &mut defaults.subnet_cidr_block),
            ("TAG_KEY", &mut defaults.tag_key),
            ("TAG_VALUE", &mut defaults.tag_value),
            ("SECURITY_GROUP_PREFIX", &mut defaults.security_group_prefix),
            (
                "SECURITY_GROUP_DESCRIPTION",
                &mut defaults.security_group_description,
            ),
        ];

        for (suffix, field) in fields {
            let key = format!("{}{}", ENV_PREFIX, suffix);
            if let Some(value) = lookup(&key).filter(|v| !v.is_empty()) {
                debug!("Overriding default '{}' with '{}'", key, value);
                *field = value;
            }
        }

        defaults
    }
}
