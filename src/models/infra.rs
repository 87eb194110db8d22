use crate::models::{Host, InfraHostStatus};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let protocol_str = match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        };
        write!(f, "{}", protocol_str)
    }
}

/// A port range opened to the outside world, written as `from/to` or a single port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPort {
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default = "default_cidr_ip")]
    pub cidr_ip: String,
    pub port_range: String,
}

fn default_cidr_ip() -> String {
    "0.0.0.0/0".to_string()
}

impl ExportPort {
    pub fn new(protocol: Protocol, cidr_ip: &str, port_range: &str) -> Self {
        Self {
            protocol,
            cidr_ip: cidr_ip.to_string(),
            port_range: port_range.to_string(),
        }
    }

    /// Parse `port_range` into inclusive `(from, to)` bounds
    pub fn port_bounds(&self) -> Result<(i32, i32), String> {
        let parse = |s: &str| -> Result<i32, String> {
            s.trim()
                .parse::<u16>()
                .map(i32::from)
                .map_err(|_| format!("Invalid port '{}' in range '{}'", s, self.port_range))
        };

        let (from, to) = match self.port_range.split_once('/') {
            Some((from, to)) => (parse(from)?, parse(to)?),
            None => {
                let port = parse(&self.port_range)?;
                (port, port)
            }
        };

        if from > to {
            return Err(format!(
                "Invalid port range '{}': start is greater than end",
                self.port_range
            ));
        }
        Ok((from, to))
    }
}

impl std::fmt::Display for ExportPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}@{}", self.protocol, self.port_range, self.cidr_ip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Network {
    #[serde(default)]
    pub export_ports: Vec<ExportPort>,
}

/// User declaration for the infrastructure. Resource IDs set here are reused
/// instead of created, and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InfraMetadata {
    #[serde(default)]
    pub zone_ids: Vec<String>,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub vpc_id: String,
    #[serde(default)]
    pub subnet_id: String,
    #[serde(default)]
    pub security_group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InfraSpec {
    #[serde(default)]
    pub metadata: InfraMetadata,
    #[serde(default)]
    pub hosts: Vec<Host>,
}

/// Identifiers resolved or created for the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClusterStatus {
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub vpc_id: String,
    #[serde(default)]
    pub subnet_id: String,
    #[serde(default)]
    pub subnet_zone_id: String,
    #[serde(default)]
    pub egress_gateway_id: String,
    #[serde(default)]
    pub security_group_id: String,
    #[serde(default)]
    pub eip_id: String,
    #[serde(default)]
    pub eip_association_id: String,
    #[serde(default)]
    pub eip: String,
    #[serde(default)]
    pub master0_id: String,
    #[serde(default)]
    pub master0_internal_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InfraStatus {
    #[serde(default)]
    pub cluster: ClusterStatus,
    #[serde(default)]
    pub hosts: Vec<InfraHostStatus>,
}

impl InfraStatus {
    pub fn ready_master(&self) -> Option<&InfraHostStatus> {
        self.hosts.iter().find(|h| h.is_ready_master())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Infra {
    pub name: String,
    #[serde(default)]
    pub spec: InfraSpec,
    #[serde(default)]
    pub status: InfraStatus,
}

impl Infra {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
