use serde::{Deserialize, Serialize};

pub const MASTER: &str = "master";
pub const NODE: &str = "node";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Arch {
    #[default]
    #[serde(rename = "amd64")]
    Amd64,
    #[serde(rename = "arm64")]
    Arm64,
    #[serde(rename = "x86_64")]
    X86_64,
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arch_str = match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::X86_64 => "x86_64",
        };
        write!(f, "{}", arch_str)
    }
}

impl std::str::FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amd64" => Ok(Arch::Amd64),
            "arm64" => Ok(Arch::Arm64),
            "x86_64" => Ok(Arch::X86_64),
            _ => Err(format!("Invalid architecture: '{}'", s)),
        }
    }
}

/// Hosts requested by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Host {
    pub roles: Vec<String>,
    #[serde(default)]
    pub arch: Arch,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub image_id: String,
}

fn default_count() -> u32 {
    1
}

/// Observed state of a group of hosts, written by the instance provisioning step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InfraHostStatus {
    pub roles: Vec<String>,
    #[serde(default)]
    pub arch: Arch,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub ips: Vec<String>,
    #[serde(default)]
    pub instance_ids: Vec<String>,
}

impl InfraHostStatus {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_ready_master(&self) -> bool {
        self.ready && self.has_role(MASTER)
    }
}
