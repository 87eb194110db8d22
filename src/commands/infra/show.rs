use crate::models::{Infra, ResourceField};
use crate::store::YamlInfraStore;

use anyhow::Result;
use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct ResourceDisplay {
    #[tabled(rename = "Resource")]
    field: String,
    #[tabled(rename = "Declared")]
    declared: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Owner")]
    owner: String,
}

fn resource_rows(infra: &Infra) -> Vec<ResourceDisplay> {
    ResourceField::ALL
        .iter()
        .map(|field| {
            let declared = field.cluster_value(&infra.spec);
            let status = field.value(&infra.status);
            let owner = if field.is_externally_owned(&infra.spec, &infra.status) {
                "user"
            } else if status.is_empty() {
                "-"
            } else {
                "clusternet"
            };
            ResourceDisplay {
                field: field.to_string(),
                declared: declared.to_string(),
                status: status.to_string(),
                owner: owner.to_string(),
            }
        })
        .collect()
}

pub fn show(yaml_file_path: &str, as_json: bool) -> Result<()> {
    let infra = YamlInfraStore::new(yaml_file_path).load()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&infra.status)?);
        return Ok(());
    }

    let cluster = &infra.status.cluster;
    let zone = if cluster.zone_id.is_empty() {
        "unresolved".yellow()
    } else {
        cluster.zone_id.green()
    };
    println!("\nInfra '{}' (zone: {})", infra.name.bold(), zone);

    let mut table = Table::new(resource_rows(&infra));
    table.with(Style::rounded());
    println!("{}", table);

    if cluster.eip.is_empty() {
        println!("Master0: {}", "no public address".yellow());
    } else {
        println!(
            "Master0: {} ({}) reachable at {}",
            cluster.master0_id,
            cluster.master0_internal_ip,
            cluster.eip.green()
        );
    }
    Ok(())
}
