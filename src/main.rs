use clap::{Parser, Subcommand};
use std::fs::OpenOptions;

mod commands;
mod config;
mod error;
mod integrations;
mod models;
mod store;
mod utils;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Network lifecycle of an infra document
    Infra {
        #[command(subcommand)]
        command: InfraCommands,
    },

    /// Public address of the first master
    Eip {
        #[command(subcommand)]
        command: EipCommands,
    },

    /// Availability zone commands
    Zone {
        #[command(subcommand)]
        command: ZoneCommands,
    },

    /// Machine image lookups
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
}

#[derive(Subcommand, Debug)]
enum InfraCommands {
    /// Create (or adopt) the zone, VPC and Security Group of an infra
    Up {
        /// Path to the YAML file with the infra document
        #[arg(short = 'f', long = "file")]
        yaml_file_path: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Destroy every networking resource recorded in the infra status
    Down {
        /// Path to the YAML file with the infra document
        #[arg(short = 'f', long = "file")]
        yaml_file_path: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Print declared and recorded resource identifiers
    Show {
        /// Path to the YAML file with the infra document
        #[arg(short = 'f', long = "file")]
        yaml_file_path: String,

        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum EipCommands {
    /// Allocate an Elastic IP and associate it with master0
    Bind {
        /// Path to the YAML file with the infra document
        #[arg(short = 'f', long = "file")]
        yaml_file_path: String,
    },

    /// Disassociate and release the recorded Elastic IP
    Release {
        /// Path to the YAML file with the infra document
        #[arg(short = 'f', long = "file")]
        yaml_file_path: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ZoneCommands {
    /// Resolve and record the availability zone of an infra
    Resolve {
        /// Path to the YAML file with the infra document
        #[arg(short = 'f', long = "file")]
        yaml_file_path: String,
    },
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// Print the root device name of a machine image
    RootDevice {
        /// Image identifier (example: 'ami-0abcdef1234567890')
        #[arg(long)]
        image_id: String,

        /// Region to look the image up in (example: 'us-east-1')
        #[arg(long)]
        region: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Read environment variables
    dotenvy::dotenv().ok();

    // Setup logging
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("clusternet.log")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Infra { command } => match command {
            InfraCommands::Up {
                yaml_file_path,
                yes,
            } => {
                commands::infra::up(yaml_file_path, *yes).await?;
            }
            InfraCommands::Down {
                yaml_file_path,
                yes,
            } => {
                commands::infra::down(yaml_file_path, *yes).await?;
            }
            InfraCommands::Show {
                yaml_file_path,
                json,
            } => {
                commands::infra::show(yaml_file_path, *json)?;
            }
        },
        Commands::Eip { command } => match command {
            EipCommands::Bind { yaml_file_path } => {
                commands::eip::bind(yaml_file_path).await?;
            }
            EipCommands::Release {
                yaml_file_path,
                yes,
            } => {
                commands::eip::release(yaml_file_path, *yes).await?;
            }
        },
        Commands::Zone { command } => match command {
            ZoneCommands::Resolve { yaml_file_path } => {
                commands::zone::resolve(yaml_file_path).await?;
            }
        },
        Commands::Image { command } => match command {
            ImageCommands::RootDevice { image_id, region } => {
                commands::image::root_device(image_id, region.clone()).await?;
            }
        },
    }

    Ok(())
}
