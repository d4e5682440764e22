mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skylift")]
#[command(about = "Provision AWS network/compute resources and AMI image pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision an EC2 instance with its default-VPC networking
    Network {
        /// AWS access key id
        #[arg(long, env = "AWS_ACCESS_KEY_ID")]
        access_key: String,
        /// AWS secret access key
        #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
        secret_access_key: String,
        /// AWS region
        #[arg(long, env = "AWS_DEFAULT_REGION", default_value = "us-east-1")]
        region: String,
        /// AMI id for the instance
        #[arg(long, default_value = "ami-08d4ac5b634553e16")]
        image_id: String,
        /// EC2 instance type
        #[arg(long, default_value = "t2.micro")]
        instance_type: String,
        /// SSH key pair name
        #[arg(long, default_value = "ubuntu-ssh")]
        key_name: String,
        /// Value of the instance Name tag
        #[arg(long, default_value = "skylift instance")]
        instance_name: String,
        /// Name of the security group to create
        #[arg(long, default_value = "sec_devices")]
        security_group_name: String,
        /// Description of the security group
        #[arg(long, default_value = "Security group created by skylift")]
        security_group_description: String,
        /// CIDR block for the new subnet
        #[arg(long, default_value = "10.0.0.0/24")]
        cidr_block: String,
        /// Private IP address for the network interface
        #[arg(long, default_value = "10.0.0.50")]
        private_ip: String,
        /// Description of the network interface
        #[arg(long, default_value = "Network interface created by skylift")]
        nic_description: String,
        /// Device index for the interface attachment
        #[arg(long, default_value = "1")]
        device_index: i32,
    },
    /// Provision an EC2 Image Builder pipeline and start its first build
    #[command(name = "image-pipeline")]
    ImagePipeline {
        /// AWS account id (used in constructed ARNs)
        #[arg(long, env = "AWS_ACCOUNT_ID")]
        account_id: String,
        /// AWS access key id
        #[arg(long, env = "AWS_ACCESS_KEY_ID")]
        access_key: String,
        /// AWS secret access key
        #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
        secret_access_key: String,
        /// AWS region
        #[arg(long, env = "AWS_DEFAULT_REGION", default_value = "us-east-1")]
        region: String,
        /// Component name
        #[arg(long)]
        component_name: String,
        /// Component semantic version (e.g. 1.0.0)
        #[arg(long)]
        component_version: String,
        /// Image Builder platform (Linux, Windows)
        #[arg(long, default_value = "Linux")]
        platform: String,
        /// Recipe name
        #[arg(long)]
        recipe_name: String,
        /// Recipe semantic version (e.g. 1.0.0)
        #[arg(long)]
        recipe_version: String,
        /// Parent image display name (e.g. "Ubuntu Server 20")
        #[arg(long)]
        image_name: String,
        /// Parent image OS version (e.g. 20.04)
        #[arg(long)]
        os_version: String,
        /// Distribution configuration name
        #[arg(long)]
        distribution_name: String,
        /// Infrastructure configuration name
        #[arg(long)]
        infrastructure_name: String,
        /// Build instance type
        #[arg(long, default_value = "t2.micro")]
        instance_type: String,
        /// Instance profile role name for the build instance
        #[arg(long, default_value = "EC2InstanceProfileForImageBuilder")]
        instance_profile: String,
        /// Image pipeline name
        #[arg(long)]
        pipeline_name: String,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Commands::Version => {
            println!("skylift {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Network {
            access_key,
            secret_access_key,
            region,
            image_id,
            instance_type,
            key_name,
            instance_name,
            security_group_name,
            security_group_description,
            cidr_block,
            private_ip,
            nic_description,
            device_index,
        } => {
            commands::network::handle(commands::network::NetworkArgs {
                access_key,
                secret_access_key,
                region,
                image_id,
                instance_type,
                key_name,
                instance_name,
                security_group_name,
                security_group_description,
                cidr_block,
                private_ip,
                nic_description,
                device_index,
            })
            .await
        }
        Commands::ImagePipeline {
            account_id,
            access_key,
            secret_access_key,
            region,
            component_name,
            component_version,
            platform,
            recipe_name,
            recipe_version,
            image_name,
            os_version,
            distribution_name,
            infrastructure_name,
            instance_type,
            instance_profile,
            pipeline_name,
        } => {
            commands::image_pipeline::handle(commands::image_pipeline::ImagePipelineArgs {
                account_id,
                access_key,
                secret_access_key,
                region,
                component_name,
                component_version,
                platform,
                recipe_name,
                recipe_version,
                image_name,
                os_version,
                distribution_name,
                infrastructure_name,
                instance_type,
                instance_profile,
                pipeline_name,
            })
            .await
        }
    }
}
