use aws_config::{meta::region::RegionProviderChain, Region, SdkConfig};

/// LocalStack's default edge endpoint.
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// AWS connection settings layered over the SDK's default provider chain.
#[derive(Debug, Default, clap::Args)]
pub struct AwsArgs {
    /// AWS region; defaults to the environment/profile region, then us-east-1
    #[arg(long)]
    region: Option<String>,

    /// Override the SQS endpoint url
    #[arg(long)]
    endpoint: Option<String>,

    /// Target LocalStack with static test credentials
    #[arg(long)]
    local: bool,
}

impl AwsArgs {
    /// The endpoint to use, if any. `--local` implies LocalStack unless `--endpoint` is set.
    pub fn endpoint_url(&self) -> Option<&str> {
        match (&self.endpoint, self.local) {
            (Some(endpoint), _) => Some(endpoint),
            (None, true) => Some(LOCALSTACK_ENDPOINT),
            (None, false) => None,
        }
    }

    pub async fn load(&self) -> SdkConfig {
        let region = RegionProviderChain::first_try(self.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::from_static("us-east-1"));

        let mut loader =
            aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

        if let Some(endpoint) = self.endpoint_url() {
            log::debug!("using sqs endpoint {endpoint}");
            loader = loader.endpoint_url(endpoint);
        }

        if self.local {
            loader = loader.credentials_provider(aws_sdk_sqs::config::Credentials::new(
                "test", "test", None, None, "static",
            ));
        }

        loader.load().await
    }
}
