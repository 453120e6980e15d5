use anyhow::Context;
use bulwark_driver_aws::AwsServices;
use bulwark_responder::IncidentResponder;
use uuid::Uuid;

use crate::cli::RespondArgs;
use crate::config::AppConfig;
use crate::event::read_request;

/// `bulwark respond`
pub async fn respond(mut config: AppConfig, args: RespondArgs) -> anyhow::Result<()> {
    if let Some(region) = args.region {
        config.aws.region = Some(region);
    }
    if let Some(endpoint_url) = args.endpoint_url {
        config.aws.endpoint_url = Some(endpoint_url);
    }
    if let Some(profile) = args.profile {
        config.aws.profile = Some(profile);
    }

    // Reject bad input before resolving credentials.
    config
        .responder
        .validate()
        .context("invalid responder configuration")?;
    let request = read_request(&args.event)?;

    let services = AwsServices::connect(&config.aws)
        .await
        .context("failed to configure AWS clients")?;

    let responder = IncidentResponder::builder()
        .compute(services.compute)
        .identity(services.identity)
        .secrets(services.secrets)
        .publisher(services.publisher)
        .config(config.responder)
        .build()?;

    let incident_id = args
        .incident_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    tracing::info!(%incident_id, "Starting incident response");

    let response = responder.respond(&incident_id, &request).await;

    if args.proxy {
        super::print_json(&response.to_proxy_json()?)
    } else {
        super::print_json(&response)
    }
}
