use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_lambda::config::Region;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::types::{InvocationType, LogType};
use invoke_burst_core::{FunctionInvoker, InvokeError, RunConfig};

/// Synchronous (`RequestResponse`) Lambda invocations through one shared client.
pub struct AwsLambdaInvoker {
    lambda_client: aws_sdk_lambda::Client,
}

impl AwsLambdaInvoker {
    pub fn new(lambda_client: aws_sdk_lambda::Client) -> Self {
        Self { lambda_client }
    }
}

#[async_trait]
impl FunctionInvoker for AwsLambdaInvoker {
    async fn invoke(&self, function_name: &str) -> Result<Vec<u8>, InvokeError> {
        let output = self
            .lambda_client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .log_type(LogType::None)
            .send()
            .await
            .map_err(|error| {
                InvokeError::new(format!(
                    "failed to invoke lambda {function_name}: {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        // An unhandled error inside the function still yields a payload, which is kept.
        if let Some(function_error) = output.function_error() {
            tracing::warn!(
                function = function_name,
                function_error,
                status_code = output.status_code(),
                "lambda reported a function error"
            );
        }

        Ok(output
            .payload
            .map(|payload| payload.into_inner())
            .unwrap_or_default())
    }
}

/// Resolve region and credentials once and build the shared Lambda client.
pub async fn connect(config: &RunConfig) -> Result<Arc<dyn FunctionInvoker>, String> {
    let region = session_region(config)?;
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
    if let Some(profile) = session_profile(config) {
        loader = loader.profile_name(profile);
    }
    let sdk_config = loader.load().await;

    tracing::debug!(
        region = %config.region,
        profile = session_profile(config).unwrap_or("default"),
        "lambda session initialized"
    );
    Ok(Arc::new(AwsLambdaInvoker::new(aws_sdk_lambda::Client::new(
        &sdk_config,
    ))))
}

fn session_region(config: &RunConfig) -> Result<Region, String> {
    let region = config.region.trim();
    if region.is_empty() {
        return Err("Region must be configured".to_string());
    }
    Ok(Region::new(region.to_string()))
}

fn session_profile(config: &RunConfig) -> Option<&str> {
    let profile = config.profile.trim();
    (!profile.is_empty()).then_some(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(region: &str, profile: &str) -> RunConfig {
        RunConfig {
            region: region.to_string(),
            profile: profile.to_string(),
            ..RunConfig::default()
        }
    }

    #[test]
    fn rejects_missing_region() {
        let error = session_region(&config("  ", "")).expect_err("blank region should fail");
        assert!(error.contains("Region must be configured"));
    }

    #[test]
    fn trims_configured_region() {
        let region = session_region(&config(" eu-west-1 ", "")).unwrap();
        assert_eq!(region.as_ref(), "eu-west-1");
    }

    #[test]
    fn blank_profile_uses_default_chain() {
        assert_eq!(session_profile(&config("eu-west-1", "")), None);
        assert_eq!(
            session_profile(&config("eu-west-1", "load-test")),
            Some("load-test")
        );
    }

    #[tokio::test]
    async fn connect_fails_before_touching_aws_without_region() {
        let error = match connect(&config("", "load-test")).await {
            Ok(_) => panic!("connect should fail without a region"),
            Err(error) => error,
        };
        assert!(error.contains("Region"));
    }
}
