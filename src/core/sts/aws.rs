//! AWS STS client.
//!
//! A client is built per invocation from the selected profile's long-lived
//! keys; nothing is read from, or written to, process-wide SDK state. The
//! async SDK is driven from a current-thread tokio runtime owned by the
//! client, so every call is a blocking suspension point for the caller.

use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_sts::config::{Credentials, Region};
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::{
    classify_assume_role_error, classify_identity_error, AssumeRoleRequest, CallerIdentity, Sts,
    StsConnector, TemporaryCredentials,
};
use crate::core::config::ProfileCredentials;
use crate::error::{Result, StsError};

/// Provider name attached to the static profile credentials.
const PROVIDER_NAME: &str = "credbroker-profile";

/// How an SDK call failed, before classification.
enum Failure {
    Timeout,
    Dispatch(String),
    Service { code: Option<String>, message: String },
}

fn failure<E, R>(err: &SdkError<E, R>) -> Failure
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::TimeoutError(_) => Failure::Timeout,
        SdkError::DispatchFailure(d) if d.is_timeout() => Failure::Timeout,
        SdkError::DispatchFailure(_) => Failure::Dispatch(DisplayErrorContext(err).to_string()),
        _ => Failure::Service {
            code: err.code().map(str::to_string),
            message: err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(err).to_string()),
        },
    }
}

/// STS client bound to one profile.
#[derive(Debug)]
pub struct AwsSts {
    client: aws_sdk_sts::Client,
    runtime: tokio::runtime::Runtime,
}

impl AwsSts {
    /// Build a client from profile credentials.
    ///
    /// # Errors
    ///
    /// Returns `StsError::TransientProviderError` if the async runtime cannot
    /// be created.
    pub fn new(credentials: &ProfileCredentials, region: &str, timeout: Duration) -> Result<Self> {
        Self::with_endpoint(credentials, region, timeout, None)
    }

    /// Like [`AwsSts::new`], sending requests to `endpoint` instead of the
    /// regional STS endpoint when one is given.
    pub(crate) fn with_endpoint(
        credentials: &ProfileCredentials,
        region: &str,
        timeout: Duration,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        debug!(region = %region, timeout_secs = timeout.as_secs(), ?endpoint, "creating STS client");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                StsError::TransientProviderError(format!("failed to create runtime: {}", e))
            })?;

        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            PROVIDER_NAME,
        );

        let mut builder = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(provider)
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        builder.set_endpoint_url(endpoint.map(str::to_string));
        let config = builder.build();

        Ok(Self {
            client: aws_sdk_sts::Client::from_conf(config),
            runtime,
        })
    }
}

impl Sts for AwsSts {
    fn identify(&self) -> Result<CallerIdentity> {
        trace!("GetCallerIdentity");

        let output = self
            .runtime
            .block_on(self.client.get_caller_identity().send())
            .map_err(|e| match failure(&e) {
                Failure::Timeout => StsError::NetworkError("request timed out".to_string()),
                Failure::Dispatch(detail) => StsError::NetworkError(detail),
                Failure::Service { code, message } => {
                    classify_identity_error(code.as_deref(), &message)
                }
            })?;

        let account_id = output
            .account()
            .ok_or_else(|| StsError::NetworkError("identity response missing account".into()))?;
        let arn = output
            .arn()
            .ok_or_else(|| StsError::NetworkError("identity response missing arn".into()))?;

        Ok(CallerIdentity {
            account_id: account_id.to_string(),
            arn: arn.to_string(),
        })
    }

    fn assume_role(&self, request: &AssumeRoleRequest) -> Result<TemporaryCredentials> {
        trace!(role_arn = %request.role_arn, "AssumeRole");

        let output = self
            .runtime
            .block_on(
                self.client
                    .assume_role()
                    .role_arn(&request.role_arn)
                    .role_session_name(&request.session_name)
                    .serial_number(&request.mfa_serial)
                    .token_code(&request.mfa_code)
                    .duration_seconds(request.duration_seconds)
                    .send(),
            )
            .map_err(|e| match failure(&e) {
                Failure::Timeout => {
                    StsError::TransientProviderError("request timed out".to_string())
                }
                Failure::Dispatch(detail) => StsError::TransientProviderError(detail),
                Failure::Service { code, message } => {
                    classify_assume_role_error(code.as_deref(), &message, &request.role_name)
                }
            })?;

        let credentials = output.credentials().ok_or_else(|| {
            StsError::TransientProviderError("AssumeRole response missing credentials".into())
        })?;

        let expiry = credentials.expiration();
        let expiration = DateTime::<Utc>::from_timestamp(expiry.secs(), expiry.subsec_nanos())
            .ok_or_else(|| {
                StsError::TransientProviderError("AssumeRole returned an invalid expiry".into())
            })?;

        Ok(TemporaryCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expiration,
        })
    }
}

/// Connector producing [`AwsSts`] clients with a fixed operation timeout.
#[derive(Debug, Clone)]
pub struct AwsConnector {
    timeout: Duration,
}

impl AwsConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl StsConnector for AwsConnector {
    fn connect(&self, credentials: &ProfileCredentials, region: &str) -> Result<Box<dyn Sts>> {
        Ok(Box::new(AwsSts::new(credentials, region, self.timeout)?))
    }
}
