//! Role assumption against the temporary security token service.
//!
//! The [`Sts`] trait is the only thing the login workflow talks to. The
//! production implementation lives in [`aws`]; tests substitute their own.
//!
//! ## Error classification
//!
//! Upstream failures are folded into [`StsError`]. The structured error code
//! is consulted first. Message substring matching ("Duration", "MFA",
//! "MultiFactorAuthentication") is kept as a compatibility shim for errors
//! that only carry the detail in their message.

pub mod aws;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::core::config::ProfileCredentials;
use crate::core::constants;
use crate::error::{Result, StsError};

pub use aws::{AwsConnector, AwsSts};

/// Identity of the caller as reported by the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account_id: String,
    pub arn: String,
}

impl CallerIdentity {
    /// Principal name: the last `/` segment of the caller ARN.
    pub fn principal_name(&self) -> &str {
        self.arn.rsplit('/').next().unwrap_or(&self.arn)
    }
}

/// Parameters of an AssumeRole call.
#[derive(Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub role_name: String,
    pub session_name: String,
    pub mfa_serial: String,
    pub mfa_code: String,
    pub duration_seconds: i32,
}

impl fmt::Debug for AssumeRoleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssumeRoleRequest")
            .field("role_arn", &self.role_arn)
            .field("session_name", &self.session_name)
            .field("mfa_serial", &self.mfa_serial)
            .field("mfa_code", &"[redacted]")
            .field("duration_seconds", &self.duration_seconds)
            .finish()
    }
}

/// Short-lived credentials returned by AssumeRole.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

/// Token service operations used by the login workflow.
pub trait Sts {
    /// Look up the caller's own identity.
    ///
    /// # Errors
    ///
    /// `StsError::NetworkError` or `StsError::Unauthenticated`.
    fn identify(&self) -> Result<CallerIdentity>;

    /// Exchange the request for temporary credentials.
    ///
    /// # Errors
    ///
    /// `DurationExceedsRoleLimit`, `InvalidMfaCode`, `AccessDenied`,
    /// `Unauthenticated` or `TransientProviderError`. No credentials are
    /// returned on any error path.
    fn assume_role(&self, request: &AssumeRoleRequest) -> Result<TemporaryCredentials>;
}

/// Builds an [`Sts`] client for one invocation from a profile's credentials.
pub trait StsConnector {
    fn connect(&self, credentials: &ProfileCredentials, region: &str) -> Result<Box<dyn Sts>>;
}

/// Build a role ARN: `arn:aws:iam::<account>:role/<role>`.
///
/// # Errors
///
/// Returns `StsError::InvalidArn` if the account id or role name is invalid.
pub fn role_arn(account_id: &str, role: &str) -> Result<String> {
    validate_account_id(account_id)?;
    validate_name("role name", role)?;
    Ok(format!("arn:aws:iam::{}:role/{}", account_id, role))
}

/// Build an MFA device ARN: `arn:aws:iam::<account>:mfa/<principal>`.
///
/// # Errors
///
/// Returns `StsError::InvalidArn` if the account id or principal is invalid.
pub fn mfa_arn(account_id: &str, principal: &str) -> Result<String> {
    validate_account_id(account_id)?;
    validate_name("principal name", principal)?;
    Ok(format!("arn:aws:iam::{}:mfa/{}", account_id, principal))
}

fn validate_account_id(account_id: &str) -> Result<()> {
    if account_id.len() != 12 || !account_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StsError::InvalidArn(format!(
            "account id must be 12 digits, got '{}'",
            account_id
        ))
        .into());
    }
    Ok(())
}

fn is_iam_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "+=,.@_-".contains(c)
}

fn validate_name(what: &str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 128
        && !name.starts_with('/')
        && !name.ends_with('/')
        && name.chars().all(|c| c == '/' || is_iam_name_char(c));
    if !valid {
        return Err(StsError::InvalidArn(format!("invalid {}: '{}'", what, name)).into());
    }
    Ok(())
}

/// Build a role session name that STS will accept.
///
/// Format is `<os-user>-<principal>-<environment>-<role>-<millis>`. Characters
/// outside `[\w+=,.@-]` become `-`, and the prefix is shortened so the
/// timestamp suffix always survives the 64 character limit.
pub fn role_session_name(
    os_user: &str,
    principal: &str,
    environment: &str,
    role: &str,
    millis: i64,
) -> String {
    let suffix = format!("-{}", millis);
    let prefix: String = format!("{}-{}-{}-{}", os_user, principal, environment, role)
        .chars()
        .map(|c| if is_iam_name_char(c) { c } else { '-' })
        .take(constants::MAX_ROLE_SESSION_NAME.saturating_sub(suffix.len()))
        .collect();
    format!("{}{}", prefix, suffix)
}

/// Classify an AssumeRole failure.
pub fn classify_assume_role_error(code: Option<&str>, message: &str, role: &str) -> StsError {
    let mentions_mfa = message.contains("MultiFactorAuthentication") || message.contains("MFA");
    let mentions_duration = message.contains("Duration");

    match code {
        Some("InvalidClientTokenId" | "SignatureDoesNotMatch" | "ExpiredToken") => {
            return StsError::Unauthenticated(message.to_string());
        }
        Some("ValidationError") if mentions_duration => {
            return StsError::DurationExceedsRoleLimit {
                role: role.to_string(),
            };
        }
        Some("AccessDenied") if mentions_mfa => return StsError::InvalidMfaCode,
        _ => {}
    }

    // Compatibility shim: message matching for uncoded or unexpected errors.
    if mentions_duration {
        return StsError::DurationExceedsRoleLimit {
            role: role.to_string(),
        };
    }
    if mentions_mfa {
        return StsError::InvalidMfaCode;
    }
    if code == Some("AccessDenied") {
        return StsError::AccessDenied(message.to_string());
    }

    let detail = match code {
        Some(code) => format!("{}: {}", code, message),
        None => message.to_string(),
    };
    StsError::TransientProviderError(detail)
}

/// Classify a GetCallerIdentity failure.
pub fn classify_identity_error(code: Option<&str>, message: &str) -> StsError {
    match code {
        Some(
            "InvalidClientTokenId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"
            | "AccessDenied"
            | "UnrecognizedClientException",
        ) => StsError::Unauthenticated(message.to_string()),
        Some(code) => StsError::NetworkError(format!("{}: {}", code, message)),
        None => StsError::NetworkError(message.to_string()),
    }
}
