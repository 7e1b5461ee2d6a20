//! Role assumption workflow.
//!
//! Walks the user through profile, environment, role, duration and MFA code,
//! exchanges them for temporary credentials and caches the result in the
//! opened [`Vault`]. Nothing is saved unless AssumeRole succeeds.

use chrono::Utc;
use tracing::{debug, info};

use crate::core::config::Session;
use crate::core::constants;
use crate::core::prompt::Prompter;
use crate::core::session;
use crate::core::sts::{self, AssumeRoleRequest, StsConnector};
use crate::core::vault::Vault;
use crate::error::{Result, ValidationError};

/// What the user picked, before any network call.
///
/// Profile names are not unique, so the picks are kept as positions into
/// the configuration. Names only feed the session key and session name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub profile_index: usize,
    pub environment_index: usize,
    pub profile: String,
    pub environment: String,
    pub role: String,
    pub hours: u32,
}

/// Ask for profile, environment, role and duration.
///
/// # Errors
///
/// Returns `ValidationError::NoProfiles` before prompting if nothing is
/// configured, `NoEnvironments`/`NoRoles` when a selection has nothing to
/// offer, and `InvalidDuration` for hours outside 1..=12.
pub fn select(vault: &Vault, prompter: &mut dyn Prompter) -> Result<Selection> {
    let config = vault.config();
    if config.profiles.is_empty() {
        return Err(ValidationError::NoProfiles.into());
    }

    let names: Vec<String> = config.profiles.iter().map(|p| p.name.clone()).collect();
    let profile_index = prompter.select("(1/5) Select a profile to use", &names)?;
    let profile = &config.profiles[profile_index];

    if profile.environments.is_empty() {
        return Err(ValidationError::NoEnvironments(profile.name.clone()).into());
    }
    let names: Vec<String> = profile.environments.iter().map(|e| e.name.clone()).collect();
    let environment_index = prompter.select("(2/5) Choose an environment to log into", &names)?;
    let environment = &profile.environments[environment_index];

    if environment.roles.is_empty() {
        return Err(ValidationError::NoRoles(environment.name.clone()).into());
    }
    let role =
        &environment.roles[prompter.select("(3/5) Choose an IAM role to use", &environment.roles)?];

    let hours = prompter.number(
        "(4/5) Specify session duration (in hours, 1-12)",
        constants::DEFAULT_SESSION_HOURS,
        constants::MIN_SESSION_HOURS,
        constants::MAX_SESSION_HOURS,
    )?;
    if !(constants::MIN_SESSION_HOURS..=constants::MAX_SESSION_HOURS).contains(&hours) {
        return Err(ValidationError::InvalidDuration {
            got: hours,
            min: constants::MIN_SESSION_HOURS,
            max: constants::MAX_SESSION_HOURS,
        }
        .into());
    }

    Ok(Selection {
        profile_index,
        environment_index,
        profile: profile.name.clone(),
        environment: environment.name.clone(),
        role: role.clone(),
        hours,
    })
}

/// Run the full login flow and cache the resulting session.
///
/// `os_user` feeds the role session name. The vault is saved exactly once,
/// after credentials were issued.
///
/// # Errors
///
/// Propagates selection, STS and save errors. On any error the configuration
/// file is left untouched.
pub fn login(
    vault: &mut Vault,
    prompter: &mut dyn Prompter,
    connector: &dyn StsConnector,
    os_user: &str,
) -> Result<Session> {
    let selection = select(vault, prompter)?;

    let (credentials, account_id, region) = {
        let profile = &vault.config().profiles[selection.profile_index];
        let environment = &profile.environments[selection.environment_index];
        (
            profile.credentials.clone(),
            environment.account_id.clone(),
            environment.region.clone(),
        )
    };

    let role_arn = sts::role_arn(&account_id, &selection.role)?;
    let sts_region = credentials
        .region
        .clone()
        .unwrap_or_else(|| constants::DEFAULT_STS_REGION.to_string());
    info!(role = %role_arn, region = %sts_region, "assuming role");

    let client = connector.connect(&credentials, &sts_region)?;
    let identity = client.identify()?;
    let principal = identity.principal_name().to_string();
    debug!(account = %identity.account_id, principal = %principal, "identified caller");
    let mfa_serial = sts::mfa_arn(&identity.account_id, &principal)?;

    let mfa_code = prompter.text("(5/5) Enter your MFA code")?;
    let request = AssumeRoleRequest {
        role_arn,
        role_name: selection.role.clone(),
        session_name: sts::role_session_name(
            os_user,
            &principal,
            &selection.environment,
            &selection.role,
            Utc::now().timestamp_millis(),
        ),
        mfa_serial,
        mfa_code: mfa_code.trim().to_string(),
        duration_seconds: (selection.hours * 3600) as i32,
    };
    let issued = client.assume_role(&request)?;

    let session = Session::from_credentials(
        &selection.profile,
        &selection.environment,
        &selection.role,
        &region,
        issued,
    );
    let sessions = std::mem::take(&mut vault.config_mut().sessions);
    vault.config_mut().sessions = session::upsert(sessions, session.clone());
    vault.save()?;

    info!(session = %session.name, expiry = %session.expiry, "session cached");
    Ok(session)
}
