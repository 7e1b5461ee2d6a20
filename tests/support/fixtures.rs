//! Test fixtures and constants.

/// A configuration with one profile and two cached sessions, one expired.
pub const SAMPLE_CONFIG: &str = r#"[[profiles]]
name = "acme"

[profiles.credentials]
access_key_id = "AKIAEXAMPLEACME"
secret_access_key = "hub-secret"
region = "us-east-1"

[[profiles.environments]]
name = "dev"
account_id = "111122223333"
region = "eu-west-1"
roles = ["developer", "admin"]

[[profiles.environments]]
name = "prod"
account_id = "444455556666"
region = "us-west-2"
roles = ["readonly"]

[[sessions]]
name = "acme/dev/developer"
region = "eu-west-1"
access_key_id = "ASIAOLD"
secret_access_key = "old-secret"
session_token = "old-token"
expiry = "2001-01-01T00:00:00Z"

[[sessions]]
name = "acme/prod/readonly"
region = "us-west-2"
access_key_id = "ASIAFRESH"
secret_access_key = "fresh-secret"
session_token = "fresh-token"
expiry = "2999-01-01T00:00:00Z"
"#;

/// A configuration without any profiles.
pub const EMPTY_CONFIG: &str = "profiles = []\nsessions = []\n";

/// Passphrase used by encrypted fixtures.
pub const PASSPHRASE: &str = "correct horse battery staple";
