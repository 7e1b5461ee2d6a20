//! Type aliases for domain concepts.

use zeroize::Zeroizing;

/// A passphrase held in memory that is wiped on drop.
pub type Passphrase = Zeroizing<String>;

/// A twelve digit AWS account id.
pub type AccountId = String;

/// An IAM role name.
pub type RoleName = String;

/// A composite `profile/environment/role` session name.
pub type SessionName = String;
