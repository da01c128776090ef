pub mod identity;
pub mod profile;

pub use identity::{IdentityProvider, MockIdentityProvider};
pub use profile::{MockProfileStore, ProfileStore};
