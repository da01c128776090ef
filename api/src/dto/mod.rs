pub mod verification;

pub use verification::{CheckVerificationRequest, StartVerificationRequest};
