//! Business services containing domain logic and use cases.

pub mod clock;
pub mod profile;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use profile::ProfileSync;
pub use session::{Admission, Prerequisite, SessionGuard};
pub use verification::{
    validate_code, BusyIndicator, CheckOutcome, ClientFlowState, Countdown, FlowConfig,
    FlowDependencies, FlowEvent, FlowMessage, MockVerificationGateway, PhoneFormatter,
    ResendThrottle, StartOutcome, SyncState, VerificationFlow, VerificationGateway,
};
