//! Test harness wiring a flow to in-memory collaborators

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::repositories::MockProfileStore;
use crate::services::clock::ManualClock;
use crate::services::profile::ProfileSync;
use crate::services::verification::{
    FlowConfig, FlowDependencies, MockVerificationGateway, ResendThrottle, VerificationFlow,
};

pub const CORRECT_CODE: &str = "482916";

pub struct Harness {
    pub gateway: Arc<MockVerificationGateway>,
    pub store: Arc<MockProfileStore>,
    pub clock: Arc<ManualClock>,
    pub throttle: Arc<ResendThrottle>,
    pub deps: FlowDependencies,
    pub user_id: Uuid,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_gateway(MockVerificationGateway::new(CORRECT_CODE))
    }

    pub fn with_gateway(gateway: MockVerificationGateway) -> Self {
        Self::with_parts(gateway, FlowConfig::default())
    }

    pub fn with_config(config: FlowConfig) -> Self {
        Self::with_parts(MockVerificationGateway::new(CORRECT_CODE), config)
    }

    fn with_parts(gateway: MockVerificationGateway, config: FlowConfig) -> Self {
        let gateway = Arc::new(gateway);
        let store = Arc::new(MockProfileStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ));
        let profile_sync = Arc::new(ProfileSync::new(store.clone(), Duration::from_secs(5)));
        let deps = FlowDependencies::from_config(gateway.clone(), profile_sync, clock.clone(), config);
        let throttle = Arc::clone(&deps.throttle);

        Self {
            gateway,
            store,
            clock,
            throttle,
            deps,
            user_id: Uuid::new_v4(),
        }
    }

    pub fn flow(&self) -> VerificationFlow {
        VerificationFlow::new(self.user_id, &self.deps)
    }
}
