mod mocks;
mod throttle_tests;
