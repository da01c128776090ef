use pv_core::domain::entities::{Channel, PhoneNumber};
use pv_core::services::{CheckOutcome, VerificationGateway};
use pv_shared::config::ProviderConfig;

use crate::verify::{create_verification_gateway, ConsoleVerificationGateway};

#[tokio::test]
async fn test_console_gateway_approves_configured_code_once() {
    let gateway = ConsoleVerificationGateway::new("123456");
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();

    assert_eq!(
        gateway.check_verification(&phone, "123456").await,
        Ok(CheckOutcome::Denied)
    );

    gateway.start_verification(&phone, Channel::Sms).await.unwrap();
    assert_eq!(
        gateway.check_verification(&phone, "000000").await,
        Ok(CheckOutcome::Denied)
    );
    assert_eq!(
        gateway.check_verification(&phone, "123456").await,
        Ok(CheckOutcome::Approved)
    );
    assert_eq!(
        gateway.check_verification(&phone, "123456").await,
        Ok(CheckOutcome::Denied)
    );
}

#[tokio::test]
async fn test_factory_builds_console_gateway_for_mock_provider() {
    let gateway = create_verification_gateway(&ProviderConfig::default()).unwrap();
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();

    assert!(gateway.start_verification(&phone, Channel::Sms).await.is_ok());
}
