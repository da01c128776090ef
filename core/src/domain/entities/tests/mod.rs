mod phone_number_tests;
mod profile_tests;
mod verification_attempt_tests;
