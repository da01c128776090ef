mod console_tests;
mod http_gateway_tests;
