pub mod credentials;
pub mod inference_output;
pub mod outbound_attempt;
pub mod outbound_request;
