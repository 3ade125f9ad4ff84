/// The publishing side of the demand protocol.
pub mod publisher;
/// The receiving side of the demand protocol.
pub mod subscriber;
