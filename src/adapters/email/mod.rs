//! Mail transport adapters.

mod mock;
mod resend;

pub use mock::MockMailTransport;
pub use resend::ResendMailTransport;
