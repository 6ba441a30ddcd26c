pub mod envelope;
pub mod session;

pub use envelope::Envelope;
pub use session::{Credentials, Session, UserProfile};
