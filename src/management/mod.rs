mod session;

pub use session::AuthSession;
pub use session::SharedSession;
