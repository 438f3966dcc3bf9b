pub mod session;
pub mod stream;
pub mod trace;

pub use session::*;
pub use stream::*;
pub use trace::*;
