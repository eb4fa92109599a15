mod actuator;
mod config;
mod feedback;
mod presentation;
mod recording;
mod scheduler;
mod session;
mod table;
pub use actuator::*;
pub use config::*;
pub use feedback::*;
pub use presentation::*;
pub use recording::*;
pub use scheduler::*;
pub use session::*;
pub use table::*;
