pub mod question_flow;
pub mod session;

pub use question_flow::QuestionGenerator;
pub use session::{InFlight, Operation, SessionState};
