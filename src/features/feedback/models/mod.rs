mod feedback;

pub use feedback::{CreateFeedback, Feedback};
