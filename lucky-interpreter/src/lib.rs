pub mod environment;
pub mod error;
pub mod evaluator;
pub mod value;

pub use environment::Environment;
pub use error::{IllegalOperation, RuntimeError};
pub use evaluator::{eval_program, Interpreter};
pub use value::Value;
