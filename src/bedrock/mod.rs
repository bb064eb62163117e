pub mod invoker;

pub use invoker::{BedrockInvoker, ModelInvoker};
