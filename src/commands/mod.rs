pub mod call;

pub use call::handle_call;
