mod authentication_provider;
mod callable_function;

pub use authentication_provider::AuthenticationProvider;
pub use callable_function::CallableFunction;
