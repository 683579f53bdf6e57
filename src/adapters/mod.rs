mod firebase_auth_provider;
mod firebase_callable_function;

pub use firebase_auth_provider::FirebaseAuthProvider;
pub use firebase_callable_function::FirebaseCallableFunction;
