//! Expose plain Rust functions to a TypeScript client.
//!
//! Source files are scanned for function declarations, registered functions
//! get a generated TypeScript stub that calls them by name, and calls coming
//! back are dispatched by name with untyped [`Value`] arguments.

pub mod bridge;
pub mod catalog;
pub mod codegen;
pub mod config;
pub mod dispatcher;
pub mod function;
mod macros;
pub mod signature;
pub mod typemap;
pub mod types;

pub use bridge::{Bridge, RegisterError};
pub use catalog::{Catalog, CatalogError, FunctionInfo};
pub use codegen::{StubFile, StubSink};
pub use config::BridgeConfig;
pub use dispatcher::{CallResult, DispatchError, Dispatcher, RpcFunctionInfo};
pub use function::{identify, rpc_fn, rpc_fn_named, FnRpc};
pub use futures::future::BoxFuture;
pub use types::{Arguments, Decode, Encode, Signature, Type, TypeMismatch, Typed, Value};

pub trait RpcFunction: Send + Sync {
    type Domain: Arguments + Send;
    type Range: Encode + Typed + Send;

    /// Name the function is declared under, and called by.
    fn name(&self) -> &str;
    fn call(&self, args: Self::Domain) -> BoxFuture<'_, Self::Range>;
}
