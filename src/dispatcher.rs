use crate::{
    types::{Arguments, ArgsError, Encode, Signature, Type, TypeMismatch, Value},
    BoxFuture, RpcFunction,
};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tracing::{trace, warn};

/// Maps [`RpcFunction`] names to a type-erased callable.
///
/// Adding a function under a name that is already taken replaces it.
/// Functions can be called via [`call`](Dispatcher::call).
#[derive(Default)]
pub struct Dispatcher {
    rpc_functions: BTreeMap<String, Arc<dyn DynamicRpcFunction>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<RFn>(&mut self, rpc_function: RFn)
    where
        RFn: RpcFunction + 'static,
    {
        let name = rpc_function.name().to_owned();
        let typed = Arc::new(TypedRpcFunction {
            rpc_function,
            signature: Signature::infer::<RFn::Domain, RFn::Range>(),
        });
        self.rpc_functions.insert(name, typed);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rpc_functions.contains_key(name)
    }

    /// Calls `name` with positional `args`. Functions returning `()` yield
    /// `None`.
    pub async fn call(&self, name: &str, args: Vec<Value>) -> CallResult {
        use DispatchError::*;
        let Some(rfn) = self.rpc_functions.get(name) else {
            warn!(function = name, "call to unknown function");
            return Err(NoSuchFunction(name.to_owned()));
        };

        let expected = rfn.signature().domain.len();
        if args.len() != expected {
            return Err(ArgumentCountMismatch {
                expected,
                found: args.len(),
            });
        }

        trace!(function = name, ?args, "dispatching call");
        let retval = rfn.call(args).map_err(|err| match err {
            ArgsError::Count { expected, found } => ArgumentCountMismatch { expected, found },
            ArgsError::Type { index, mismatch } => ArgumentType { index, mismatch },
        })?;
        Ok(retval.await)
    }

    pub fn rpc_functions(&self) -> Vec<RpcFunctionInfo> {
        self.rpc_functions
            .iter()
            .map(|(name, rfn)| RpcFunctionInfo {
                name: name.clone(),
                signature: rfn.signature().clone(),
            })
            .collect()
    }
}

pub type CallResult = Result<Option<Value>, DispatchError>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcFunctionInfo {
    pub name: String,
    pub signature: Signature,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("function not found: {0}")]
    NoSuchFunction(String),
    #[error("argument count mismatch: expected {expected}, got {found}")]
    ArgumentCountMismatch { expected: usize, found: usize },
    #[error("argument {index}: {mismatch}")]
    ArgumentType { index: usize, mismatch: TypeMismatch },
}

struct TypedRpcFunction<RFn> {
    rpc_function: RFn,
    signature: Signature,
}

/// A type-erased version of the main trait, RpcFunction
trait DynamicRpcFunction: Send + Sync {
    fn signature(&self) -> &Signature;
    fn call(&self, args: Vec<Value>) -> Result<BoxFuture<'_, Option<Value>>, ArgsError>;
}

impl<RFn> DynamicRpcFunction for TypedRpcFunction<RFn>
where
    RFn: RpcFunction,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: Vec<Value>) -> Result<BoxFuture<'_, Option<Value>>, ArgsError> {
        let decoded_args = <RFn::Domain as Arguments>::decode_args(args)?;
        let no_value = self.signature.range == Type::Nil;
        let call_fut = self
            .rpc_function
            .call(decoded_args)
            .map(move |retval| (!no_value).then(|| <RFn::Range as Encode>::encode(retval)));
        Ok(call_fut.boxed())
    }
}
