use crate::{
    catalog::{Catalog, CatalogError, FunctionInfo},
    codegen::{typescript_stub, StubSink},
    config::BridgeConfig,
    dispatcher::{CallResult, Dispatcher, RpcFunctionInfo},
    typemap::{map_return, map_type, UnmappedType},
    types::{Signature, Value},
    RpcFunction,
};
use std::{io, path::Path};
use thiserror::Error;
use tracing::info;

/// Connects scanned Rust source, generated TypeScript stubs and the call
/// dispatcher.
///
/// Scan the files declaring the exposed functions, [`register`] each
/// function, then serve calls. Registration needs `&mut self`, so it is over
/// by the time the bridge is shared (e.g. behind an `Arc`) with whatever
/// serves calls.
///
/// [`register`]: Bridge::register
pub struct Bridge<S> {
    config: BridgeConfig,
    catalog: Catalog,
    dispatcher: Dispatcher,
    stubs: S,
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("unknown source file for function {0}: was the file containing it scanned?")]
    UnknownSourceFile(String),
    #[error("function {function} declares {declared} parameters but takes {runtime} arguments")]
    ArityMismatch {
        function: String,
        declared: usize,
        runtime: usize,
    },
    #[error("function {function}, parameter {index}: {source}")]
    UnmappedParameter {
        function: String,
        index: usize,
        #[source]
        source: UnmappedType,
    },
    #[error("function {function}, return value: {source}")]
    UnmappedReturn {
        function: String,
        #[source]
        source: UnmappedType,
    },
    #[error("writing stub: {0}")]
    Stub(#[from] io::Error),
}

impl<S: StubSink> Bridge<S> {
    pub fn new(stubs: S) -> Self {
        Self::with_config(BridgeConfig::default(), stubs)
    }

    pub fn with_config(config: BridgeConfig, stubs: S) -> Self {
        Self {
            catalog: Catalog::new(config.entry_point.clone()),
            dispatcher: Dispatcher::new(),
            config,
            stubs,
        }
    }

    pub fn scan_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        self.catalog.scan_file(path)
    }

    /// Exposes `rpc_function`: appends its stub and makes it callable by name.
    ///
    /// Either everything happens or nothing does. On error the catalog record,
    /// the stubs and the dispatcher are left as they were.
    pub fn register<RFn>(&mut self, rpc_function: RFn) -> Result<&FunctionInfo, RegisterError>
    where
        RFn: RpcFunction + 'static,
    {
        let Self {
            config,
            catalog,
            dispatcher,
            stubs,
        } = self;

        let name = rpc_function.name().to_owned();
        let info = catalog
            .get_mut(&name)
            .ok_or_else(|| RegisterError::UnknownSourceFile(name.clone()))?;

        let Signature { domain, range } = Signature::infer::<RFn::Domain, RFn::Range>();
        if info.parameter_names.len() != domain.len() {
            return Err(RegisterError::ArityMismatch {
                function: name,
                declared: info.parameter_names.len(),
                runtime: domain.len(),
            });
        }

        let parameter_target_types = domain
            .iter()
            .enumerate()
            .map(|(index, tag)| {
                map_type(tag).map_err(|source| RegisterError::UnmappedParameter {
                    function: name.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let return_target_type =
            map_return(&range).map_err(|source| RegisterError::UnmappedReturn {
                function: name.clone(),
                source,
            })?;

        let registered = FunctionInfo {
            parameter_source_types: domain,
            parameter_target_types,
            return_target_type: Some(return_target_type),
            ..info.clone()
        };
        stubs.append(&typescript_stub(&registered, &config.rpc_call))?;
        dispatcher.add(rpc_function);
        *info = registered;

        info!(
            function = %name,
            file = %info.source_file.display(),
            "registered rpc function"
        );
        Ok(&*info)
    }

    pub async fn call(&self, name: &str, args: Vec<Value>) -> CallResult {
        self.dispatcher.call(name, args).await
    }

    /// [`call`](Bridge::call) for callers outside an async runtime.
    pub fn call_blocking(&self, name: &str, args: Vec<Value>) -> CallResult {
        futures::executor::block_on(self.call(name, args))
    }

    pub fn functions(&self) -> Vec<RpcFunctionInfo> {
        self.dispatcher.rpc_functions()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn stubs(&self) -> &S {
        &self.stubs
    }
}
