//! Parameter names of top-level functions, read from Rust source text.
//!
//! Names are not recoverable from a function value at runtime, so they are
//! taken from the declaration itself.

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use syn::{ext::IdentExt, File, FnArg, Item, ItemFn, Pat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
    #[error("function {function} not found in file {}", .path.display())]
    NotFound { function: String, path: PathBuf },
}

pub fn parse_source(path: &Path) -> Result<File, SignatureError> {
    let src = fs::read_to_string(path).map_err(|source| SignatureError::Io {
        path: path.to_owned(),
        source,
    })?;
    syn::parse_file(&src).map_err(|source| SignatureError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// First top-level `fn` called `name`. Functions inside modules, impls or
/// other function bodies are not considered.
pub fn find_function<'f>(file: &'f File, name: &str) -> Option<&'f ItemFn> {
    file.items.iter().find_map(|item| match item {
        Item::Fn(func) if func.sig.ident == name => Some(func),
        _ => None,
    })
}

/// Declared parameter names, in order.
///
/// A parameter bound by anything other than a plain identifier (`_`, tuple or
/// struct destructuring) is named `arg{index}`, or `arg{index}_{n}` when a
/// declared parameter already uses that name.
pub fn parameter_names(func: &ItemFn) -> Vec<String> {
    let declared: Vec<Option<String>> = func
        .sig
        .inputs
        .iter()
        .map(|arg| match arg {
            FnArg::Typed(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat) => Some(pat.ident.unraw().to_string()),
                _ => None,
            },
            FnArg::Receiver(_) => Some("self".to_owned()),
        })
        .collect();

    let mut names: Vec<String> = Vec::with_capacity(declared.len());
    for (index, name) in declared.iter().enumerate() {
        let name = match name {
            Some(name) => name.clone(),
            None => {
                let taken = |candidate: &str| {
                    declared.iter().flatten().any(|name| name == candidate)
                        || names.iter().any(|name| name == candidate)
                };
                let mut candidate = format!("arg{index}");
                let mut n = 0;
                while taken(&candidate) {
                    n += 1;
                    candidate = format!("arg{index}_{n}");
                }
                candidate
            }
        };
        names.push(name);
    }
    names
}

pub fn extract_parameter_names(path: &Path, function: &str) -> Result<Vec<String>, SignatureError> {
    let file = parse_source(path)?;
    let func = find_function(&file, function).ok_or_else(|| SignatureError::NotFound {
        function: function.to_owned(),
        path: path.to_owned(),
    })?;
    Ok(parameter_names(func))
}
