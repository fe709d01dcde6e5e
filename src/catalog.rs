use crate::{
    signature::{self, SignatureError},
    types::Type,
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use syn::{ext::IdentExt, Item};
use thiserror::Error;
use tracing::{debug, info};

/// Everything known about one function exposed over rpc.
///
/// A file scan fills in the name, file and parameter names. The type fields
/// stay empty until the function is registered with a
/// [`Bridge`](crate::Bridge).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionInfo {
    pub name: String,
    pub source_file: PathBuf,
    pub parameter_names: Vec<String>,
    pub parameter_source_types: Vec<Type>,
    pub parameter_target_types: Vec<&'static str>,
    pub return_target_type: Option<&'static str>,
}

impl FunctionInfo {
    fn discovered(name: String, source_file: &Path, parameter_names: Vec<String>) -> Self {
        Self {
            name,
            source_file: source_file.to_owned(),
            parameter_names,
            parameter_source_types: Vec::new(),
            parameter_target_types: Vec::new(),
            return_target_type: None,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.return_target_type.is_some()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error("function {name} is declared in both {} and {}", .first.display(), .second.display())]
    DuplicateFunction {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("unknown source file for function {0}: was the file containing it scanned?")]
    UnknownSourceFile(String),
}

/// Index of scanned source files: file -> function -> [`FunctionInfo`], and
/// function -> file.
///
/// Function names are unique across all scanned files; scanning a file that
/// redeclares a name already owned by another file fails.
#[derive(Debug)]
pub struct Catalog {
    entry_point: String,
    functions_in_file: BTreeMap<PathBuf, BTreeMap<String, FunctionInfo>>,
    function_to_file: BTreeMap<String, PathBuf>,
}

impl Catalog {
    pub fn new(entry_point: impl Into<String>) -> Self {
        Self {
            entry_point: entry_point.into(),
            functions_in_file: BTreeMap::new(),
            function_to_file: BTreeMap::new(),
        }
    }

    /// Records every top-level function of `path` except the entry point and
    /// returns how many were recorded. Nothing is recorded if the file cannot
    /// be read or parsed, or if it clashes with another file.
    ///
    /// Re-scanning keeps the registered types of a function whose parameter
    /// names are unchanged; a function whose parameters changed goes back to
    /// unregistered.
    pub fn scan_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let path = path.as_ref();
        let file = signature::parse_source(path)?;

        let mut found = BTreeMap::new();
        for item in &file.items {
            let Item::Fn(func) = item else { continue };
            let name = func.sig.ident.unraw().to_string();
            if name == self.entry_point {
                continue;
            }
            if let Some(first) = self.function_to_file.get(&name) {
                if first.as_path() != path {
                    return Err(CatalogError::DuplicateFunction {
                        name,
                        first: first.clone(),
                        second: path.to_owned(),
                    });
                }
            }
            // Only the first of two same-named declarations counts, as in
            // `signature::find_function`.
            found.entry(name.clone()).or_insert_with(|| {
                let parameter_names = signature::parameter_names(func);
                debug!(function = %name, params = ?parameter_names, "discovered function");
                FunctionInfo::discovered(name, path, parameter_names)
            });
        }

        let count = found.len();
        for name in found.keys() {
            self.function_to_file.insert(name.clone(), path.to_owned());
        }
        let recorded = self.functions_in_file.entry(path.to_owned()).or_default();
        for (name, info) in found {
            let unchanged = recorded
                .get(&name)
                .map_or(false, |prev| prev.parameter_names == info.parameter_names);
            if !unchanged {
                recorded.insert(name, info);
            }
        }
        info!(file = %path.display(), functions = count, "scanned source file");
        Ok(count)
    }

    pub fn lookup_file(&self, name: &str) -> Result<&Path, CatalogError> {
        self.function_to_file
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| CatalogError::UnknownSourceFile(name.to_owned()))
    }

    pub fn get(&self, name: &str) -> Option<&FunctionInfo> {
        let file = self.function_to_file.get(name)?;
        self.functions_in_file.get(file)?.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FunctionInfo> {
        let file = self.function_to_file.get(name)?;
        self.functions_in_file.get_mut(file)?.get_mut(name)
    }

    /// Functions recorded for `path`, ordered by name.
    pub fn functions_in<'c>(&'c self, path: &Path) -> impl Iterator<Item = &'c FunctionInfo> {
        self.functions_in_file
            .get(path)
            .into_iter()
            .flat_map(BTreeMap::values)
    }

    pub fn len(&self) -> usize {
        self.function_to_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.function_to_file.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new("main")
    }
}
