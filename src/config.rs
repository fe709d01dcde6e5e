use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Function skipped by every file scan.
    pub entry_point: String,
    /// Where [`StubFile::from_config`](crate::codegen::StubFile::from_config) writes stubs.
    pub stub_path: PathBuf,
    /// Client-side helper the generated stubs call.
    pub rpc_call: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            entry_point: "main".to_owned(),
            stub_path: PathBuf::from("rpc_functions.ts"),
            rpc_call: "rpc_call".to_owned(),
        }
    }
}
