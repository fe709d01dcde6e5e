//! TypeScript client stubs and the file they are collected in.

use crate::{catalog::FunctionInfo, config::BridgeConfig, typemap::VOID};
use std::{
    fs::{self, OpenOptions},
    io::{self, Write as _},
    path::{Path, PathBuf},
};

/// Renders the client stub for a registered function:
///
/// ```text
/// export function add(a: number, b: number): number {
///     return rpc_call("add", a, b);
/// }
/// ```
pub fn typescript_stub(info: &FunctionInfo, rpc_call: &str) -> String {
    let params = info
        .parameter_names
        .iter()
        .zip(&info.parameter_target_types)
        .map(|(name, ts)| format!("{name}: {ts}"))
        .collect::<Vec<_>>()
        .join(", ");
    let returns = info.return_target_type.unwrap_or(VOID);

    let args: String = info
        .parameter_names
        .iter()
        .map(|name| format!(", {name}"))
        .collect();
    let call = format!("{rpc_call}(\"{}\"{args})", info.name);

    let body = if returns == VOID {
        format!("{call};")
    } else {
        format!("return {call};")
    };
    format!(
        "export function {}({params}): {returns} {{\n    {body}\n}}\n",
        info.name
    )
}

/// Client-side `rpc_call` helper the stubs rely on. Each call sends
/// `{type, function, args, id}` as JSON over a WebSocket and resolves with the
/// reply carrying the same `id`.
pub fn typescript_prelude(rpc_call: &str, url: &str) -> String {
    format!(
        r#"const ws = new WebSocket("{url}");

let id_counter = 0;
const pending = new Map<number, (value: any) => void>();

ws.onmessage = (event) => {{
    const reply = JSON.parse(event.data);
    const resolve = pending.get(reply.id);
    if (resolve) {{
        pending.delete(reply.id);
        resolve(reply);
    }}
}};

function {rpc_call}(functionName: string, ...args: any[]): any {{
    return new Promise((resolve) => {{
        const id = id_counter++;
        pending.set(id, resolve);
        ws.send(JSON.stringify({{ type: "rpc-call", function: functionName, args: args, id: id }}));
    }});
}}

"#
    )
}

/// Destination of generated stubs. Blocks are only ever appended.
pub trait StubSink {
    fn append(&mut self, block: &str) -> io::Result<()>;
}

impl StubSink for String {
    fn append(&mut self, block: &str) -> io::Result<()> {
        self.push_str(block);
        self.push('\n');
        Ok(())
    }
}

impl<S: StubSink + ?Sized> StubSink for &mut S {
    fn append(&mut self, block: &str) -> io::Result<()> {
        (**self).append(block)
    }
}

/// A stubs file on disk, reopened in append mode for every block.
#[derive(Debug, Clone)]
pub struct StubFile {
    path: PathBuf,
}

impl StubFile {
    /// Appends to `path` without touching what is already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Empties `path`, then appends to it.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        Self::create_with_prelude(path, "")
    }

    /// Replaces the contents of `path` with `prelude`, then appends to it.
    pub fn create_with_prelude(path: impl Into<PathBuf>, prelude: &str) -> io::Result<Self> {
        let path = path.into();
        fs::write(&path, prelude)?;
        Ok(Self { path })
    }

    pub fn from_config(config: &BridgeConfig) -> io::Result<Self> {
        Self::create(config.stub_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StubSink for StubFile {
    fn append(&mut self, block: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())?;
        file.write_all(b"\n")
    }
}
