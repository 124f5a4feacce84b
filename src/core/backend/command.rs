//! Backend that shells out to an XML-RPC command line client.
//!
//! Every call runs:
//!
//! ```text
//! rtorrentrpc <scgi_address> <operation> <target>
//! ```
//!
//! and returns what the client printed on its standard output.
use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Constructor;
use montorrent_located_error::DynError;
use tokio::process::Command;

use super::RemoteBackend;
use crate::core::error::Error;

#[derive(Constructor, Debug, Clone)]
pub struct CommandBackend {
    program: String,
    scgi_address: String,
}

#[async_trait]
impl RemoteBackend for CommandBackend {
    async fn invoke(&self, operation: &str, target: &str) -> Result<Vec<u8>, Error> {
        let output = Command::new(&self.program)
            .arg(&self.scgi_address)
            .arg(operation)
            .arg(target)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| transport_error(operation, target, Arc::new(err)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(transport_error(
                operation,
                target,
                Arc::new(CommandFailed {
                    program: self.program.clone(),
                    status: output.status.to_string(),
                    stderr: stderr.trim().to_owned(),
                }),
            ));
        }

        Ok(output.stdout)
    }
}

#[track_caller]
fn transport_error(operation: &str, target: &str, err: DynError) -> Error {
    Error::Transport {
        operation: operation.to_owned(),
        target: target.to_owned(),
        source: err.into(),
    }
}

#[derive(thiserror::Error, Debug)]
#[error("`{program}` exited with {status}: {stderr}")]
struct CommandFailed {
    program: String,
    status: String,
    stderr: String,
}
