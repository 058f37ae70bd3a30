//! HTTP installer: download a package artifact into the output folder.
//!
//! Artifacts live at `<remote>/<name>/<name>-<version>.zip` and are stored as
//! `<output_folder>/<name>-<version>.zip`. The body is streamed into a temp
//! file in the output folder and renamed into place once complete, so a
//! failed download never leaves a partial artifact behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use picl_schema::PackageSpec;
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use super::{InstallOutcome, Installer, OperationError, OutputLock};

/// [`Installer`] that fetches artifacts over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpInstaller {
    client: Client,
}

impl HttpInstaller {
    /// Create an installer with its own client.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Http`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, OperationError> {
        let client = Client::builder().user_agent(crate::USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Create an installer sharing an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Build the download URL for `pkg` under `base`.
///
/// A trailing slash on `base` is optional: `http://host/repo` and
/// `http://host/repo/` both yield `http://host/repo/<name>/<name>-<version>.zip`.
///
/// # Errors
///
/// Returns [`OperationError::InvalidUrl`] if `base` cannot carry a path.
pub fn artifact_url(base: &Url, pkg: &PackageSpec) -> Result<Url, OperationError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| OperationError::InvalidUrl(base.to_string()))?;
        segments
            .pop_if_empty()
            .push(pkg.name.as_str())
            .push(&pkg.artifact_file_name());
    }
    Ok(url)
}

#[async_trait]
impl Installer for HttpInstaller {
    async fn install(
        &self,
        pkg: &PackageSpec,
        output_folder: &Path,
        remote_url: &Url,
    ) -> Result<InstallOutcome, OperationError> {
        let dest = crate::paths::artifact_path(output_folder, pkg)?;
        let url = artifact_url(remote_url, pkg)?;

        fs::create_dir_all(output_folder).map_err(|e| {
            OperationError::context(
                "Failed to create output folder",
                format!("{}: {e}", output_folder.display()),
            )
        })?;
        let _lock = OutputLock::acquire(output_folder)?;

        if dest.exists() {
            tracing::debug!("{} already present at {}", pkg, dest.display());
            return Ok(InstallOutcome::AlreadyPresent { path: dest });
        }

        tracing::debug!("Downloading {pkg} from {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;

        let mut tmp = NamedTempFile::new_in(output_folder)?;
        let mut stream = response.bytes_stream();
        let mut hasher = Sha256::new();
        let mut bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            tmp.write_all(&chunk)?;
            hasher.update(&chunk);
            bytes += chunk.len() as u64;
        }

        tmp.as_file().sync_all()?;
        tmp.persist(&dest).map_err(|e| OperationError::Io(e.error))?;

        let sha256 = hex::encode(hasher.finalize());
        tracing::debug!("Stored {} ({bytes} bytes, sha256 {sha256})", dest.display());

        Ok(InstallOutcome::Installed {
            path: dest,
            bytes,
            sha256,
        })
    }
}
