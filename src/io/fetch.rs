//! Retrieval of remote images into the working directory.
//!
//! Network access goes through the [`Transport`] trait so the batch loop can
//! run against something other than HTTP (tests use an in-memory transport).
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::params::FetchParams;
use crate::error::{Error, Result};
use crate::io::source::SourceRef;

/// Status line and streaming body of a single GET.
pub struct Retrieved {
    pub status: u16,
    pub body: Box<dyn Read>,
}

pub trait Transport {
    fn get(&self, url: &str) -> Result<Retrieved>;
}

/// Blocking `reqwest` transport; one synchronous request per call.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("inkprep/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Retrieved> {
        let response = self.client.get(url).send()?;
        Ok(Retrieved {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

pub fn local_path(source: &SourceRef, params: &FetchParams) -> PathBuf {
    params
        .working_dir
        .join(format!("{}.{}", source.local_name, params.extension))
}

/// Retrieve one source and stream its body verbatim to the working directory.
/// Only HTTP 200 counts as success; nothing is written otherwise.
pub fn fetch_one(
    transport: &dyn Transport,
    source: &SourceRef,
    params: &FetchParams,
) -> Result<PathBuf> {
    let url = source.retrieval_url(&params.url_suffix);
    debug!("GET {}", url);

    let mut retrieved = transport.get(&url)?;
    if retrieved.status != 200 {
        return Err(Error::HttpStatus {
            url,
            status: retrieved.status,
        });
    }

    let path = local_path(source, params);
    if let Err(e) = write_stream(&url, &path, &mut retrieved.body) {
        // A partial download must not be picked up as a raw image later
        let _ = std::fs::remove_file(&path);
        return Err(e);
    }
    Ok(path)
}

/// Read errors are network failures, write errors are persist failures.
fn write_stream(url: &str, path: &Path, body: &mut dyn Read) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::persist(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut buf = [0u8; 8192];
    let mut bytes = 0usize;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(Error::Transfer {
                    url: url.to_string(),
                    source,
                });
            }
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::persist(path, e))?;
        bytes += n;
    }
    writer.flush().map_err(|e| Error::persist(path, e))?;
    debug!("Wrote {} bytes to {:?}", bytes, path);
    Ok(())
}
