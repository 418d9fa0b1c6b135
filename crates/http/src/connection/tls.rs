//! Trust configuration for https fetches.
//!
//! Server certificates are always verified against a root store and the
//! requested host name; there is no way to switch verification off.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_rustls::rustls::pki_types::CertificateDer;
use tokio_rustls::rustls::pki_types::pem::PemObject;
use tokio_rustls::rustls::{ClientConfig, RootCertStore, crypto};
use tracing::{debug, warn};

use crate::protocol::FetchError;

/// Where the trusted root certificates come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrustStore {
    /// The operating system's certificate store, falling back to the Mozilla roots
    /// when it yields nothing usable
    #[default]
    Platform,
    /// The Mozilla root program bundled with the binary
    Mozilla,
    /// A PEM bundle on disk, used exclusively
    PemFile(PathBuf),
}

impl TrustStore {
    /// Loads the root certificates.
    ///
    /// # Errors
    ///
    /// Fails if a PEM bundle can't be read or contains no usable certificate.
    pub fn root_store(&self) -> Result<RootCertStore, FetchError> {
        match self {
            TrustStore::Platform => Ok(platform_roots()),
            TrustStore::Mozilla => Ok(mozilla_roots()),
            TrustStore::PemFile(path) => {
                let certs = CertificateDer::pem_file_iter(path)
                    .map_err(|e| FetchError::trust_store(format!("{}: {e}", path.display())))?
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| FetchError::trust_store(format!("{}: {e}", path.display())))?;

                let mut root_store = RootCertStore::empty();
                let (added, ignored) = root_store.add_parsable_certificates(certs);
                debug!(path = %path.display(), added, ignored, "loaded pem trust store");

                if root_store.is_empty() {
                    return Err(FetchError::trust_store(format!("{}: no usable certificate", path.display())));
                }
                Ok(root_store)
            }
        }
    }
}

fn platform_roots() -> RootCertStore {
    let mut root_store = RootCertStore::empty();
    match rustls_native_certs::load_native_certs() {
        Ok(certs) => {
            let (added, ignored) = root_store.add_parsable_certificates(certs);
            debug!(added, ignored, "loaded platform trust store");
        }
        Err(e) => warn!(cause = %e, "can't load platform trust store"),
    }

    if root_store.is_empty() {
        debug!("platform trust store is empty, use mozilla roots");
        return mozilla_roots();
    }
    root_store
}

fn mozilla_roots() -> RootCertStore {
    RootCertStore { roots: webpki_roots::TLS_SERVER_ROOTS.to_vec() }
}

/// Builds the TLS client configuration for the given trust store.
///
/// # Errors
///
/// Fails if the roots can't be loaded or the crypto provider rejects the
/// protocol versions.
pub fn client_config(trust_store: &TrustStore) -> Result<Arc<ClientConfig>, FetchError> {
    let root_store = trust_store.root_store()?;

    let config = ClientConfig::builder_with_provider(Arc::new(crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(FetchError::trust_store)?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mozilla_roots_are_bundled() {
        let root_store = TrustStore::Mozilla.root_store().unwrap();
        assert!(!root_store.is_empty());
    }

    #[test]
    fn platform_never_ends_up_empty() {
        let root_store = TrustStore::Platform.root_store().unwrap();
        assert!(!root_store.is_empty());
    }

    #[test]
    fn missing_pem_file() {
        let store = TrustStore::PemFile(PathBuf::from("/nonexistent/micro-fetch/roots.pem"));
        assert!(matches!(store.root_store(), Err(FetchError::TrustStore { .. })));
    }

    #[test]
    fn pem_file_without_certificates() {
        let path = std::env::temp_dir().join(format!("micro-fetch-empty-{}.pem", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "not a certificate").unwrap();
        drop(file);

        let result = TrustStore::PemFile(path.clone()).root_store();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(FetchError::TrustStore { .. })));
    }

    #[test]
    fn build_client_config() {
        let config = client_config(&TrustStore::Mozilla).unwrap();
        assert!(config.alpn_protocols.is_empty());
    }
}
