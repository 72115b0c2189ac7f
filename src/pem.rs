//! Loading of PEM encoded private keys.
//!
//! Request signing is done outside this crate; signers that need an RSA key
//! can use [`PrivateKey`] to turn a `.pem` file into DER bytes.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use miette::Diagnostic;
use thiserror::Error;

const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const DASHES: &str = "-----";

#[derive(Debug, Error, Diagnostic)]
pub enum PemError {
    #[error("error reading key material: {0}")]
    #[diagnostic(code(xero_xml::pem::io))]
    Io(#[from] std::io::Error),

    #[error("failed to decode PEM")]
    #[diagnostic(
        code(xero_xml::pem::decode),
        help("The input must contain exactly one BEGIN/END block and nothing after it")
    )]
    Decode,

    #[error("PEM block `{0}` is not a private key")]
    #[diagnostic(code(xero_xml::pem::not_private_key))]
    NotPrivateKey(String),

    #[error("encrypted PEM keys are not supported")]
    #[diagnostic(
        code(xero_xml::pem::encrypted),
        help("Decrypt the key first, e.g. `openssl rsa -in key.pem -out plain.pem`")
    )]
    Encrypted,

    #[error("invalid base64 in PEM body: {0}")]
    #[diagnostic(code(xero_xml::pem::base64))]
    Base64(#[from] base64::DecodeError),
}

/// DER encoded private key material taken from a PEM block.
#[derive(Clone)]
pub struct PrivateKey {
    label: String,
    der: Vec<u8>,
}

impl PrivateKey {
    /// Reads and decodes a PEM document from `reader`.
    pub fn from_pem<R: Read>(mut reader: R) -> Result<Self, PemError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Reads and decodes the PEM file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PemError> {
        Self::from_pem(File::open(path)?)
    }

    /// Decodes a PEM document held in memory.
    pub fn parse(text: &str) -> Result<Self, PemError> {
        let start = text.find(BEGIN).ok_or(PemError::Decode)?;
        let mut lines = text[start..].lines();

        let label = lines
            .next()
            .and_then(|line| line.trim_end().strip_prefix(BEGIN))
            .and_then(|line| line.strip_suffix(DASHES))
            .ok_or(PemError::Decode)?
            .to_string();
        let end_line = format!("{END}{label}{DASHES}");

        let mut body = String::new();
        let mut closed = false;
        for line in lines.by_ref() {
            let line = line.trim();
            if line == end_line {
                closed = true;
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim();
                if name.eq_ignore_ascii_case("DEK-Info")
                    || (name.eq_ignore_ascii_case("Proc-Type") && value.contains("ENCRYPTED"))
                {
                    return Err(PemError::Encrypted);
                }
                continue;
            }
            body.push_str(line);
        }
        if !closed {
            return Err(PemError::Decode);
        }
        if lines.any(|line| !line.trim().is_empty()) {
            return Err(PemError::Decode);
        }
        if !label.ends_with("PRIVATE KEY") {
            return Err(PemError::NotPrivateKey(label));
        }

        let der = STANDARD.decode(body.as_bytes())?;
        Ok(Self { label, der })
    }

    /// The block label, e.g. `RSA PRIVATE KEY`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The decoded key bytes.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("label", &self.label)
            .field("der", &format_args!("[{} bytes]", self.der.len()))
            .finish()
    }
}
