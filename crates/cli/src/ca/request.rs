//! Key generation and CSR construction.

use std::net::IpAddr;

use rcgen::{
    CertificateParams, CustomExtension, DistinguishedName, DnType, KeyPair, SanType,
    PKCS_ECDSA_P256_SHA256,
};
use smsgate_client::CsrType;
use tracing::info;

use crate::errors::CliError;

const OID_KEY_USAGE: &[u64] = &[2, 5, 29, 15];
const OID_EXT_KEY_USAGE: &[u64] = &[2, 5, 29, 37];

/// BIT STRING: digitalSignature, nonRepudiation, keyEncipherment.
const KEY_USAGE_DER: &[u8] = &[0x03, 0x02, 0x05, 0xa0];

/// SEQUENCE { id-kp-serverAuth }
const EXT_KEY_USAGE_DER: &[u8] = &[
    0x30, 0x06, 0x06, 0x04, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01,
];

/// A validated request for a certificate bound to a private IP address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateRequestIntent {
    ip: IpAddr,
    purpose: CsrType,
}

impl CertificateRequestIntent {
    /// Validate user input. Nothing else happens if this fails.
    pub fn parse(input: &str, purpose: CsrType) -> Result<Self, CliError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CliError::parameter("IP address is empty"));
        }

        let ip: IpAddr = input
            .parse()
            .map_err(|e| CliError::parameter(format!("invalid IP address {input:?}: {e}")))?;

        if !is_private(&ip) {
            return Err(CliError::parameter("IP address is not private"));
        }

        Ok(Self { ip, purpose })
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn purpose(&self) -> CsrType {
        self.purpose
    }
}

/// RFC 1918 for IPv4, fc00::/7 for IPv6. IPv4-mapped addresses are unmapped first.
pub fn is_private(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.is_private(),
            None => v6.is_unique_local(),
        },
    }
}

/// Fresh key material and the CSR signed with it.
pub struct GeneratedCsr {
    /// PKCS#8 PEM; only ever written to the key output file.
    pub private_key_pem: String,
    pub csr_pem: String,
}

impl std::fmt::Debug for GeneratedCsr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedCsr")
            .field("private_key_pem", &"<redacted>")
            .field("csr_pem", &self.csr_pem)
            .finish()
    }
}

/// Generate a P-256 key pair and a CSR for the intent's IP address.
pub fn generate(intent: &CertificateRequestIntent) -> Result<GeneratedCsr, CliError> {
    info!("Generating private key...");
    let key_pair = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256)
        .map_err(|e| CliError::internal(format!("Failed to generate private key: {e}")))?;

    info!("Creating certificate request...");
    let csr_pem = build_csr(intent.ip(), &key_pair)?;

    Ok(GeneratedCsr {
        private_key_pem: key_pair.serialize_pem(),
        csr_pem,
    })
}

fn build_csr(ip: IpAddr, key_pair: &KeyPair) -> Result<String, CliError> {
    let mut params = CertificateParams::default();

    let mut subject = DistinguishedName::new();
    subject.push(DnType::CommonName, ip.to_string());
    params.distinguished_name = subject;
    params.subject_alt_names = vec![SanType::IpAddress(ip)];

    let mut key_usage = CustomExtension::from_oid_content(OID_KEY_USAGE, KEY_USAGE_DER.to_vec());
    key_usage.set_criticality(true);
    let ext_key_usage =
        CustomExtension::from_oid_content(OID_EXT_KEY_USAGE, EXT_KEY_USAGE_DER.to_vec());
    params.custom_extensions = vec![key_usage, ext_key_usage];

    params
        .serialize_request(key_pair)
        .and_then(|csr| csr.pem())
        .map_err(|e| CliError::internal(format!("Failed to create certificate request: {e}")))
}
