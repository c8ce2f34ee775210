//! Minimal AWS Signature v4 signing for the one call rust-s3 does not cover
//! (`PUT ?policy` on the bucket).

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the per-day signing key: `HMAC(HMAC(HMAC(HMAC("AWS4"+secret, date), region), service), "aws4_request")`
pub fn signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, AppError> {
    let k_date = hmac_sha256(
        format!("AWS4{}", secret_key).as_bytes(),
        date_stamp.as_bytes(),
    )?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// A signed request ready to be sent
pub struct SignedHeaders {
    pub amz_date: String,
    pub payload_hash: String,
    pub authorization: String,
}

pub struct SigningInput<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub canonical_uri: &'a str,
    pub canonical_query: &'a str,
    pub payload: &'a [u8],
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
    pub now: chrono::DateTime<chrono::Utc>,
}

/// Sign a request over the `host`, `x-amz-content-sha256` and `x-amz-date` headers.
pub fn sign(input: &SigningInput<'_>) -> Result<SignedHeaders, AppError> {
    let date_stamp = input.now.format("%Y%m%d").to_string();
    let amz_date = input.now.format("%Y%m%dT%H%M%SZ").to_string();
    let payload_hash = sha256_hex(input.payload);

    let signed_headers = "host;x-amz-content-sha256;x-amz-date";
    let canonical_request = format!(
        "{}\n{}\n{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n\n{}\n{}",
        input.method,
        input.canonical_uri,
        input.canonical_query,
        input.host,
        payload_hash,
        amz_date,
        signed_headers,
        payload_hash
    );

    let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, input.region);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let key = signing_key(input.secret_key, &date_stamp, input.region, "s3")?;
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        authorization: format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, input.access_key, credential_scope, signed_headers, signature
        ),
        amz_date,
        payload_hash,
    })
}
