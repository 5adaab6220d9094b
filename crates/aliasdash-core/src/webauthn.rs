//! WebAuthn payload transcoding
//!
//! The server speaks base64url strings; the authenticator API speaks bytes.
//! The `transform_*_options` functions decode server options into byte
//! buffers, and the `*_payload` functions encode authenticator results back
//! into the string form the server verifies.

use base64::alphabet;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{DashError, Result};

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// base64url without padding.
pub fn b64enc(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// base64url keeping `=` padding.
pub fn b64_raw_enc(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Lowercase hex, two digits per byte.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode base64 in either the standard or the url-safe alphabet, with or
/// without padding.
pub fn decode_b64url(input: &str) -> Result<Vec<u8>> {
    let normalized: String = input
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    LENIENT_URL_SAFE
        .decode(normalized.as_bytes())
        .map_err(|e| DashError::serialization(format!("invalid base64url: {e}")))
}

/// Credential descriptor as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDescriptorWire {
    /// base64url credential id
    pub id: String,
    /// `type`, `transports`, ...
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Credential descriptor with a decoded id.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDescriptor {
    /// Raw credential id
    pub id: Vec<u8>,
    /// Untouched descriptor fields
    pub rest: Map<String, Value>,
}

impl CredentialDescriptorWire {
    fn decode(self) -> Result<CredentialDescriptor> {
        Ok(CredentialDescriptor {
            id: decode_b64url(&self.id)?,
            rest: self.rest,
        })
    }
}

/// Assertion options (`navigator.credentials.get`) as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOptionsWire {
    /// base64url challenge
    pub challenge: String,
    /// Credentials the user may assert with
    #[serde(default)]
    pub allow_credentials: Vec<CredentialDescriptorWire>,
    /// `rpId`, `timeout`, `userVerification`, ...
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Assertion options with byte fields decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRequestOptions {
    /// Raw challenge
    pub challenge: Vec<u8>,
    /// Decoded allow-list
    pub allow_credentials: Vec<CredentialDescriptor>,
    /// Untouched option fields
    pub rest: Map<String, Value>,
}

/// Decode the byte fields of assertion options.
pub fn transform_credential_request_options(
    options: CredentialRequestOptionsWire,
) -> Result<CredentialRequestOptions> {
    Ok(CredentialRequestOptions {
        challenge: decode_b64url(&options.challenge)?,
        allow_credentials: options
            .allow_credentials
            .into_iter()
            .map(CredentialDescriptorWire::decode)
            .collect::<Result<_>>()?,
        rest: options.rest,
    })
}

/// Relying-party user entity as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntityWire {
    /// base64url user handle
    pub id: String,
    /// `name`, `displayName`, ...
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// User entity with a decoded handle.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEntity {
    /// Raw user handle
    pub id: Vec<u8>,
    /// Untouched user fields
    pub rest: Map<String, Value>,
}

/// Registration options (`navigator.credentials.create`) as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreateOptionsWire {
    /// base64url challenge
    pub challenge: String,
    /// User being registered
    pub user: UserEntityWire,
    /// Credentials that must not be registered again
    #[serde(default)]
    pub exclude_credentials: Vec<CredentialDescriptorWire>,
    /// `rp`, `pubKeyCredParams`, `timeout`, ...
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Registration options with byte fields decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialCreateOptions {
    /// Raw challenge
    pub challenge: Vec<u8>,
    /// Decoded user entity
    pub user: UserEntity,
    /// Decoded exclude-list
    pub exclude_credentials: Vec<CredentialDescriptor>,
    /// Untouched option fields
    pub rest: Map<String, Value>,
}

/// Decode the byte fields of registration options.
pub fn transform_credential_create_options(
    options: CredentialCreateOptionsWire,
) -> Result<CredentialCreateOptions> {
    Ok(CredentialCreateOptions {
        challenge: decode_b64url(&options.challenge)?,
        user: UserEntity {
            id: decode_b64url(&options.user.id)?,
            rest: options.user.rest,
        },
        exclude_credentials: options
            .exclude_credentials
            .into_iter()
            .map(CredentialDescriptorWire::decode)
            .collect::<Result<_>>()?,
        rest: options.rest,
    })
}

/// Result of a registration ceremony.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCredential {
    /// Credential id as reported by the authenticator
    pub id: String,
    /// Raw credential id
    pub raw_id: Vec<u8>,
    /// Credential type, normally `public-key`
    pub credential_type: String,
    /// CBOR attestation object
    pub attestation_object: Vec<u8>,
    /// Client data JSON bytes
    pub client_data_json: Vec<u8>,
    /// Client extension results
    pub client_extension_results: Value,
}

/// Registration result in the form the server verifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    /// Credential id
    pub id: String,
    /// base64url (unpadded) raw id
    pub raw_id: String,
    /// Credential type
    #[serde(rename = "type")]
    pub credential_type: String,
    /// base64url (unpadded) attestation object
    pub att_obj: String,
    /// base64url (unpadded) client data
    pub client_data: String,
    /// Extension results as a JSON string
    pub registration_client_extensions: String,
}

/// Encode a registration result for the server.
pub fn registration_payload(credential: &NewCredential) -> RegistrationPayload {
    RegistrationPayload {
        id: credential.id.clone(),
        raw_id: b64enc(&credential.raw_id),
        credential_type: credential.credential_type.clone(),
        att_obj: b64enc(&credential.attestation_object),
        client_data: b64enc(&credential.client_data_json),
        registration_client_extensions: credential.client_extension_results.to_string(),
    }
}

/// Result of an assertion ceremony.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionCredential {
    /// Credential id as reported by the authenticator
    pub id: String,
    /// Raw credential id
    pub raw_id: Vec<u8>,
    /// Credential type, normally `public-key`
    pub credential_type: String,
    /// Authenticator data bytes
    pub authenticator_data: Vec<u8>,
    /// Client data JSON bytes
    pub client_data_json: Vec<u8>,
    /// Assertion signature
    pub signature: Vec<u8>,
    /// Client extension results
    pub client_extension_results: Value,
}

/// Assertion result in the form the server verifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionPayload {
    /// Credential id
    pub id: String,
    /// base64url (unpadded) raw id
    pub raw_id: String,
    /// Credential type
    #[serde(rename = "type")]
    pub credential_type: String,
    /// base64url (padded) authenticator data
    pub auth_data: String,
    /// base64url (padded) client data
    pub client_data: String,
    /// Hex signature
    pub signature: String,
    /// Extension results as a JSON string
    pub assertion_client_extensions: String,
}

/// Encode an assertion result for the server.
pub fn assertion_payload(credential: &AssertionCredential) -> AssertionPayload {
    AssertionPayload {
        id: credential.id.clone(),
        raw_id: b64enc(&credential.raw_id),
        credential_type: credential.credential_type.clone(),
        auth_data: b64_raw_enc(&credential.authenticator_data),
        client_data: b64_raw_enc(&credential.client_data_json),
        signature: hex_encode(&credential.signature),
        assertion_client_extensions: credential.client_extension_results.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encodings() {
        let bytes = [0xfb, 0xff, 0x01];
        assert_eq!(b64enc(&bytes), "-_8B");
        assert_eq!(b64_raw_enc(&[0xfb, 0xff]), "-_8=");
        assert_eq!(b64enc(&[0xfb, 0xff]), "-_8");
        assert_eq!(hex_encode(&[0x0a, 0xff]), "0aff");
    }

    #[test]
    fn test_decode_accepts_both_alphabets() {
        assert_eq!(decode_b64url("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode_b64url("+/8=").unwrap(), vec![0xfb, 0xff]);
        assert!(decode_b64url("*").is_err());
    }

    #[test]
    fn test_request_options() {
        let wire: CredentialRequestOptionsWire = serde_json::from_value(json!({
            "challenge": "AQID",
            "allowCredentials": [{"id": "BAU", "type": "public-key"}],
            "rpId": "example.com"
        }))
        .unwrap();
        let options = transform_credential_request_options(wire).unwrap();
        assert_eq!(options.challenge, vec![1, 2, 3]);
        assert_eq!(options.allow_credentials[0].id, vec![4, 5]);
        assert_eq!(options.allow_credentials[0].rest["type"], json!("public-key"));
        assert_eq!(options.rest["rpId"], json!("example.com"));
    }

    #[test]
    fn test_create_options() {
        let wire: CredentialCreateOptionsWire = serde_json::from_value(json!({
            "challenge": "AQID",
            "user": {"id": "Bw", "name": "me"},
            "rp": {"name": "example"}
        }))
        .unwrap();
        let options = transform_credential_create_options(wire).unwrap();
        assert_eq!(options.user.id, vec![7]);
        assert!(options.exclude_credentials.is_empty());
        assert_eq!(options.rest["rp"]["name"], json!("example"));
    }

    #[test]
    fn test_assertion_payload() {
        let payload = assertion_payload(&AssertionCredential {
            id: "cred".to_string(),
            raw_id: vec![0xfb, 0xff],
            credential_type: "public-key".to_string(),
            authenticator_data: vec![0xfb, 0xff],
            client_data_json: b"{}".to_vec(),
            signature: vec![0xde, 0xad],
            client_extension_results: json!({}),
        });
        assert_eq!(payload.raw_id, "-_8");
        assert_eq!(payload.auth_data, "-_8=");
        assert_eq!(payload.signature, "dead");
        assert_eq!(payload.assertion_client_extensions, "{}");

        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["type"], json!("public-key"));
        assert_eq!(body["authData"], json!("-_8="));
    }
}
