// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hybrid encryption of the event payload.
//!
//! Every tracked event gets a fresh 16-byte AES key and IV. The serialized
//! payload is encrypted with AES-128-CBC (PKCS#7 padding); the key and IV
//! are each hex-encoded and then RSA-encrypted with PKCS#1 v1.5 padding
//! under the deployment's public key. The hex step before RSA is part of
//! the cross-SDK wire contract - the backend decrypts to a hex string and
//! decodes it, so every SDK must produce exactly this shape.

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use telemetree_core::{Event, Payload};
use thiserror::Error;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

/// AES key and IV size in bytes (AES-128, one cipher block).
pub const KEY_SIZE: usize = 16;

/// Errors from the payload encryption pipeline.
#[derive(Debug, Error)]
pub enum EncryptError {
	/// The configured PEM did not parse as a PKCS#1 RSA public key.
	#[error("invalid RSA public key: {0}")]
	InvalidPublicKey(String),

	/// The secure random source failed to produce key material.
	#[error("random source failure: {0}")]
	Random(String),

	/// RSA key wrapping failed.
	#[error("RSA encryption failed: {0}")]
	Wrap(#[from] rsa::Error),

	/// Payload or envelope JSON serialization failed.
	#[error("serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// The transmittable envelope: three independently encrypted byte strings.
///
/// Serializes under the exact keys `body`, `key` and `iv`, each as a
/// standard base64 string of the raw ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
	/// AES-128-CBC ciphertext of the payload JSON.
	#[serde(with = "base64_bytes")]
	pub body: Vec<u8>,
	/// RSA-wrapped (hex-encoded) AES key.
	#[serde(with = "base64_bytes")]
	pub key: Vec<u8>,
	/// RSA-wrapped (hex-encoded) IV.
	#[serde(with = "base64_bytes")]
	pub iv: Vec<u8>,
}

/// Builds, encrypts, and frames the payload for `event`.
///
/// Returns the serialized [`EncryptedEnvelope`] ready to POST. Key material
/// is generated fresh on every call and never reused.
pub fn prepare_encrypted_payload(
	public_key_pem: &str,
	application_id: &str,
	event: &Event,
) -> Result<Vec<u8>, EncryptError> {
	let public_key = parse_rsa_public_key(public_key_pem)?;

	let payload = Payload::from_event(event, application_id);
	let payload_bytes = serde_json::to_vec(&payload)?;

	let (aes_key, iv) = generate_aes_key_and_iv()?;

	let body = encrypt_with_aes(&aes_key, &iv, &payload_bytes);
	let key = encrypt_with_rsa(&public_key, &aes_key)?;
	let iv = encrypt_with_rsa(&public_key, &iv)?;

	let envelope = EncryptedEnvelope { body, key, iv };
	Ok(serde_json::to_vec(&envelope)?)
}

/// Parses a PKCS#1 `RSA PUBLIC KEY` PEM block.
///
/// The configuration service may deliver the PEM with escaped newlines;
/// [`normalize_pem`] is applied first.
pub fn parse_rsa_public_key(public_key_pem: &str) -> Result<RsaPublicKey, EncryptError> {
	let pem = normalize_pem(public_key_pem);
	RsaPublicKey::from_pkcs1_pem(&pem).map_err(|e| EncryptError::InvalidPublicKey(e.to_string()))
}

/// Replaces literal backslash-n sequences with real newlines.
///
/// Idempotent: the replacement output contains no remaining `\n` escape
/// pairs, so applying it twice is a no-op.
pub fn normalize_pem(pem: &str) -> String {
	pem.replace("\\n", "\n")
}

/// Generates a fresh AES key and IV from the OS random source.
fn generate_aes_key_and_iv() -> Result<([u8; KEY_SIZE], [u8; KEY_SIZE]), EncryptError> {
	let mut key = [0u8; KEY_SIZE];
	OsRng
		.try_fill_bytes(&mut key)
		.map_err(|e| EncryptError::Random(e.to_string()))?;

	let mut iv = [0u8; KEY_SIZE];
	OsRng
		.try_fill_bytes(&mut iv)
		.map_err(|e| EncryptError::Random(e.to_string()))?;

	Ok((key, iv))
}

/// Encrypts `plaintext` with AES-128-CBC and PKCS#7 padding.
///
/// Standard PKCS#7: a plaintext already aligned to the block size still
/// gains a full block of padding.
fn encrypt_with_aes(key: &[u8; KEY_SIZE], iv: &[u8; KEY_SIZE], plaintext: &[u8]) -> Vec<u8> {
	Aes128CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Wraps raw key material for the recipient: lowercase hex encode, then
/// RSA PKCS#1 v1.5 encrypt the hex string's bytes.
fn encrypt_with_rsa(public_key: &RsaPublicKey, data: &[u8]) -> Result<Vec<u8>, EncryptError> {
	let hex_str = hex::encode(data);
	let ciphertext = public_key.encrypt(&mut OsRng, Pkcs1v15Encrypt, hex_str.as_bytes())?;
	Ok(ciphertext)
}

mod base64_bytes {
	use super::*;

	pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&BASE64.encode(bytes))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
		let encoded = String::deserialize(deserializer)?;
		BASE64.decode(encoded).map_err(serde::de::Error::custom)
	}
}
