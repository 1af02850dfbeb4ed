/// Hoosat address handling.
///
/// Hoosat addresses are a CashAddr-style bech32 variant with a
/// configurable human-readable prefix: `<prefix>:<body>` where the body
/// encodes one version tag byte plus the payload, squashed from 8-bit to
/// 5-bit symbols, followed by an 8-symbol checksum computed by a 40-bit
/// polymod over the expanded prefix and data.

use std::fmt;

use crate::ScriptError;

/// The bech32 symbol alphabet.
const CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Number of 5-bit checksum symbols at the end of the body.
const CHECKSUM_SYMBOLS: usize = 8;

/// The mainnet human-readable prefix.
pub const MAINNET_PREFIX: &str = "hoosat";

/// The testnet human-readable prefix.
pub const TESTNET_PREFIX: &str = "hoosattest";

// ---------------------------------------------------------------------------
// Prefix
// ---------------------------------------------------------------------------

/// The human-readable network prefix of an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// Hoosat mainnet ("hoosat").
    Mainnet,
    /// Hoosat testnet ("hoosattest").
    Testnet,
    /// An arbitrary prefix override for private networks.
    Custom(String),
}

impl Prefix {
    /// Return the prefix string as it is emitted in addresses.
    ///
    /// # Returns
    /// The prefix string slice.
    pub fn as_str(&self) -> &str {
        match self {
            Prefix::Mainnet => MAINNET_PREFIX,
            Prefix::Testnet => TESTNET_PREFIX,
            Prefix::Custom(s) => s,
        }
    }

    /// Parse a prefix string.
    ///
    /// Recognizes the two network prefixes case-insensitively; anything
    /// else becomes a `Custom` prefix preserving the given case.
    ///
    /// # Arguments
    /// * `s` - The prefix string.
    ///
    /// # Returns
    /// The parsed `Prefix`.
    pub fn parse(s: &str) -> Prefix {
        let lowered = s.to_ascii_lowercase();
        match lowered.as_str() {
            MAINNET_PREFIX => Prefix::Mainnet,
            TESTNET_PREFIX => Prefix::Testnet,
            _ => Prefix::Custom(s.to_string()),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AddressType
// ---------------------------------------------------------------------------

/// The type of an address, encoded as the leading tag byte of the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressType {
    /// Schnorr pay-to-pubkey (tag 0, 32-byte x-only public key).
    Schnorr,
    /// ECDSA pay-to-pubkey (tag 1, 33-byte compressed public key).
    Ecdsa,
    /// Pay-to-script-hash (tag 8, 32-byte script hash).
    ScriptHash,
}

impl AddressType {
    /// Return the version tag byte for this address type.
    ///
    /// # Returns
    /// 0, 1, or 8.
    pub fn tag(&self) -> u8 {
        match self {
            AddressType::Schnorr => 0,
            AddressType::Ecdsa => 1,
            AddressType::ScriptHash => 8,
        }
    }

    /// Look up an address type by its tag byte.
    ///
    /// # Arguments
    /// * `tag` - The version tag byte.
    ///
    /// # Returns
    /// `Some(AddressType)` for a known tag, otherwise `None`.
    pub fn from_tag(tag: u8) -> Option<AddressType> {
        match tag {
            0 => Some(AddressType::Schnorr),
            1 => Some(AddressType::Ecdsa),
            8 => Some(AddressType::ScriptHash),
            _ => None,
        }
    }

    /// Return the required payload length in bytes for this address type.
    ///
    /// # Returns
    /// 32 for Schnorr and ScriptHash, 33 for ECDSA.
    pub fn payload_len(&self) -> usize {
        match self {
            AddressType::Schnorr | AddressType::ScriptHash => 32,
            AddressType::Ecdsa => 33,
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A Hoosat address: prefix, type, and raw payload bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable network prefix.
    pub prefix: Prefix,
    /// The address type (Schnorr, ECDSA, or script hash).
    pub address_type: AddressType,
    /// The raw payload bytes (public key or script hash).
    pub payload: Vec<u8>,
}

impl Address {
    /// Create an address from a type and payload, validating the length.
    ///
    /// # Arguments
    /// * `prefix` - The network prefix.
    /// * `address_type` - The address type.
    /// * `payload` - The payload bytes.
    ///
    /// # Returns
    /// An `Address`, or `InvalidAddress` if the payload length does not
    /// match the type.
    pub fn new(
        prefix: Prefix,
        address_type: AddressType,
        payload: Vec<u8>,
    ) -> Result<Self, ScriptError> {
        if payload.len() != address_type.payload_len() {
            return Err(ScriptError::InvalidAddress(format!(
                "payload length {} does not match address type (expected {})",
                payload.len(),
                address_type.payload_len()
            )));
        }
        Ok(Address { prefix, address_type, payload })
    }

    /// Create a pay-to-pubkey address from a raw public key.
    ///
    /// 32-byte keys produce Schnorr addresses, 33-byte keys ECDSA ones.
    ///
    /// # Arguments
    /// * `prefix` - The network prefix.
    /// * `pubkey` - The public key bytes.
    ///
    /// # Returns
    /// An `Address`, or `InvalidPubkey` for any other key length.
    pub fn from_public_key(prefix: Prefix, pubkey: &[u8]) -> Result<Self, ScriptError> {
        let address_type = match pubkey.len() {
            32 => AddressType::Schnorr,
            33 => AddressType::Ecdsa,
            got => return Err(ScriptError::InvalidPubkey { expected: 32, got }),
        };
        Ok(Address { prefix, address_type, payload: pubkey.to_vec() })
    }

    /// Create a pay-to-script-hash address from a 32-byte script hash.
    ///
    /// # Arguments
    /// * `prefix` - The network prefix.
    /// * `script_hash` - The double-SHA-256 of the redeem script.
    ///
    /// # Returns
    /// A P2SH `Address`.
    pub fn from_script_hash(prefix: Prefix, script_hash: [u8; 32]) -> Self {
        Address {
            prefix,
            address_type: AddressType::ScriptHash,
            payload: script_hash.to_vec(),
        }
    }

    /// Encode this address to its string form `<prefix>:<body>`.
    ///
    /// The checksum is computed over the case-normalized prefix, but the
    /// emitted prefix keeps the case it was supplied with.
    ///
    /// # Returns
    /// The address string.
    pub fn encode(&self) -> String {
        let mut data = Vec::with_capacity(1 + self.payload.len());
        data.push(self.address_type.tag());
        data.extend_from_slice(&self.payload);

        let symbols = conv8to5(&data);
        let check = checksum(&symbols, self.prefix.as_str());
        let check_symbols = conv8to5(&check.to_be_bytes()[3..]);

        let mut body = String::with_capacity(symbols.len() + CHECKSUM_SYMBOLS);
        for &s in symbols.iter().chain(check_symbols.iter()) {
            body.push(CHARSET[s as usize] as char);
        }
        format!("{}:{}", self.prefix.as_str(), body)
    }

    /// Decode an address string.
    ///
    /// Both lower- and mixed-case prefixes are accepted; case
    /// normalization happens inside the codec before the checksum is
    /// verified.  When `expected_prefix` is given, the decoded prefix
    /// must match it (case-insensitively).
    ///
    /// # Arguments
    /// * `s` - The address string `<prefix>:<body>`.
    /// * `expected_prefix` - Optional prefix the address must carry.
    ///
    /// # Returns
    /// The decoded `Address`, or `InvalidAddress` on any violation.
    pub fn decode(s: &str, expected_prefix: Option<&Prefix>) -> Result<Self, ScriptError> {
        let (prefix_str, body) = s
            .split_once(':')
            .ok_or_else(|| ScriptError::InvalidAddress(format!("missing prefix in '{}'", s)))?;
        if prefix_str.is_empty() {
            return Err(ScriptError::InvalidAddress("empty prefix".to_string()));
        }

        if let Some(expected) = expected_prefix {
            if !prefix_str.eq_ignore_ascii_case(expected.as_str()) {
                return Err(ScriptError::InvalidAddress(format!(
                    "prefix '{}' does not match expected '{}'",
                    prefix_str, expected
                )));
            }
        }

        if body.len() <= CHECKSUM_SYMBOLS {
            return Err(ScriptError::InvalidAddress("address body too short".to_string()));
        }

        let mut symbols = Vec::with_capacity(body.len());
        for c in body.chars() {
            let lowered = c.to_ascii_lowercase() as u8;
            let idx = CHARSET
                .iter()
                .position(|&b| b == lowered)
                .ok_or_else(|| ScriptError::InvalidAddress(format!("invalid character '{}'", c)))?;
            symbols.push(idx as u8);
        }

        if polymod(
            prefix_str
                .bytes()
                .map(|b| b.to_ascii_lowercase() & 0x1f)
                .chain(std::iter::once(0))
                .chain(symbols.iter().copied()),
        ) != 0
        {
            return Err(ScriptError::InvalidAddress("checksum mismatch".to_string()));
        }

        let data = conv5to8(&symbols[..symbols.len() - CHECKSUM_SYMBOLS])?;
        if data.is_empty() {
            return Err(ScriptError::InvalidAddress("empty payload".to_string()));
        }

        let address_type = AddressType::from_tag(data[0]).ok_or_else(|| {
            ScriptError::InvalidAddress(format!("unknown address type tag {}", data[0]))
        })?;
        let payload = data[1..].to_vec();
        if payload.len() != address_type.payload_len() {
            return Err(ScriptError::InvalidAddress(format!(
                "payload length {} does not match address type (expected {})",
                payload.len(),
                address_type.payload_len()
            )));
        }

        Ok(Address {
            prefix: Prefix::parse(prefix_str),
            address_type,
            payload,
        })
    }

    /// Generate the script public key paying to this address.
    ///
    /// # Returns
    /// The script bytes (see `standard::pay_to_address_script`).
    pub fn script_public_key(&self) -> Vec<u8> {
        crate::standard::pay_to_address_script(self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

// ---------------------------------------------------------------------------
// Codec internals
// ---------------------------------------------------------------------------

/// Squash 8-bit bytes into 5-bit symbols with left-MSB zero padding.
fn conv8to5(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &b in data {
        acc = (acc << 8) | b as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Expand 5-bit symbols back into 8-bit bytes, rejecting nonzero padding.
fn conv5to8(symbols: &[u8]) -> Result<Vec<u8>, ScriptError> {
    let mut out = Vec::with_capacity(symbols.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &s in symbols {
        acc = (acc << 5) | s as u32;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (acc << (8 - bits)) & 0xff != 0 {
        return Err(ScriptError::InvalidAddress("invalid 5-bit padding".to_string()));
    }
    Ok(out)
}

/// The CashAddr-style 40-bit polymod over 5-bit values.
fn polymod(values: impl Iterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ (d as u64);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

/// Compute the 40-bit checksum for the payload symbols under the prefix.
///
/// The prefix is case-normalized and expanded to its low 5 bits, followed
/// by a zero separator, the payload symbols, and 8 zero placeholders.
fn checksum(payload_symbols: &[u8], prefix: &str) -> u64 {
    polymod(
        prefix
            .bytes()
            .map(|b| b.to_ascii_lowercase() & 0x1f)
            .chain(std::iter::once(0))
            .chain(payload_symbols.iter().copied())
            .chain([0u8; CHECKSUM_SYMBOLS]),
    )
}
