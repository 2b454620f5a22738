//! Sync code generation.
//!
//! Codes are short and human-typeable: a fixed `JOT-` prefix followed by six
//! characters drawn uniformly from A-Z0-9. The generator itself makes no
//! uniqueness promise; callers issuing codes must check the store and retry.

use rand::Rng;

/// Fixed prefix every sync code carries.
pub const SYNC_CODE_PREFIX: &str = "JOT-";

/// Number of random characters after the prefix.
pub const SYNC_CODE_SUFFIX_LEN: usize = 6;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a candidate sync code.
///
/// The 36^6 namespace is the only anti-collision property; randomness is not
/// cryptographic and does not need to be.
#[must_use]
pub fn generate_sync_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(SYNC_CODE_PREFIX.len() + SYNC_CODE_SUFFIX_LEN);
    code.push_str(SYNC_CODE_PREFIX);
    for _ in 0..SYNC_CODE_SUFFIX_LEN {
        let index = rng.gen_range(0..ALPHABET.len());
        code.push(char::from(ALPHABET[index]));
    }
    code
}

/// Check that a code has the generated shape: `JOT-` plus six A-Z0-9 chars.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    code.strip_prefix(SYNC_CODE_PREFIX).is_some_and(|suffix| {
        suffix.len() == SYNC_CODE_SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    })
}
