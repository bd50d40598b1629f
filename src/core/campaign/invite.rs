//! Campaign invite codes.

use rand::Rng;

pub const INVITE_CODE_LEN: usize = 6;
const INVITE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const JOIN_BASE_URL: &str = "https://dmcopilot.app/join";

/// Six uppercase base-36 characters, e.g. `XY92KA`.
pub fn generate_invite_code(rng: &mut impl Rng) -> String {
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_ALPHABET[rng.gen_range(0..INVITE_ALPHABET.len())] as char)
        .collect()
}

pub fn join_link(invite_code: &str) -> String {
    format!("{JOIN_BASE_URL}/{invite_code}")
}

/// Normalize user-typed codes: trims, uppercases, accepts full join links.
pub fn normalize_invite_code(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    let code = trimmed.rsplit('/').next().unwrap_or(trimmed);
    code.to_ascii_uppercase()
}
