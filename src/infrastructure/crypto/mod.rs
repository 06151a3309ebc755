use base64::Engine as _;
use rand::RngCore;

/// Random bytes per share token. 32 bytes of OS entropy keeps tokens
/// unguessable even if a large number are ever minted.
const TOKEN_BYTES: usize = 32;

pub fn new_share_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_url_safe_and_distinct() {
        let a = new_share_token();
        let b = new_share_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert!(a.len() >= 40);
    }
}
