use rand::Rng;

// Excludes 0, O, 1 and I.
const PROMO_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generates an 8-character promo code for admin-created codes without an explicit value.
pub fn generate_promo_code() -> String {
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| PROMO_ALPHABET[rng.gen_range(0..PROMO_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate_promo_code_format;

    #[test]
    fn test_generate_promo_code() {
        let code = generate_promo_code();
        assert_eq!(code.len(), 8);
        assert!(code.bytes().all(|b| PROMO_ALPHABET.contains(&b)));
        assert!(validate_promo_code_format(&code).is_ok());
    }
}
