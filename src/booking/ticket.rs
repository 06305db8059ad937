use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

/// Prefix of every e-ticket number
pub const TICKET_PREFIX: &str = "TRIP-";

/// Number of random characters after the prefix
const TICKET_CODE_LENGTH: usize = 6;

const TICKET_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

lazy_static! {
    static ref TICKET_CODE_REGEX: Regex = Regex::new(r"^TRIP-[A-Z0-9]{6}$").unwrap();
}

/// Generate a random e-ticket number such as `TRIP-7QX2LM`.
///
/// Codes are not checked against existing reservations; with 36^6 possible
/// codes a collision is possible but unlikely.
pub fn generate_ticket_code() -> String {
    let mut rng = rand::rng();
    let code: String = (0..TICKET_CODE_LENGTH)
        .map(|_| TICKET_CHARSET[rng.random_range(0..TICKET_CHARSET.len())] as char)
        .collect();
    format!("{}{}", TICKET_PREFIX, code)
}

/// Check that a string has the e-ticket number format
pub fn is_valid_ticket_code(code: &str) -> bool {
    TICKET_CODE_REGEX.is_match(code)
}
