use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};

/// Mint a fresh service token for SERVICE_TOKEN / the session shell.
fn main() {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    println!("{}", URL_SAFE_NO_PAD.encode(bytes));
}
