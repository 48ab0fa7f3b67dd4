use fractalcrypt_core::{
    CipherConfig, Direction, DrawList, EMPTY_DECRYPT_MESSAGE, EMPTY_ENCRYPT_MESSAGE, Host,
    ManualScheduler, Viewport,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run_encrypt(text: &str, iterations: i64, seed: i64) {
    if text.is_empty() {
        eprintln!("{EMPTY_ENCRYPT_MESSAGE}");
        std::process::exit(1);
    }
    let config = super::make_config(iterations, seed);
    println!("{}", transcode(Direction::Encrypt, text, config));
}

/// Malformed input is not fatal: it prints the fixed decode error message.
pub fn run_decrypt(binary: &str, iterations: i64, seed: i64) {
    if binary.is_empty() {
        eprintln!("{EMPTY_DECRYPT_MESSAGE}");
        std::process::exit(1);
    }
    let config = super::make_config(iterations, seed);
    println!("{}", transcode(Direction::Decrypt, binary, config));
}

/// Run one entry point on an offscreen host, the way the page does.
fn transcode(direction: Direction, input: &str, config: CipherConfig) -> String {
    let mut host = Host::new(
        ManualScheduler::new(),
        DrawList::new(Viewport::new(800.0, 600.0)),
        StdRng::seed_from_u64(u64::from(config.seed)),
    );
    let output = host.run(direction, input, config);
    host.unload();
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalcrypt_core::DECODE_ERROR_MESSAGE;

    #[test]
    fn encrypt_prints_binary_groups() {
        let config = CipherConfig::default();
        assert_eq!(transcode(Direction::Encrypt, "A", config), "01000001");
    }

    #[test]
    fn malformed_decrypt_yields_fixed_message() {
        let config = CipherConfig::new(3, 9);
        assert_eq!(
            transcode(Direction::Decrypt, "0100000x", config),
            DECODE_ERROR_MESSAGE
        );
        assert_eq!(transcode(Direction::Decrypt, "01000001", config), "A");
    }

    #[test]
    fn trailing_partial_group_is_dropped() {
        let config = CipherConfig::default();
        assert_eq!(transcode(Direction::Decrypt, "0100000", config), "");
    }
}
