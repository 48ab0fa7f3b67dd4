pub mod animate;
pub mod codec;
pub mod layout;

use fractalcrypt_core::CipherConfig;

/// Clamp CLI-supplied parameters the same way the form entry points do.
pub fn make_config(iterations: i64, seed: i64) -> CipherConfig {
    let config = CipherConfig::new(iterations, seed);
    if i64::from(config.iterations) != iterations || i64::from(config.seed) != seed {
        eprintln!(
            "Note: parameters clamped to iterations={} seed={}",
            config.iterations, config.seed
        );
    }
    log::debug!("config: {config:?}");
    config
}
