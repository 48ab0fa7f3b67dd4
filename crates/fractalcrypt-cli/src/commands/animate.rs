use fractalcrypt_core::{Direction, RenderOptions};

pub struct AnimateCommandConfig<'a> {
    pub input: &'a str,
    pub decrypt: bool,
    pub fps: f64,
    pub grid: bool,
    pub post_effects: bool,
    pub fractal_drift: bool,
}

pub fn run(config: AnimateCommandConfig<'_>) {
    if !(config.fps.is_finite() && config.fps > 0.0) {
        eprintln!("--fps must be a positive number");
        std::process::exit(1);
    }

    let direction = if config.decrypt {
        Direction::Decrypt
    } else {
        Direction::Encrypt
    };
    let options = RenderOptions {
        fractal_drift: config.fractal_drift,
        grid: config.grid,
        post_effects: config.post_effects,
    };

    let mut app = crate::tui::app::App::new(config.input, direction, config.fps, options);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
    println!("{}", app.output());
}
