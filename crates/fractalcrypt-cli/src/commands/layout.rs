use std::path::Path;

use fractalcrypt_core::{Scene, SceneSnapshot, Viewport, encode_text, generate_points};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct LayoutCommandConfig<'a> {
    pub input: &'a str,
    pub is_binary: bool,
    pub width: f64,
    pub height: f64,
    pub phase_seed: Option<u64>,
    pub output_path: Option<&'a str>,
}

pub fn run(config: LayoutCommandConfig<'_>) {
    if !(config.width > 0.0 && config.height > 0.0) {
        eprintln!("Width and height must be positive");
        std::process::exit(1);
    }

    let viewport = Viewport::new(config.width, config.height);
    let mut rng = match config.phase_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let snapshot = build_snapshot(config.input, config.is_binary, viewport, &mut rng);

    let json = match snapshot.to_json() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize layout: {e}");
            std::process::exit(1);
        }
    };

    match config.output_path {
        Some(path) => {
            if let Err(e) = write_json(Path::new(path), &json) {
                eprintln!("Failed to write {path}: {e}");
                std::process::exit(1);
            }
            eprintln!(
                "{} points, {} connections written to {path}",
                snapshot.points.len(),
                snapshot.points.iter().map(|p| p.connections.len()).sum::<usize>()
            );
        }
        None => println!("{json}"),
    }
}

/// Lay out `input` at rest (time zero).
pub fn build_snapshot(
    input: &str,
    is_binary: bool,
    viewport: Viewport,
    rng: &mut StdRng,
) -> SceneSnapshot {
    let binary = if is_binary {
        input.to_string()
    } else {
        encode_text(input)
    };
    Scene::new(generate_points(&binary, &viewport, rng)).snapshot(viewport)
}

fn write_json(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_input_is_encoded_first() {
        let mut rng = StdRng::seed_from_u64(5);
        let snap = build_snapshot("A", false, Viewport::new(400.0, 400.0), &mut rng);
        let bits: String = snap.points.iter().map(|p| p.bit.as_char()).collect();
        assert_eq!(bits, "01000001");
        assert_eq!(snap.time, 0.0);
    }

    #[test]
    fn binary_input_is_laid_out_verbatim() {
        let mut rng = StdRng::seed_from_u64(5);
        let snap = build_snapshot("101", true, Viewport::new(400.0, 400.0), &mut rng);
        assert_eq!(snap.points.len(), 3);
    }

    #[test]
    fn same_seed_same_phases() {
        let vp = Viewport::new(300.0, 200.0);
        let a = build_snapshot("xy", false, vp, &mut StdRng::seed_from_u64(9));
        let b = build_snapshot("xy", false, vp, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("layout.json");
        let snap = build_snapshot(
            "ok",
            false,
            Viewport::new(200.0, 200.0),
            &mut StdRng::seed_from_u64(1),
        );
        write_json(&path, &snap.to_json().unwrap()).unwrap();

        let back = SceneSnapshot::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.points.len(), 16);
    }
}
