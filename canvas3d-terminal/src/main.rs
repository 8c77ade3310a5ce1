/// canvas3d terminal viewer
///
/// Renders an STL model (or a demo cube) with the canvas3d pipeline.
/// Controls:
///   - Arrow keys: yaw / pitch
///   - W/S, A/D: move forward/back, strafe
///   - E/R: roll
///   - +/-: zoom (field of view)
///   - F: toggle wireframe
///   - Q/ESC: quit
use anyhow::Context;
use canvas3d_core::{Color, Light, RenderOptions};
use canvas3d_terminal::{bounds, demo_world, stl, viewing_camera, Controls, TerminalApp};
use clap::Parser;
use nalgebra::Vector3;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "canvas3d-terminal", about = "Terminal viewer for the canvas3d renderer")]
struct Cli {
    /// STL file to view; a demo cube is shown when omitted
    stl: Option<PathBuf>,

    /// Draw outlines only
    #[arg(short, long)]
    wireframe: bool,

    /// Cull faces at or beyond this distance from the camera
    #[arg(long)]
    horizon: Option<f64>,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    fov: f64,

    /// Light direction as X,Y,Z (defaults to the view direction)
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    light: Option<Vector3<f64>>,

    /// Saturation floor for faces lit at a grazing angle (0..1)
    #[arg(long, default_value_t = 0.2)]
    min_saturation: f64,

    /// Lightness floor for faces lit at a grazing angle (0..1)
    #[arg(long, default_value_t = 0.2)]
    min_lightness: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write log output to this file; the viewer owns the terminal, so
    /// nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_vector(s: &str) -> Result<Vector3<f64>, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(format!("expected X,Y,Z, got {} values", parts.len())),
    }
}

fn log_writer(path: Option<&Path>) -> anyhow::Result<BoxMakeWriter> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_writer(cli.log_file.as_deref())?)
        .with_ansi(false)
        .init();

    let world = match &cli.stl {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read STL file {}", path.display()))?;
            let faces = stl::parse_stl(&data, &Color::hsl(210.0, 60.0, 65.0))
                .with_context(|| format!("failed to parse STL file {}", path.display()))?;
            tracing::info!(triangles = faces.len(), "loaded {}", path.display());
            faces
        }
        None => demo_world(),
    };

    let light = match cli.light {
        Some(direction) => Light::new(direction, cli.min_saturation, cli.min_lightness),
        None => Light::headlight(cli.min_saturation, cli.min_lightness),
    };
    let options = RenderOptions {
        wireframe: cli.wireframe,
        horizon: cli.horizon,
        light: Some(light),
    };
    let radius = bounds(&world).map_or(1.0, |(_, r)| r);
    let controls = Controls::new(viewing_camera(&world, cli.fov), options, radius);

    let mut app = TerminalApp::new(world, controls)?;
    app.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("1, -2,0.5"), Ok(Vector3::new(1.0, -2.0, 0.5)));
        assert!(parse_vector("1,2").is_err());
        assert!(parse_vector("a,b,c").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["canvas3d-terminal", "--wireframe", "--light", "-1,0,0", "model.stl"]).unwrap();
        assert!(cli.wireframe);
        assert_eq!(cli.light, Some(Vector3::new(-1.0, 0.0, 0.0)));
        assert_eq!(cli.stl, Some(PathBuf::from("model.stl")));
        assert_eq!(cli.horizon, None);
        assert_eq!(cli.log_file, None);

        let cli = Cli::try_parse_from(["canvas3d-terminal", "-v", "--log-file", "view.log"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("view.log")));
    }

    #[test]
    fn test_log_writer_targets_file() {
        use std::io::Write;
        use tracing_subscriber::fmt::MakeWriter;

        let path = std::env::temp_dir().join(format!("canvas3d-log-{}.log", std::process::id()));
        let writer = log_writer(Some(&path)).unwrap();
        writer.make_writer().write_all(b"frame done\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "frame done\n");
        std::fs::remove_file(&path).unwrap();

        assert!(log_writer(None).is_ok());
        assert!(log_writer(Some(Path::new("/nonexistent-dir/x.log"))).is_err());
    }
}
