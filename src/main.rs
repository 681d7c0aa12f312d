use std::path::PathBuf;

use anyhow::{bail, Context};
use terra_logger::{debug, info, info_span, throw, warn, Logger};
use terra_terrain::{gpu::GpuMesh, procedural, MeshAsset, TerrainMesh, TerrainSettings};
use terra_wgpu::instance::{create_headless_instance, WRenderError};

const USAGE: &str = "Usage: terra-viewer <heightmap> [--precision N] [--texture PATH] [--config FILE] [--upload]\n       terra-viewer --waves N [--upload]";

/// What the viewer has been asked to do.
#[derive(Debug, Default)]
struct Args {
    heightmap: Option<PathBuf>,
    waves: Option<u32>,
    precision: Option<u32>,
    texture: Option<PathBuf>,
    config: Option<PathBuf>,
    upload: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--precision" => {
                    let value = args.next().context("--precision needs a value")?;
                    parsed.precision = Some(value.parse().with_context(|| format!("Invalid precision '{}'", value))?);
                },
                "--waves" => {
                    let value = args.next().context("--waves needs a value")?;
                    parsed.waves = Some(value.parse().with_context(|| format!("Invalid resolution '{}'", value))?);
                },
                "--texture" => parsed.texture = Some(args.next().context("--texture needs a path")?.into()),
                "--config" => parsed.config = Some(args.next().context("--config needs a path")?.into()),
                "--upload" => parsed.upload = true,
                flag if flag.starts_with("--") => bail!("Unknown option '{}'\n{}", flag, USAGE),
                _ if parsed.heightmap.is_none() => parsed.heightmap = Some(arg.into()),
                _ => bail!("Unexpected argument '{}'\n{}", arg, USAGE),
            }
        }
        if parsed.heightmap.is_none() && parsed.waves.is_none() {
            bail!("Missing heightmap path\n{}", USAGE);
        }
        Ok(parsed)
    }

    /// Settings from the config file, then overridden by the command line.
    fn settings(&self) -> anyhow::Result<TerrainSettings> {
        let mut settings = match &self.config {
            Some(path) => TerrainSettings::from_json_file(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?,
            None => TerrainSettings::default(),
        };
        if let Some(precision) = self.precision {
            settings.precision = precision;
        }
        if let Some(texture) = &self.texture {
            settings = settings.with_texture(texture)
                .with_context(|| format!("Failed to read texture {}", texture.display()))?;
        }
        Ok(settings)
    }
}

fn build_mesh(args: &Args) -> anyhow::Result<MeshAsset> {
    if let Some(resolution) = args.waves {
        return Ok(procedural::waves(resolution)?);
    }

    let settings = args.settings()?;
    debug!(?settings, "Terrain settings.");
    let Some(path) = &args.heightmap else {
        bail!("Missing heightmap path\n{}", USAGE);
    };
    let terrain = TerrainMesh::from_path(path, &settings)
        .with_context(|| format!("Failed to build terrain from {}", path.display()))?;
    for warning in &terrain.warnings {
        warn!("{}", warning);
    }
    info!(
        grid_width = terrain.grid.width, grid_height = terrain.grid.height,
        "Terrain built from {}.", path.display());
    Ok(terrain.into())
}

async fn upload(mesh: &MeshAsset) -> anyhow::Result<()> {
    let _span = info_span!("upload").entered();
    let instance = match create_headless_instance("Terra Viewer").await {
        Ok(instance) => instance,
        Err(WRenderError::NoAdapter) => throw!("No GPU adapter available to upload the mesh."),
        Err(err) => return Err(err).context("Failed to create the render instance"),
    };
    let gpu_mesh = GpuMesh::new(&instance, mesh);
    info!(
        vertex_bytes = gpu_mesh.vertex_buffer.size(), index_bytes = gpu_mesh.index_buffer.size(),
        "Uploaded {} indices to the GPU.", gpu_mesh.index_count);
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let mesh = build_mesh(&args)?;
    info!(
        vertices = mesh.vertices.len(), triangles = mesh.triangle_count(),
        "Mesh '{}' spans {:?} to {:?}.", mesh.label, mesh.bounding_box.min, mesh.bounding_box.max);

    if args.upload {
        upload(&mesh).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Create logger
    let logger = Logger::new("log.txt", "trace.json").context("Failed to create the log files")?;

    let result = run().await;
    if let Err(err) = &result {
        terra_logger::error!("{:#}", err);
    }

    // Close logger
    logger.close();
    result
}


#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_all_options() {
        let args = parse(&["map.png", "--precision", "4", "--texture", "color.png", "--upload"]).unwrap();
        assert_eq!(args.heightmap, Some(PathBuf::from("map.png")));
        assert_eq!(args.precision, Some(4));
        assert_eq!(args.texture, Some(PathBuf::from("color.png")));
        assert!(args.upload);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["map.png", "--precision"]).is_err());
        assert!(parse(&["map.png", "--precision", "-1"]).is_err());
        assert!(parse(&["map.png", "--fast"]).is_err());
        assert!(parse(&["a.png", "b.png"]).is_err());
    }

    #[test]
    fn command_line_overrides_defaults() {
        let settings = parse(&["map.png", "--precision", "3"]).unwrap().settings().unwrap();
        assert_eq!(settings.precision, 3);
        assert_eq!(settings.label, "Terrain");
    }

    #[test]
    fn waves_need_no_heightmap() {
        let args = parse(&["--waves", "8"]).unwrap();
        let mesh = build_mesh(&args).unwrap();
        assert_eq!(mesh.vertices.len(), 64);
    }
}
