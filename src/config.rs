use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use facerig_solver::SolverConfig;
use serde::Deserialize;

/// Top-level facerig configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacerigConfig {
    /// Rule solver settings.
    pub solver: SolverToml,

    /// Optional rig stage applied to solver outputs.
    #[serde(default)]
    pub rig: Option<RigToml>,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverToml {
    /// Rule file, V1 or V2 JSON. Relative paths resolve against the config file.
    pub rules: PathBuf,
    #[serde(default = "default_true")]
    pub sparse_deltas: bool,
    #[serde(default = "default_sparse_threshold")]
    pub sparse_threshold: f64,
    #[serde(default = "default_invert_eps")]
    pub invert_eps: f64,
}

impl SolverToml {
    pub fn to_solver_config(&self) -> SolverConfig {
        SolverConfig::new()
            .with_sparse_deltas(self.sparse_deltas)
            .with_sparse_threshold(self.sparse_threshold)
            .with_invert_eps(self.invert_eps)
    }
}

fn default_true() -> bool {
    true
}
fn default_sparse_threshold() -> f64 {
    1e-3
}
fn default_invert_eps() -> f64 {
    1e-5
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigToml {
    /// Blendshape names of the target mesh.
    pub names: Vec<String>,
    /// Derive in-betweens and correctives from the names; otherwise pass through.
    #[serde(default = "default_true")]
    pub convention: bool,
    /// Reject names that break the convention instead of leaving them at zero.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl FacerigConfig {
    /// Reads and parses `path`, resolving relative file paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.solver.rules);
        for p in [&mut self.io.input, &mut self.io.output].into_iter().flatten() {
            resolve(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: FacerigConfig = toml::from_str("[solver]\nrules = \"face.json\"\n").unwrap();
        assert_eq!(config.solver.rules, PathBuf::from("face.json"));
        assert!(config.solver.sparse_deltas);
        assert_eq!(config.solver.sparse_threshold, 1e-3);
        assert_eq!(config.solver.invert_eps, 1e-5);
        assert!(config.rig.is_none());
        assert!(config.io.input.is_none());
        assert!(config.solver.to_solver_config().validate().is_ok());
    }

    #[test]
    fn full_config() {
        let text = r#"
            [solver]
            rules = "rules/face.json"
            sparse_deltas = false
            invert_eps = 1e-8

            [rig]
            names = ["jawOpen", "jawOpen50"]
            strict = true

            [io]
            input = "take01.json"
            output = "/tmp/out.json"
        "#;
        let config: FacerigConfig = toml::from_str(text).unwrap();
        let rig = config.rig.as_ref().unwrap();
        assert_eq!(rig.names, ["jawOpen", "jawOpen50"]);
        assert!(rig.convention);
        assert!(rig.strict);

        let solver = config.solver.to_solver_config();
        assert!(!solver.sparse_deltas());
        assert_eq!(solver.invert_eps(), 1e-8);
    }

    #[test]
    fn unknown_fields_rejected() {
        let text = "[solver]\nrules = \"a.json\"\nsparse = true\n";
        assert!(toml::from_str::<FacerigConfig>(text).is_err());
    }

    #[test]
    fn missing_solver_section_rejected() {
        assert!(toml::from_str::<FacerigConfig>("[io]\ninput = \"a.json\"\n").is_err());
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facerig.toml");
        std::fs::write(
            &path,
            "[solver]\nrules = \"face.json\"\n[io]\ninput = \"/abs/frames.json\"\noutput = \"out.json\"\n",
        )
        .unwrap();
        let config = FacerigConfig::load(&path).unwrap();
        assert_eq!(config.solver.rules, dir.path().join("face.json"));
        assert_eq!(config.io.input, Some(PathBuf::from("/abs/frames.json")));
        assert_eq!(config.io.output, Some(dir.path().join("out.json")));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = FacerigConfig::load(Path::new("/nonexistent/facerig.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
