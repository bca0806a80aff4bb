//! Run command: retarget recorded frames through solver and rig.

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span, trace};

use facerig_riglogic::{Rig, RigEval, RigLogic};
use facerig_signals::{NameMapper, OutputCache};
use facerig_solver::RuleSolver;

use crate::cli::RunArgs;
use crate::config::{FacerigConfig, RigToml};
use crate::frames::Frames;

/// Solver outputs re-mapped onto a rig's drivers.
struct RigStage {
    rig: Rig,
    map: NameMapper,
    drivers: Vec<f64>,
}

/// Per-frame retargeting chain: input mapping, solver, optional rig.
pub struct Pipeline {
    solver: RuleSolver,
    input_map: NameMapper,
    rig: Option<RigStage>,
    inputs: Vec<f64>,
    solved: Vec<f64>,
    cache: OutputCache,
}

impl Pipeline {
    /// Wires `input_signals` (the recorded names) into `solver`, then `rig`.
    pub fn new(solver: RuleSolver, input_signals: &[String], rig: Option<Rig>) -> Self {
        let input_map = NameMapper::new(input_signals, solver.input_signals());
        let inputs = vec![0.0; solver.input_signals().len()];
        let solved = vec![0.0; solver.output_signals().len()];
        let rig = rig.map(|rig| {
            let map = NameMapper::new(solver.output_signals(), rig.drivers());
            let drivers = vec![0.0; rig.drivers().len()];
            RigStage { rig, map, drivers }
        });
        let n_out = match &rig {
            Some(stage) => stage.rig.output_signals_count(),
            None => solved.len(),
        };
        Self {
            solver,
            input_map,
            rig,
            inputs,
            solved,
            cache: OutputCache::new(n_out),
        }
    }

    /// Names of the values produced by [`Pipeline::process`].
    pub fn output_signals(&self) -> &[String] {
        match &self.rig {
            Some(stage) => stage.rig.output_signals(),
            None => self.solver.output_signals(),
        }
    }

    /// Evaluates one frame into `out`, returning how many outputs changed.
    pub fn process(&mut self, frame: &[f64], out: &mut [f64]) -> Result<usize> {
        self.input_map.map(frame, &mut self.inputs)?;
        match &mut self.rig {
            Some(stage) => {
                self.solver.eval(&self.inputs, &mut self.solved)?;
                stage.map.map(&self.solved, &mut stage.drivers)?;
                stage.rig.eval(&stage.drivers, out)?;
            }
            None => self.solver.eval(&self.inputs, out)?,
        }
        Ok(self.cache.update(out, |_, _| {})?)
    }

    /// Runs every frame of `take`.
    pub fn process_all(&mut self, take: &Frames) -> Result<Frames> {
        let mut result = Frames::new(self.output_signals().to_vec());
        let mut changed = 0;
        for (i, frame) in take.frames.iter().enumerate() {
            let mut out = vec![0.0; result.signals.len()];
            let n = self
                .process(frame, &mut out)
                .with_context(|| format!("failed to evaluate frame {i}"))?;
            trace!(frame = i, changed = n, "frame evaluated");
            changed += n;
            result.frames.push(out);
        }
        debug!(
            frames = result.frames.len(),
            changed,
            total = result.frames.len() * result.signals.len(),
            "output channel updates"
        );
        Ok(result)
    }
}

fn build_rig(cfg: &RigToml) -> Result<Rig> {
    if cfg.convention && cfg.strict {
        let rig = RigLogic::strict(&cfg.names).context("rig names rejected in strict mode")?;
        return Ok(rig.into());
    }
    Ok(Rig::new(&cfg.names, cfg.convention))
}

/// Run the retargeting pipeline over a recorded take.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let config = FacerigConfig::load(&args.config)?;

    let rules = &config.solver.rules;
    let text = std::fs::read_to_string(rules)
        .with_context(|| format!("failed to read rules: {}", rules.display()))?;
    let solver = RuleSolver::with_config(&text, &config.solver.to_solver_config())
        .with_context(|| format!("failed to compile rules: {}", rules.display()))?;
    info!(
        rules = solver.rule_count(),
        inputs = solver.input_signals().len(),
        outputs = solver.output_signals().len(),
        "solver ready"
    );

    let rig = config.rig.as_ref().map(build_rig).transpose()?;

    let input = args
        .input
        .as_ref()
        .or(config.io.input.as_ref())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let take = Frames::read(input)?;
    info!(path = %input.display(), frames = take.frames.len(), "frames loaded");

    let mut pipeline = Pipeline::new(solver, &take.signals, rig);
    let result = pipeline.process_all(&take)?;

    let output = args.output.as_ref().or(config.io.output.as_ref());
    result.write(output.map(|p| p.as_path()))?;
    if let Some(path) = output {
        info!(path = %path.display(), "output written");
    }
    Ok(())
}
