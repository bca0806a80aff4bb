//! Rig logic inferred from blendshape naming conventions.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::RigLogicError;
use crate::grammar::{Component, NameClass, classify_name};
use crate::report::ClassificationReport;

/// A direct (pass-through) driver parsed from a blendshape name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    /// Full blendshape name, e.g. `mouthSmile_L`.
    pub name: String,
    /// Base name without the side suffix, e.g. `mouthSmile`.
    pub base: String,
    /// One or two letter side suffix, e.g. `L`.
    pub suffix: Option<String>,
}

/// One interpolation stop: the shape fully on at `threshold`, or a sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket {
    target: Option<usize>,
    threshold: f64,
}

/// In-betweens of one driver, sorted by threshold with sentinels at 0 and 1.
#[derive(Debug, Clone, PartialEq)]
struct InBetweenInfo {
    driver_output: usize,
    brackets: Vec<Bracket>,
}

#[derive(Debug, Clone, PartialEq)]
struct CorrectiveInfo {
    output: usize,
    deps: Vec<usize>,
}

/// Evaluates a blendshape set from its names alone.
///
/// Names are classified once at construction (see [`crate::classify_name`]):
///
/// * **direct** shapes copy their driver weight,
/// * **in-between** shapes (`jawOpen50`) peak when their driver reaches the
///   encoded percentage and cross-fade with their neighbouring in-betweens,
/// * **corrective** shapes (`jawOpen_mouthSmile_L`) are the product of their
///   components.
///
/// Outputs are indexed like the name list given to [`RigLogic::new`].
#[derive(Debug, Clone)]
pub struct RigLogic {
    names: Vec<String>,
    drivers: Vec<Driver>,
    driver_names: Vec<String>,
    direct: Vec<usize>,
    inbw: Vec<InBetweenInfo>,
    corr: Vec<CorrectiveInfo>,
    report: ClassificationReport,
}

impl RigLogic {
    /// Classifies `names`, logging a warning for anything that cannot be driven.
    ///
    /// Names that fail classification or resolution stay at 0 on every
    /// evaluation. Inspect [`RigLogic::report`] for details.
    #[tracing::instrument(skip_all, fields(n_names = names.len()))]
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_owned()).collect();
        let classes: Vec<Option<NameClass<'_>>> =
            names.iter().map(|n| classify_name(n)).collect();
        let mut report = ClassificationReport::default();

        // Pass 1: direct drivers
        let mut drivers = Vec::new();
        let mut direct = Vec::new();
        let mut driver_by_name: HashMap<String, usize> = HashMap::new();
        for (i, class) in classes.iter().enumerate() {
            if let Some(NameClass::Direct(c)) = class {
                driver_by_name.entry(names[i].clone()).or_insert(i);
                drivers.push(Driver {
                    name: names[i].clone(),
                    base: c.base.to_owned(),
                    suffix: c.suffix.map(str::to_owned),
                });
                direct.push(i);
                report.direct.push(names[i].clone());
            }
        }

        // Pass 2: in-betweens, grouped by parent driver output
        let mut groups: Vec<InBetweenInfo> = Vec::new();
        let mut group_of_driver: HashMap<usize, usize> = HashMap::new();
        let mut shape_by_name: HashMap<String, usize> = HashMap::new();
        for (i, class) in classes.iter().enumerate() {
            let Some(NameClass::InBetween(c)) = class else {
                continue;
            };
            let Some(&driver_output) = driver_by_name.get(&c.driver_name()) else {
                warn!(name = %names[i], driver = %c.driver_name(), "in-between has no driver");
                report.orphaned_in_betweens.push(names[i].clone());
                continue;
            };
            let g = *group_of_driver.entry(driver_output).or_insert_with(|| {
                groups.push(InBetweenInfo {
                    driver_output,
                    brackets: vec![
                        Bracket {
                            target: None,
                            threshold: 0.0,
                        },
                        Bracket {
                            target: None,
                            threshold: 1.0,
                        },
                    ],
                });
                groups.len() - 1
            });
            let threshold = f64::from(c.percent.unwrap_or(0)) / 100.0;
            if !insert_bracket(&mut groups[g].brackets, i, threshold) {
                warn!(name = %names[i], threshold, "in-between threshold already taken");
                report.orphaned_in_betweens.push(names[i].clone());
                continue;
            }
            shape_by_name.entry(c.shape_name()).or_insert(i);
            report.in_betweens.push(names[i].clone());
        }

        // Pass 3: correctives
        let mut corr = Vec::new();
        for (i, class) in classes.iter().enumerate() {
            let Some(NameClass::Corrective(components)) = class else {
                continue;
            };
            match resolve_components(components, &driver_by_name, &shape_by_name) {
                Ok(deps) => {
                    corr.push(CorrectiveInfo { output: i, deps });
                    report.correctives.push(names[i].clone());
                }
                Err(missing) => {
                    warn!(name = %names[i], missing = %missing, "corrective component not found");
                    report.unresolved_correctives.push(names[i].clone());
                }
            }
        }

        for (name, class) in names.iter().zip(&classes) {
            if class.is_none() {
                report.unclassified.push(name.clone());
            }
        }
        if report.classified_count() != names.len() {
            warn!(
                classified = report.classified_count(),
                total = names.len(),
                unclassified = report.unclassified.len(),
                "blendshape names do not follow the naming convention"
            );
        }
        debug!(
            direct = direct.len(),
            in_betweens = report.in_betweens.len(),
            correctives = corr.len(),
            "rig logic classified"
        );

        let driver_names = drivers.iter().map(|d| d.name.clone()).collect();
        Self {
            names,
            drivers,
            driver_names,
            direct,
            inbw: groups,
            corr,
            report,
        }
    }

    /// Like [`RigLogic::new`], but fails if any name is unclassified or unresolved.
    ///
    /// # Errors
    ///
    /// Returns [`RigLogicError::Validation`] summarising the offending names.
    pub fn strict<S: AsRef<str>>(names: &[S]) -> Result<Self, RigLogicError> {
        let rig = Self::new(names);
        rig.report.to_result()?;
        Ok(rig)
    }

    /// Names of the direct drivers, in the order [`RigLogic::eval`] expects their weights.
    pub fn drivers(&self) -> &[String] {
        &self.driver_names
    }

    /// Parsed direct drivers.
    pub fn driver_info(&self) -> &[Driver] {
        &self.drivers
    }

    /// All blendshape names; position is the output index.
    pub fn output_signals(&self) -> &[String] {
        &self.names
    }

    /// Number of outputs written by [`RigLogic::eval`].
    pub fn output_signals_count(&self) -> usize {
        self.names.len()
    }

    /// Classification outcome for every name.
    pub fn report(&self) -> &ClassificationReport {
        &self.report
    }

    /// Evaluates all blendshapes from the direct driver weights.
    ///
    /// Runs three passes in order, each reading what the previous wrote:
    /// direct copies, in-between cross-fades, corrective products. Outputs
    /// that are not driven are zero.
    ///
    /// # Errors
    ///
    /// Returns [`RigLogicError::LengthMismatch`] if `driver_weights` does not
    /// have one entry per driver or `outputs` one entry per name.
    pub fn eval(&self, driver_weights: &[f64], outputs: &mut [f64]) -> Result<(), RigLogicError> {
        if driver_weights.len() != self.direct.len() {
            return Err(RigLogicError::LengthMismatch {
                expected: self.direct.len(),
                got: driver_weights.len(),
                field: "driver weights",
            });
        }
        if outputs.len() != self.names.len() {
            return Err(RigLogicError::LengthMismatch {
                expected: self.names.len(),
                got: outputs.len(),
                field: "outputs",
            });
        }

        outputs.fill(0.0);
        for (&out, &w) in self.direct.iter().zip(driver_weights) {
            outputs[out] = w;
        }

        for info in &self.inbw {
            let raw = outputs[info.driver_output];
            // NaN drivers leave their in-betweens at rest
            let value = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
            let upper = info
                .brackets
                .iter()
                .skip(1)
                .position(|b| value <= b.threshold)
                .map_or(info.brackets.len() - 1, |p| p + 1);
            let lo = info.brackets[upper - 1];
            let hi = info.brackets[upper];
            let w = (value - lo.threshold) / (hi.threshold - lo.threshold);
            debug_assert!((0.0..=1.0).contains(&w), "in-between weight {w} out of range");
            if let Some(t) = hi.target {
                outputs[t] = w;
            }
            if let Some(t) = lo.target {
                outputs[t] = 1.0 - w;
            }
        }

        for info in &self.corr {
            outputs[info.output] = info.deps.iter().map(|&d| outputs[d]).product();
        }
        Ok(())
    }
}

/// Inserts `(target, threshold)` keeping brackets sorted. A real in-between at
/// 0% replaces the lower sentinel. Returns `false` if the threshold is taken.
fn insert_bracket(brackets: &mut Vec<Bracket>, target: usize, threshold: f64) -> bool {
    let pos = brackets.partition_point(|b| b.threshold < threshold);
    if let Some(existing) = brackets.get_mut(pos) {
        if existing.threshold == threshold {
            if existing.target.is_some() {
                return false;
            }
            existing.target = Some(target);
            return true;
        }
    }
    brackets.insert(
        pos,
        Bracket {
            target: Some(target),
            threshold,
        },
    );
    true
}

/// Resolves each component to an output index, or returns the first missing shape name.
fn resolve_components(
    components: &[Component<'_>],
    driver_by_name: &HashMap<String, usize>,
    shape_by_name: &HashMap<String, usize>,
) -> Result<Vec<usize>, String> {
    components
        .iter()
        .map(|c| {
            let (lookup, name) = match c.percent {
                None => (driver_by_name, c.driver_name()),
                Some(_) => (shape_by_name, c.shape_name()),
            };
            lookup.get(&name).copied().ok_or(name)
        })
        .collect()
}
