//! Index correspondence between two ordered name lists.

use std::collections::HashMap;

use tracing::warn;

use crate::error::SignalsError;

/// Copies values from a source name order into a destination name order.
///
/// Built once from two name lists. Every source name found in the
/// destination (exact, case-sensitive match) becomes an index pair; names
/// present on one side only are reported through the hooks given to
/// [`NameMapper::with_hooks`] and kept for inspection.
#[derive(Debug, Clone)]
pub struct NameMapper {
    pairs: Vec<(usize, usize)>,
    src_len: usize,
    dest_len: usize,
    unmatched_src: Vec<String>,
    unmatched_dest: Vec<String>,
}

impl NameMapper {
    /// Builds a mapper that logs unmatched names as warnings.
    pub fn new<S: AsRef<str>, D: AsRef<str>>(src: &[S], dest: &[D]) -> Self {
        Self::with_hooks(
            src,
            dest,
            |name| warn!(name, "source signal has no destination"),
            |name| warn!(name, "destination signal has no source"),
        )
    }

    /// Builds a mapper, calling `on_unmatched_src` for every source name absent
    /// from `dest` and `on_unmatched_dest` for every destination name that no
    /// source claims.
    ///
    /// If `dest` contains a name twice, only its first occurrence is mapped.
    pub fn with_hooks<S, D, FS, FD>(
        src: &[S],
        dest: &[D],
        mut on_unmatched_src: FS,
        mut on_unmatched_dest: FD,
    ) -> Self
    where
        S: AsRef<str>,
        D: AsRef<str>,
        FS: FnMut(&str),
        FD: FnMut(&str),
    {
        let mut dest_index: HashMap<&str, usize> = HashMap::with_capacity(dest.len());
        for (j, name) in dest.iter().enumerate() {
            dest_index.entry(name.as_ref()).or_insert(j);
        }

        let mut claimed = vec![false; dest.len()];
        let mut pairs = Vec::with_capacity(src.len());
        let mut unmatched_src = Vec::new();
        for (i, name) in src.iter().enumerate() {
            let name = name.as_ref();
            match dest_index.get(name) {
                Some(&j) => {
                    pairs.push((i, j));
                    claimed[j] = true;
                }
                None => {
                    on_unmatched_src(name);
                    unmatched_src.push(name.to_owned());
                }
            }
        }

        let mut unmatched_dest = Vec::new();
        for (name, _) in dest.iter().zip(&claimed).filter(|(_, c)| !**c) {
            let name = name.as_ref();
            on_unmatched_dest(name);
            unmatched_dest.push(name.to_owned());
        }

        Self {
            pairs,
            src_len: src.len(),
            dest_len: dest.len(),
            unmatched_src,
            unmatched_dest,
        }
    }

    /// Copies `src_values[i]` into `dest_values[j]` for every mapped pair.
    ///
    /// Destination entries without a source keep their previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SignalsError::LengthMismatch`] if either array does not match
    /// the length of the name list it was built from. Nothing is written in
    /// that case.
    pub fn map(&self, src_values: &[f64], dest_values: &mut [f64]) -> Result<(), SignalsError> {
        if src_values.len() != self.src_len {
            return Err(SignalsError::LengthMismatch {
                expected: self.src_len,
                got: src_values.len(),
                field: "source values",
            });
        }
        if dest_values.len() != self.dest_len {
            return Err(SignalsError::LengthMismatch {
                expected: self.dest_len,
                got: dest_values.len(),
                field: "destination values",
            });
        }
        for &(i, j) in &self.pairs {
            dest_values[j] = src_values[i];
        }
        Ok(())
    }

    /// The `(source index, destination index)` pairs, in source order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Source names that have no destination.
    pub fn unmatched_src(&self) -> &[String] {
        &self.unmatched_src
    }

    /// Destination names that no source maps to.
    pub fn unmatched_dest(&self) -> &[String] {
        &self.unmatched_dest
    }

    /// Returns `true` if every name on both sides is matched.
    pub fn is_complete(&self) -> bool {
        self.unmatched_src.is_empty() && self.unmatched_dest.is_empty()
    }
}
