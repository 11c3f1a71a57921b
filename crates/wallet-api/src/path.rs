use std::fmt;
use std::ops::Add;

use bitcoin::bip32::{self, DerivationPath};
use serde::{Deserialize, Serialize};

use crate::child_number::ChildNumber;

/// An ordered sequence of derivation steps, e.g. `84'/0'/0'/0`.
///
/// Paths are immutable: concatenation and appending return new values.
/// Encodes as a sequence of [`ChildNumber`] objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<ChildNumber>,
}

impl Path {
    /// Build a path from a literal list of steps. Panics if `steps` is empty;
    /// use [`Path::empty`] for the distinguished empty path.
    pub fn from_steps(steps: Vec<ChildNumber>) -> Self {
        assert!(!steps.is_empty(), "path literal must have at least one step");
        Self { steps }
    }

    /// The path with no steps.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Single hardened step, `index'`.
    pub fn hardened(index: u32) -> Self {
        Self {
            steps: vec![ChildNumber::hardened(index)],
        }
    }

    /// Single non-hardened step.
    pub fn normal(index: u32) -> Self {
        Self {
            steps: vec![ChildNumber::normal(index)],
        }
    }

    /// New path with `tail` added after the last step.
    pub fn appending(&self, tail: ChildNumber) -> Path {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(tail);
        Path { steps }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True only for [`Path::empty`].
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `position`, if any.
    pub fn get(&self, position: usize) -> Option<ChildNumber> {
        self.steps.get(position).copied()
    }

    /// Borrow the steps.
    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.steps
    }

    /// Steps from the root outwards.
    pub fn iter(&self) -> std::slice::Iter<'_, ChildNumber> {
        self.steps.iter()
    }

    /// Strict prefix test against `candidate`.
    ///
    /// Returns `(prefix, remaining)` when every step of `self` matches the
    /// leading steps of `candidate` and at least one step of `candidate`
    /// remains. Equal paths do not match.
    pub fn match_prefix(&self, candidate: &Path) -> Option<(Path, Path)> {
        if self.steps.len() >= candidate.steps.len() {
            return None;
        }

        let (head, tail) = candidate.steps.split_at(self.steps.len());
        if head != self.steps.as_slice() {
            return None;
        }

        Some((
            Path {
                steps: head.to_vec(),
            },
            Path {
                steps: tail.to_vec(),
            },
        ))
    }

    /// Convert to the `bitcoin` crate's derivation path. Master steps have no
    /// counterpart there and are dropped.
    pub fn to_derivation_path(&self) -> DerivationPath {
        self.steps
            .iter()
            .filter_map(|child| match *child {
                ChildNumber::Hardened(index) => Some(bip32::ChildNumber::Hardened { index }),
                ChildNumber::Normal(index) => Some(bip32::ChildNumber::Normal { index }),
                ChildNumber::Master => None,
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Inverse of [`Path::to_derivation_path`]. Index 0 maps to `Normal(0)`.
    pub fn from_derivation_path(path: &DerivationPath) -> Self {
        path.as_ref()
            .iter()
            .map(|child| ChildNumber::from_index(u32::from(*child)))
            .collect()
    }
}

impl Add<&Path> for &Path {
    type Output = Path;

    fn add(self, rhs: &Path) -> Path {
        let mut steps = Vec::with_capacity(self.steps.len() + rhs.steps.len());
        steps.extend_from_slice(&self.steps);
        steps.extend_from_slice(&rhs.steps);
        Path { steps }
    }
}

impl Add for Path {
    type Output = Path;

    fn add(self, rhs: Path) -> Path {
        &self + &rhs
    }
}

impl FromIterator<ChildNumber> for Path {
    fn from_iter<I: IntoIterator<Item = ChildNumber>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Path {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, child) in self.steps.iter().enumerate() {
            if position > 0 {
                f.write_str("/")?;
            }
            write!(f, "{child}")?;
        }
        Ok(())
    }
}
