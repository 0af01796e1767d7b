//! Ordered parameter axes and their cross product.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{ScenarioError, ScenarioResult};

/// One independent variable of an experiment.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Axis {
    pub name:   String,
    #[serde(deserialize_with = "crate::config::scalar_strings")]
    pub values: Vec<String>,
    /// Substitutions applied when a value names a base-file location,
    /// e.g. `4DRTA` → `4DoF`.
    #[serde(default)]
    pub base_alias: BTreeMap<String, String>,
}

impl Axis {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name:       name.into(),
            values:     values.into_iter().map(Into::into).collect(),
            base_alias: BTreeMap::new(),
        }
    }

    pub fn with_alias(mut self, value: impl Into<String>, alias: impl Into<String>) -> Self {
        self.base_alias.insert(value.into(), alias.into());
        self
    }
}

/// Cross product of [`Axis`] values, last axis varying fastest.
#[derive(Clone, Debug)]
pub struct ParameterGrid {
    axes: Vec<Axis>,
}

impl ParameterGrid {
    /// Fails on an empty or repeated axis.
    pub fn new(axes: Vec<Axis>) -> ScenarioResult<Self> {
        for (i, axis) in axes.iter().enumerate() {
            if axis.values.is_empty() {
                return Err(ScenarioError::EmptyAxis(axis.name.clone()));
            }
            if axes[..i].iter().any(|a| a.name == axis.name) {
                return Err(ScenarioError::DuplicateAxis(axis.name.clone()));
            }
        }
        Ok(Self { axes })
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.iter().any(|a| a.name == name)
    }

    /// Number of tuples.  A grid without axes has one, empty, tuple.
    pub fn len(&self) -> usize {
        self.axes.iter().map(|a| a.values.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th tuple in product order.
    pub fn tuple(&self, mut i: usize) -> ParamTuple<'_> {
        let mut picks = vec![0; self.axes.len()];
        for (k, axis) in self.axes.iter().enumerate().rev() {
            picks[k] = i % axis.values.len();
            i /= axis.values.len();
        }
        ParamTuple { grid: self, picks }
    }

    pub fn iter(&self) -> impl Iterator<Item = ParamTuple<'_>> + '_ {
        (0..self.len()).map(|i| self.tuple(i))
    }
}

/// One point of a [`ParameterGrid`].
#[derive(Clone, Debug)]
pub struct ParamTuple<'g> {
    grid:  &'g ParameterGrid,
    picks: Vec<usize>,
}

impl<'g> ParamTuple<'g> {
    /// Value of axis `name`.
    pub fn get(&self, name: &str) -> Option<&'g str> {
        let k = self.grid.axes.iter().position(|a| a.name == name)?;
        Some(self.grid.axes[k].values[self.picks[k]].as_str())
    }

    /// Value of axis `name` after its base alias, if any.
    pub fn base_value(&self, name: &str) -> Option<&'g str> {
        let k = self.grid.axes.iter().position(|a| a.name == name)?;
        let axis = &self.grid.axes[k];
        let raw = axis.values[self.picks[k]].as_str();
        Some(axis.base_alias.get(raw).map_or(raw, String::as_str))
    }

    /// `(axis, value)` pairs in axis order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'g str, &'g str)> + '_ {
        self.grid
            .axes
            .iter()
            .zip(&self.picks)
            .map(|(a, &p)| (a.name.as_str(), a.values[p].as_str()))
    }
}
