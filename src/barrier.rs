//! Per-cell crossability from raw raster values.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use num_traits::ToPrimitive;

use crate::raster::{is_nan, Raster, RasterValue};
use crate::Cell;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Hash key for a raster value. Values are compared as [f64], with both zeros and every
/// NaN payload collapsed onto one key. Integers beyond 2^53 may share keys.
fn value_key<T: ToPrimitive>(value: T) -> Option<u64> {
    let v = value.to_f64()?;
    Some(if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    })
}

/// The set of raw values that mark a cell as a barrier. Keeps insertion order so the
/// set logs the same way it was configured.
#[derive(Clone, Debug, Default)]
pub struct BarrierSet {
    keys: FxIndexSet<u64>,
}

impl BarrierSet {
    pub fn new() -> BarrierSet {
        BarrierSet::default()
    }

    pub fn from_values<T, I>(values: I) -> BarrierSet
    where
        T: ToPrimitive,
        I: IntoIterator<Item = T>,
    {
        let mut set = BarrierSet::new();
        for value in values {
            set.insert(value);
        }
        set
    }

    /// Adds a value, returning [false] if it was already present or is not representable.
    pub fn insert<T: ToPrimitive>(&mut self, value: T) -> bool {
        match value_key(value) {
            Some(key) => self.keys.insert(key),
            None => false,
        }
    }

    pub fn contains<T: ToPrimitive>(&self, value: T) -> bool {
        value_key(value).map_or(false, |key| self.keys.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The configured values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.keys.iter().map(|&bits| f64::from_bits(bits))
    }
}

/// Decides whether a raster cell can be entered. A cell is blocked if it lies outside
/// the grid, holds a barrier value, holds the raster's no-data sentinel or holds NaN.
/// Barriers and no-data are independent: a cell value of zero is only a barrier if zero
/// was configured as one.
#[derive(Clone, Debug)]
pub struct BarrierClassifier<'a, T> {
    raster: &'a Raster<T>,
    barriers: BarrierSet,
}

impl<'a, T: RasterValue> BarrierClassifier<'a, T> {
    pub fn new(raster: &'a Raster<T>, barriers: BarrierSet) -> BarrierClassifier<'a, T> {
        BarrierClassifier { raster, barriers }
    }

    pub fn barriers(&self) -> &BarrierSet {
        &self.barriers
    }

    pub fn is_crossable_value(&self, value: T) -> bool {
        !(is_nan(value) || self.raster.is_nodata(value) || self.barriers.contains(value))
    }

    pub fn is_crossable(&self, cell: Cell) -> bool {
        self.raster
            .get(cell)
            .map_or(false, |value| self.is_crossable_value(value))
    }

    /// Crossability of every cell in row-major order.
    pub fn crossable_mask(&self) -> Vec<bool> {
        self.raster
            .values()
            .iter()
            .map(|&value| self.is_crossable_value(value))
            .collect()
    }
}
