//! Conversion of a found [Path] back into a raster shaped like the input.
use num_traits::{NumCast, ToPrimitive};

use crate::config::PathMarker;
use crate::cost::CostModel;
use crate::error::{Result, RouteError};
use crate::path::Path;
use crate::raster::{Raster, RasterValue};

/// The value of cells off the path: the template's no-data sentinel, else NaN for
/// floating point rasters, else zero.
pub fn empty_value<T: RasterValue>(template: &Raster<T>) -> T {
    template
        .nodata()
        .or_else(|| <T as NumCast>::from(f64::NAN))
        .unwrap_or_else(T::zero)
}

/// Whether `T` drops fractions on conversion from [f64].
fn is_integral<T: RasterValue>() -> bool {
    <T as NumCast>::from(0.5).and_then(|v| v.to_f64()) == Some(0.0)
}

/// Marker values for each cell of `path`, in path order.
fn marker_values<T: RasterValue>(path: &Path, marker: PathMarker, costs: &CostModel) -> Result<Vec<T>> {
    match marker {
        PathMarker::One => Ok(vec![T::one(); path.len()]),
        PathMarker::StepIndex => (1..=path.len())
            .map(|i| {
                <T as NumCast>::from(i).ok_or_else(|| {
                    RouteError::InvalidConfiguration(format!(
                        "step index {i} does not fit the raster value type"
                    ))
                })
            })
            .collect(),
        PathMarker::AccumulatedCost => {
            let acc = path.cumulative_costs(costs).ok_or_else(|| {
                RouteError::InvalidConfiguration("path steps between non-neighbouring cells".into())
            })?;
            let integral = is_integral::<T>();
            acc.into_iter()
                .map(|c| {
                    // Integer rasters get the nearest whole cost rather than a truncated one.
                    let c = if integral { c.round() } else { c };
                    <T as NumCast>::from(c).ok_or_else(|| {
                        RouteError::InvalidConfiguration(format!(
                            "accumulated cost {c} does not fit the raster value type"
                        ))
                    })
                })
                .collect()
        }
    }
}

/// Writes `path` into a fresh raster with the shape, coordinates and no-data sentinel of
/// `template`. Path cells receive their `marker` value and every other cell the
/// [empty_value]. The template is left untouched.
///
/// Fails with [RouteError::InvalidConfiguration] if a marker equals the empty value,
/// since the path could then not be told apart from the background. This happens for
/// [PathMarker::AccumulatedCost] whenever the empty value is zero.
pub fn rasterize<T: RasterValue>(
    path: &Path,
    template: &Raster<T>,
    marker: PathMarker,
    costs: &CostModel,
) -> Result<Raster<T>> {
    if let Some(cell) = path.cells.iter().find(|c| !template.in_bounds(**c)) {
        return Err(RouteError::InvalidConfiguration(format!(
            "path cell {cell} lies outside the {}x{} template",
            template.width(),
            template.height()
        )));
    }
    let empty = empty_value(template);
    let values = marker_values::<T>(path, marker, costs)?;
    if let Some((cell, _)) = path.cells.iter().zip(&values).find(|(_, v)| **v == empty) {
        return Err(RouteError::InvalidConfiguration(format!(
            "{marker:?} marker of path cell {cell} equals the empty value {empty:?}"
        )));
    }
    let mut output = template.filled_like(empty);
    for (cell, value) in path.cells.iter().zip(values) {
        output.set(*cell, value);
    }
    Ok(output)
}
