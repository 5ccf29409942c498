//! Model arrays that are either a single constant or one value per cell, and their free-format
//! array control records.
use std::fmt::Display;
use std::io::Write;

use ndarray::{Array1, Array2, Array3, Axis};

use crate::error::{ModflowError, Result};

/// Values per line when an array is written out in full.
const VALUES_PER_LINE: usize = 10;

/// A value that can appear in a free-format MODFLOW array.
pub trait FreeFormat: Copy + PartialEq + Display {
    fn free(&self) -> String;
}

impl FreeFormat for f64 {
    fn free(&self) -> String {
        format!("{:15.6E}", self)
    }
}

impl FreeFormat for i32 {
    fn free(&self) -> String {
        format!("{:6}", self)
    }
}

fn write_control<T: FreeFormat>(
    out: &mut dyn Write,
    name: &str,
    constant: Option<T>,
) -> Result<()> {
    match constant {
        Some(v) => writeln!(out, "CONSTANT {} #{}", v.free().trim(), name)?,
        None => writeln!(out, "INTERNAL 1 (FREE) -1 #{}", name)?,
    }
    Ok(())
}

fn write_values<'a, T, I>(out: &mut dyn Write, values: I) -> Result<()>
where
    T: FreeFormat + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let values: Vec<&T> = values.into_iter().collect();
    for chunk in values.chunks(VALUES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|v| v.free()).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}

fn shape_error(name: &str, expected: &[usize], found: &[usize]) -> ModflowError {
    ModflowError::ShapeMismatch {
        name: name.to_string(),
        expected: expected.to_vec(),
        found: found.to_vec(),
    }
}

/// One value per row or per column (`DELR`, `DELC`).
#[derive(Debug, Clone, PartialEq)]
pub enum Array1d<T> {
    Constant(T),
    Values(Array1<T>),
}

impl<T: FreeFormat> Array1d<T> {
    pub fn check_shape(&self, name: &str, len: usize) -> Result<()> {
        match self {
            Array1d::Values(v) if v.len() != len => Err(shape_error(name, &[len], v.shape())),
            _ => Ok(()),
        }
    }

    pub fn write(&self, out: &mut dyn Write, name: &str) -> Result<()> {
        match self {
            Array1d::Constant(v) => write_control(out, name, Some(*v)),
            Array1d::Values(values) => {
                write_control::<T>(out, name, None)?;
                write_values(out, values.iter())
            }
        }
    }

    pub fn value(&self, index: usize) -> T {
        match self {
            Array1d::Constant(v) => *v,
            Array1d::Values(values) => values[index],
        }
    }
}

impl From<f64> for Array1d<f64> {
    fn from(v: f64) -> Self {
        Array1d::Constant(v)
    }
}

impl<T> From<Array1<T>> for Array1d<T> {
    fn from(v: Array1<T>) -> Self {
        Array1d::Values(v)
    }
}

/// One value per cell of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Array2d<T> {
    Constant(T),
    Values(Array2<T>),
}

impl<T: FreeFormat> Array2d<T> {
    pub fn check_shape(&self, name: &str, nrow: usize, ncol: usize) -> Result<()> {
        match self {
            Array2d::Values(v) if v.dim() != (nrow, ncol) => {
                Err(shape_error(name, &[nrow, ncol], v.shape()))
            }
            _ => Ok(()),
        }
    }

    pub fn write(&self, out: &mut dyn Write, name: &str) -> Result<()> {
        match self {
            Array2d::Constant(v) => write_control(out, name, Some(*v)),
            Array2d::Values(values) => {
                write_control::<T>(out, name, None)?;
                // every row starts on a new line
                for row in values.rows() {
                    write_values(out, row.iter())?;
                }
                Ok(())
            }
        }
    }

    pub fn value(&self, row: usize, column: usize) -> T {
        match self {
            Array2d::Constant(v) => *v,
            Array2d::Values(values) => values[[row, column]],
        }
    }
}

impl From<f64> for Array2d<f64> {
    fn from(v: f64) -> Self {
        Array2d::Constant(v)
    }
}

impl From<i32> for Array2d<i32> {
    fn from(v: i32) -> Self {
        Array2d::Constant(v)
    }
}

impl<T> From<Array2<T>> for Array2d<T> {
    fn from(v: Array2<T>) -> Self {
        Array2d::Values(v)
    }
}

/// One [`Array2d`] per layer, or a single constant for every cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Array3d<T> {
    Constant(T),
    Layers(Vec<Array2d<T>>),
}

impl<T: FreeFormat> Array3d<T> {
    pub fn check_shape(&self, name: &str, nlay: usize, nrow: usize, ncol: usize) -> Result<()> {
        match self {
            Array3d::Constant(_) => Ok(()),
            Array3d::Layers(layers) => {
                if layers.len() != nlay {
                    return Err(shape_error(name, &[nlay, nrow, ncol], &[layers.len(), nrow, ncol]));
                }
                layers
                    .iter()
                    .try_for_each(|layer| layer.check_shape(name, nrow, ncol))
            }
        }
    }

    /// The array of one layer. The caller has checked the shape.
    pub fn layer(&self, k: usize) -> Array2d<T> {
        match self {
            Array3d::Constant(v) => Array2d::Constant(*v),
            Array3d::Layers(layers) => layers[k].clone(),
        }
    }

    pub fn write_layer(&self, out: &mut dyn Write, name: &str, k: usize) -> Result<()> {
        self.layer(k).write(out, &format!("{} layer {}", name, k + 1))
    }

    pub fn value(&self, layer: usize, row: usize, column: usize) -> T {
        match self {
            Array3d::Constant(v) => *v,
            Array3d::Layers(layers) => layers[layer].value(row, column),
        }
    }
}

impl From<f64> for Array3d<f64> {
    fn from(v: f64) -> Self {
        Array3d::Constant(v)
    }
}

impl From<i32> for Array3d<i32> {
    fn from(v: i32) -> Self {
        Array3d::Constant(v)
    }
}

impl<T: Clone> From<Array3<T>> for Array3d<T> {
    fn from(v: Array3<T>) -> Self {
        Array3d::Layers(
            v.axis_iter(Axis(0))
                .map(|layer| Array2d::Values(layer.to_owned()))
                .collect(),
        )
    }
}

impl<T> From<Vec<Array2d<T>>> for Array3d<T> {
    fn from(v: Vec<Array2d<T>>) -> Self {
        Array3d::Layers(v)
    }
}

/// A per-layer flag or value written as a single line (`LAYTYP`, `LAYAVG`, ...).
pub(crate) fn write_layer_line<T: FreeFormat>(
    out: &mut dyn Write,
    values: &[T],
    name: &str,
) -> Result<()> {
    let line: Vec<String> = values.iter().map(|v| v.free().trim().to_string()).collect();
    writeln!(out, "{} #{}", line.join(" "), name)?;
    Ok(())
}

/// Broadcast a per-layer setting: a single entry applies to every layer.
pub(crate) fn per_layer<T: Copy>(values: &[T], nlay: usize, name: &str) -> Result<Vec<T>> {
    match values.len() {
        1 => Ok(vec![values[0]; nlay]),
        n if n == nlay => Ok(values.to_vec()),
        n => Err(shape_error(name, &[nlay], &[n])),
    }
}
