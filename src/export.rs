//! Raster export of single layers, for viewing results in a GIS.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ndarray::Array2;
use num::ToPrimitive;
use tiff::encoder::{TiffEncoder, colortype};
use tiff::tags::Tag;

use crate::array::Array1d;
use crate::error::{ModflowError, Result};
use crate::grid::Grid;

// GeoTIFF key ids and values
const GT_MODEL_TYPE: u16 = 1024;
const GT_RASTER_TYPE: u16 = 1025;
const PROJECTED_CS_TYPE: u16 = 3072;
const MODEL_TYPE_PROJECTED: u16 = 1;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// Where a layer sits on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterGeometry {
    /// x and y of the top left corner of cell (0, 0).
    pub origin: (f64, f64),
    pub delr: f64,
    pub delc: f64,
    pub nodata: f64,
    /// EPSG code of a projected coordinate system.
    pub crs: Option<u16>,
}

impl RasterGeometry {
    /// Geometry of an evenly spaced grid whose lower left corner is at (`xll`, `yll`).
    ///
    /// # Errors
    ///
    /// `Unsupported` when the columns or rows differ in width, a raster needs one cell size.
    pub fn from_grid(grid: &Grid, xll: f64, yll: f64, nodata: f64) -> Result<Self> {
        let delr = uniform_spacing("delr", &grid.delr, grid.ncol)?;
        let delc = uniform_spacing("delc", &grid.delc, grid.nrow)?;
        Ok(RasterGeometry {
            origin: (xll, yll + delc * grid.nrow as f64),
            delr,
            delc,
            nodata,
            crs: None,
        })
    }

    pub fn with_crs(mut self, epsg: u16) -> Self {
        self.crs = Some(epsg);
        self
    }

    fn geo_keys(&self) -> Vec<u16> {
        let mut keys = vec![
            GT_MODEL_TYPE,
            0,
            1,
            MODEL_TYPE_PROJECTED,
            GT_RASTER_TYPE,
            0,
            1,
            RASTER_PIXEL_IS_AREA,
        ];
        if let Some(epsg) = self.crs {
            keys.extend([PROJECTED_CS_TYPE, 0, 1, epsg]);
        }
        let nkeys = (keys.len() / 4) as u16;
        let mut directory = vec![1, 1, 0, nkeys];
        directory.extend(keys);
        directory
    }
}

fn uniform_spacing(name: &str, spacing: &Array1d<f64>, len: usize) -> Result<f64> {
    let first = spacing.value(0);
    if (1..len).all(|i| spacing.value(i) == first) {
        Ok(first)
    } else {
        Err(ModflowError::Unsupported(format!(
            "`{}` varies along the grid, rasters need a uniform cell size",
            name
        )))
    }
}

/// Write `layer` as a single band 32-bit float GeoTIFF, row 0 at the top.
///
/// The pixel scale, tie point and nodata value come from `geometry`. NaN cells and values that
/// cannot be represented as `f32` are written as nodata.
pub fn write_layer_tiff<T: ToPrimitive>(
    layer: &Array2<T>,
    geometry: &RasterGeometry,
    path: impl AsRef<Path>,
) -> Result<()> {
    let (nrow, ncol) = layer.dim();
    let (Ok(width), Ok(height)) = (u32::try_from(ncol), u32::try_from(nrow)) else {
        return Err(ModflowError::Unsupported(format!(
            "{} x {} layer is too large for a TIFF",
            nrow, ncol
        )));
    };
    let nodata = geometry.nodata as f32;
    let data: Vec<f32> = layer
        .iter()
        .map(|v| v.to_f32().filter(|v| !v.is_nan()).unwrap_or(nodata))
        .collect();

    let (x0, y0) = geometry.origin;
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path.as_ref())?))?;
    let mut image = encoder.new_image::<colortype::Gray32Float>(width, height)?;
    let tags = image.encoder();
    tags.write_tag(Tag::ModelPixelScaleTag, &[geometry.delr, geometry.delc, 0.0][..])?;
    tags.write_tag(Tag::ModelTiepointTag, &[0.0, 0.0, 0.0, x0, y0, 0.0][..])?;
    tags.write_tag(Tag::GeoKeyDirectoryTag, &geometry.geo_keys()[..])?;
    tags.write_tag(Tag::GdalNodata, geometry.nodata.to_string().as_str())?;
    image.write_data(&data)?;
    Ok(())
}
