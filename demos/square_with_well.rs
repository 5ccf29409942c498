use anyhow::{Result, bail};
use modflow_kit::{
    Basic, Discretization, FlowProperties, Grid, HeadFile, LayerProperty, Model, OcAction,
    OutputControl, Pcg, RunConfig, StressPeriodData, Version, Well, WellRecord,
};
use modflow_kit::export::{RasterGeometry, write_layer_tiff};
use std::collections::BTreeMap;

// 1000 m x 1000 m square, fixed heads of 100 m on the left and right sides and a well in the
// middle pumping 1000 m3/day
fn main() -> Result<()> {
    env_logger::init();
    let config = RunConfig::from_env();

    let (nlay, nrow, ncol) = (1, 50, 100);
    let (lx, ly, ztop, zbot) = (1000.0, 1000.0, 100.0, 0.0);
    let grid = Grid::uniform(nlay, nrow, ncol, lx / ncol as f64, ly / nrow as f64, ztop, zbot)?;
    let x_coord = grid.x_centers();
    let geometry = RasterGeometry::from_grid(&grid, 0.0, 0.0, -9999.0)?;

    let mut mf = Model::with_config("SquareWithWell-SteadyState", Version::Mf2005, &config);
    mf.set_discretization(Discretization::steady(grid));
    mf.add(Basic::new(Basic::fixed_sides(nlay, nrow, ncol), 100.0))?;
    mf.add(LayerProperty::new(
        FlowProperties::new(1.0, 1.0).with_storage(1e-4, 0.1).with_laytyp(1),
    ))?;
    mf.add(Pcg::default())?;

    let (r_well, c_well) = (nrow / 2, ncol / 2);
    mf.add(Well::new(StressPeriodData::steady(vec![WellRecord::new(0, r_well, c_well, -1000.0)])))?;
    mf.add(OutputControl::new(BTreeMap::from([(
        (0, 0),
        vec![OcAction::SaveHead, OcAction::SaveDrawdown],
    )])))?;

    mf.write_input()?;
    let report = mf.run()?;
    if !report.success {
        bail!("MODFLOW did not terminate normally");
    }

    let heads = HeadFile::open_text(mf.path(&format!("{}.hds", mf.name())), "head")?;
    let ddn = HeadFile::open_text(mf.path(&format!("{}.ddn", mf.name())), "drawdown")?;
    let Some(&time) = heads.times().first() else {
        bail!("no heads were saved");
    };
    let head = heads.data_at(time)?;
    let drawdown = ddn.data_at(time)?;

    println!("head at the well {:.3} m", head[[0, r_well, c_well]]);
    println!("drawdown at the well {:.3} m", drawdown[[0, r_well, c_well]]);
    println!("x, head, drawdown through the well");
    for (j, x) in x_coord.iter().enumerate() {
        println!("{:8.1} {:10.4} {:10.4}", x, head[[0, r_well, j]], drawdown[[0, r_well, j]]);
    }

    let head_layer = heads.layer_at(time, 0)?;
    write_layer_tiff(&head_layer, &geometry, mf.path("head.tif"))?;
    Ok(())
}
