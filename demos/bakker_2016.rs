use anyhow::Result;
use modflow_kit::{
    Basic, Discretization, FlowProperties, Grid, HeadFile, LayerProperty, Model, OutputControl,
    Pcg, Recharge, RunConfig, StressPeriodData, Version, Well, WellRecord,
};

// One dimensional aquifer of 201 cells between two fixed heads, with recharge and two ditches
// draining 1 m3/d each (Bakker et al., 2016, figure 1).
fn main() -> Result<()> {
    env_logger::init();
    let config = RunConfig::from_env();

    let grid = Grid::uniform(1, 1, 201, 10.0, 1.0, 50.0, 0.0)?;
    let mut model = Model::with_config("gwexample", Version::Mf2005, &config);
    model.set_discretization(Discretization::steady(grid));
    model.add(Basic::new(Basic::fixed_sides(1, 1, 201), 20.0))?;
    model.add(LayerProperty::new(FlowProperties::new(10.0, 1.0).with_laytyp(1)))?;
    model.add(Recharge::constant(0.001))?;
    model.add(Well::new(StressPeriodData::steady(vec![
        WellRecord::new(0, 0, 50, -1.0),
        WellRecord::new(0, 0, 150, -1.0),
    ])))?;
    model.add(Pcg::default())?;
    model.add(OutputControl::default())?;

    model.write_input()?;
    model.run_checked()?;

    let h = HeadFile::open(model.path("gwexample.hds"))?.data_at(1.0)?;
    let ncol = h.dim().2;
    println!("x (m)  head (m)");
    for (j, head) in h.iter().enumerate() {
        println!("{:6.1} {:8.3}", 2000.0 * j as f64 / (ncol - 1) as f64, head);
    }
    Ok(())
}
