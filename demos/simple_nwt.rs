use anyhow::{Result, bail};
use modflow_kit::{
    Basic, Discretization, Grid, LayerProperty, Model, Nwt, OutputControl, Pcg, RunConfig,
    UpstreamWeighting, Version,
};

// The smallest model that runs: a 2 x 2 single layer grid with every package at its defaults.
// Pass `mf2005` to build it for MODFLOW-2005 instead of MODFLOW-NWT.
fn main() -> Result<()> {
    env_logger::init();
    let version = match std::env::args().nth(1).as_deref() {
        None | Some("mfnwt") => Version::MfNwt,
        Some("mf2005") => Version::Mf2005,
        Some(other) => bail!("unknown MODFLOW version {}", other),
    };
    let config = RunConfig::from_env();

    let mut ml = Model::with_config("testmodel", version, &config);
    ml.set_discretization(Discretization::steady(Grid::uniform(1, 2, 2, 1.0, 1.0, 1.0, 0.0)?));
    ml.add(Basic::default())?;
    ml.add(OutputControl::default())?;
    match version {
        Version::Mf2005 => {
            ml.add(LayerProperty::default())?;
            ml.add(Pcg::default())?;
        }
        Version::MfNwt => {
            ml.add(UpstreamWeighting::default())?;
            ml.add(Nwt::default())?;
        }
    }

    ml.write_input()?;
    let report = ml.run()?;
    println!("normal termination: {}", report.success);
    Ok(())
}
