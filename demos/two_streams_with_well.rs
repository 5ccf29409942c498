use anyhow::{Result, bail};
use modflow_kit::packages::BudgetOutput;
use modflow_kit::{
    Array2d, Array3d, Basic, Discretization, FlowProperties, Grid, Model, Nwt, OutputControl,
    PackageKind, RiverRecord, River, RunConfig, ScenarioOutput, StressPeriodData,
    UpstreamWeighting, Version, Well, WellRecord, capture_fractions,
};
use ndarray::{Array1, Array2, Axis};

const NAME: &str = "TwoStreamsWithWell";
const NCOL: usize = 101;
const QW: f64 = -2.0;
const HEAD_L: f64 = 110.0;
const HEAD_R: f64 = 90.0;

// horizontal K of 1e-6 m/s in m/d
const HK: f64 = 1e-6 * 86400.0;

/// Two streams at different elevations with a well halfway between them, `nlay` layers over a
/// 100 m thick aquifer.
fn build(config: &RunConfig, nlay: usize) -> Result<Model> {
    let tops: Array2<f64> = Array1::linspace(HEAD_L, HEAD_R, NCOL).insert_axis(Axis(0));
    let thickness = 100.0 / nlay as f64;
    let botm: Vec<Array2d<f64>> = (1..=nlay)
        .map(|k| Array2d::Values(&tops - thickness * k as f64))
        .collect();
    let grid = Grid::new(nlay, 1, NCOL, 100.0, 24.0, tops.clone(), botm)?;

    let mut mf = Model::with_config(NAME, Version::MfNwt, config);
    mf.set_discretization(Discretization::steady(grid));
    mf.add(Basic::all_active(Array3d::Layers(vec![Array2d::Values(tops.clone()); nlay])))?;
    mf.add(UpstreamWeighting::new(
        FlowProperties::new(HK, 1.0)
            .with_storage(1e-5, 0.1)
            .with_laytyp(1)
            .with_layvka(1),
    ))?;
    mf.add(Nwt::default())?;

    let cond = (HK * 10.0 * 10.0).round();
    let (left, right) = (tops[[0, 0]], tops[[0, NCOL - 1]]);
    mf.add(
        River::new(StressPeriodData::steady(vec![
            RiverRecord::new(0, 0, 0, left, cond, left - 10.0),
            RiverRecord::new(0, 0, NCOL - 1, right, cond, right - 10.0),
        ]))
        .with_budget(BudgetOutput::file(61, format!("{}.riv.out", NAME))),
    )?;

    let actions: &[&str] = &[
        "save head",
        "save budget",
        "save drawdown",
        "print head",
        "print budget",
        "print drawdown",
    ];
    mf.add(OutputControl::from_words(&[((0, 0), actions)])?)?;
    Ok(mf)
}

fn run(mf: &mut Model, qw: Option<f64>) -> Result<ScenarioOutput> {
    match qw {
        Some(q) => {
            mf.add(Well::new(StressPeriodData::steady(vec![WellRecord::new(0, 0, NCOL / 2, q)])))?;
        }
        None => {
            mf.remove(PackageKind::Wel);
        }
    }
    mf.write_input()?;
    if !mf.run()?.success {
        bail!("MODFLOW did not terminate normally");
    }
    Ok(ScenarioOutput::collect(mf, 1.0, &format!("{}.riv.out", NAME), "RIVER LEAKAGE")?)
}

fn main() -> Result<()> {
    env_logger::init();
    let config = RunConfig::from_env();
    let nodata = [-9999.0, -1e30];

    for nlay in [1, 5] {
        let mut mf = build(&config, nlay)?;
        let no_pump = run(&mut mf, None)?;
        let pump = run(&mut mf, Some(QW))?;

        let wte_no_pump = no_pump.water_table(&nodata);
        let wte_pump = pump.water_table(&nodata);
        let ddn = &wte_no_pump - &wte_pump;
        let capture = capture_fractions(&no_pump, &pump, QW)?;

        println!("{} layer(s)", nlay);
        println!("left/right capture fraction {:.3}/{:.3}", capture[0], capture[1]);
        println!("max drawdown of the water table {:.3} m", ddn.fold(f64::NAN, |m, &d| m.max(d)));
    }
    Ok(())
}
