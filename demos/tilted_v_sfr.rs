use anyhow::{Context, Result, bail};
use modflow_kit::packages::BudgetOutput;
use modflow_kit::time::periods;
use modflow_kit::{
    Basic, Discretization, FlowProperties, Grid, HeadFile, LayerProperty, Model, OcAction,
    OutputControl, Pcg, ReachRecord, Recharge, RechargeOption, RunConfig, SegmentRecord, SfrOutput,
    StreamFlow, StressPeriodData, Version,
};
use ndarray::Array2;

// A tilted V ("open book") aquifer drained by a stream down the middle. One steady state period
// without recharge, 100 days with 0.001 m/day of recharge and 100 days without.
fn main() -> Result<()> {
    env_logger::init();
    let config = RunConfig::from_env();

    let (nlay, nrow, ncol) = (1, 20, 21);
    let (lx, ly) = (1000.0, 1000.0);
    let delc = ly / nrow as f64;
    let hk = 1.0;

    // 25 m at the edges down to 20 m in the middle, dropping 0.5 m per row
    let ztop = Array2::from_shape_fn((nrow, ncol), |(i, j)| {
        20.0 + 0.5 * (j as f64 - 10.0).abs() - 0.5 * i as f64
    });
    let strt = Array2::from_shape_fn((nrow, ncol), |(i, _)| 22.5 - 0.5 * i as f64);

    let grid = Grid::new(nlay, nrow, ncol, lx / ncol as f64, delc, ztop.clone(), 0.0)?;
    let dis = Discretization::new(
        grid,
        periods(&[1.0, 100.0, 100.0], &[1, 100, 100], &[true, false, false])
            .context("period lists differ in length")?,
    )?;
    let nstp: Vec<usize> = dis.periods.iter().map(|p| p.nstp).collect();

    let mut mf = Model::with_config("TiltedVwithSFR", Version::Mf2005, &config);
    mf.set_discretization(dis);
    mf.add(Basic::new(Basic::fixed_sides(nlay, nrow, ncol), strt.insert_axis(ndarray::Axis(0))))?;
    mf.add(LayerProperty::new(
        FlowProperties::new(hk, 1.0).with_storage(1e-4, 0.1).with_laytyp(1),
    ))?;
    mf.add(Pcg::default())?;
    mf.add(
        Recharge::per_period(&[(0, 0.0), (1, 0.001), (2, 0.0)])
            .with_option(RechargeOption::HighestActive),
    )?;
    mf.add(OutputControl::every_step(
        &nstp,
        &[OcAction::SaveHead, OcAction::SaveBudget, OcAction::SaveDrawdown],
    ))?;

    let slope = (ztop[[0, 10]] - ztop[[1, 10]]) / delc;
    let reaches: Vec<ReachRecord> = (0..nrow)
        .map(|i| ReachRecord {
            layer: 0,
            row: i,
            column: 10,
            segment: 1,
            reach: i + 1,
            rchlen: delc,
            strtop: ztop[[i, 10]] - 1.0,
            slope,
            strthick: 1.0,
            strhc1: hk / 10.0,
        })
        .collect();
    let segment = SegmentRecord::rectangular(1, 0, 0.03, 3.0);
    let segments = StressPeriodData::new()
        .with_period(0, vec![segment])
        .with_period(1, vec![segment])
        .with_period(2, vec![segment]);
    mf.add(
        StreamFlow::new(reaches, segments)
            .with_budget(BudgetOutput::default())
            .with_listing(81)
            .with_unit_number(16),
    )?;

    mf.write_input()?;
    if !mf.run()?.success {
        bail!("MODFLOW did not terminate normally");
    }

    let heads = HeadFile::open_text(mf.path(&format!("{}.hds", mf.name())), "head")?;
    let times = heads.times();
    for &t in [0, 50, 100, 150].iter().filter_map(|&n| times.get(n)) {
        let h = heads.data_at(t)?;
        println!("time {:6.1}: head at the stream outlet {:.3} m", t, h[[0, nrow - 1, 10]]);
    }

    let sfr = SfrOutput::open(mf.path(&format!("{}.sfr.out", mf.name())))?;
    println!("period step      Qout  Qaquifer");
    for r in sfr.reach(1, 19) {
        println!("{:6} {:4} {:9.3} {:9.3}", r.kper + 1, r.kstp + 1, r.qout, r.qaquifer);
    }
    Ok(())
}
