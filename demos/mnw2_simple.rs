use anyhow::{Context, Result};
use modflow_kit::time::periods;
use modflow_kit::{
    Basic, Discretization, Grid, LayerProperty, LossType, Mnw2Rate, Mnw2Well, Model,
    MultiNodeWell, OutputControl, Pcg, RunConfig, StressPeriodData, Version, WellNode,
};

const SKIN: LossType = LossType::Skin {
    rw: 1.0,
    rskin: 2.0,
    kskin: 5.0,
};

fn well(wellid: &str, nodes: Vec<WellNode>, zpump: f64) -> Mnw2Well {
    Mnw2Well {
        wellid: wellid.to_string(),
        loss: SKIN,
        nodes,
        zpump: Some(zpump),
    }
}

// Two multi-node wells in a 3 layer model, pumping from the second period on. The third period
// reuses the pumping of the second.
fn main() -> Result<()> {
    env_logger::init();
    let config = RunConfig::from_env();

    let grid = Grid::uniform(3, 5, 5, 1.0, 1.0, 10.0, 0.0)?;
    let dis = Discretization::new(
        grid,
        periods(&[1.0; 3], &[1; 3], &[true; 3]).context("period lists differ in length")?,
    )?;
    let mut m = Model::with_config("mnw2example", Version::Mf2005, &config);
    m.set_discretization(dis);
    m.add(Basic::default())?;
    m.add(LayerProperty::default())?;
    m.add(Pcg::default())?;
    m.add(OutputControl::default())?;

    let stress_period_data = StressPeriodData::new()
        .with_period(0, vec![Mnw2Rate::new("well1", 0.0), Mnw2Rate::new("well2", 0.0)])
        .with_period(1, vec![Mnw2Rate::new("well1", 100.0), Mnw2Rate::new("well2", 1000.0)])
        .with_control(vec![2, 2, -1]);

    // open intervals by elevation, MODFLOW finds the layers
    let by_interval = vec![
        well(
            "well1",
            vec![WellNode::Interval {
                ztop: 9.5,
                zbotm: 5.1,
                row: 1,
                column: 1,
            }],
            6.2,
        ),
        well(
            "well2",
            vec![WellNode::Interval {
                ztop: 9.1,
                zbotm: 3.7,
                row: 3,
                column: 3,
            }],
            4.1,
        ),
    ];

    // the same wells placed in cells
    let by_cell = vec![
        well(
            "well1",
            vec![
                WellNode::Cell {
                    layer: 0,
                    row: 1,
                    column: 1,
                },
                WellNode::Cell {
                    layer: 1,
                    row: 1,
                    column: 1,
                },
            ],
            6.2,
        ),
        well(
            "well2",
            vec![WellNode::Cell {
                layer: 0,
                row: 3,
                column: 3,
            }],
            4.1,
        ),
    ];

    for wells in [by_interval, by_cell] {
        let mnw2 = MultiNodeWell::new(wells, stress_period_data.clone());
        println!("nodtot {}", mnw2.nodtot());
        m.add(mnw2)?;
        m.validate()?;
    }

    for path in m.write_input()? {
        println!("wrote {}", path.display());
    }
    Ok(())
}
