#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use modflow_kit::packages::BudgetOutput;
    use modflow_kit::time::periods;
    use modflow_kit::{
        Basic, Discretization, FlowProperties, Grid, IBound, LayerProperty, LossType, Mnw2Rate,
        Mnw2Well, Model, ModflowError, MultiNodeWell, Nwt, OutputControl, PackageKind, Pcg,
        ReachRecord, Recharge, SegmentRecord, StreamFlow, StressPeriodData, StressPeriodError,
        UpstreamWeighting, Version, Well, WellNode, WellRecord,
    };
    use ndarray::Array3;
    use tempfile::TempDir;

    fn model(dir: &Path, version: Version, nper: usize) -> Model {
        let grid = Grid::uniform(1, 3, 3, 10.0, 10.0, 10.0, 0.0).expect("grid");
        let perlen = vec![1.0; nper];
        let nstp = vec![1; nper];
        let steady = vec![true; nper];
        let dis = Discretization::new(grid, periods(&perlen, &nstp, &steady).expect("periods"))
            .expect("dis");
        let mut m = Model::new("m", version).with_workspace(dir);
        m.set_discretization(dis);
        m.add(Basic::all_active(5.0)).expect("bas");
        m.add(OutputControl::default()).expect("oc");
        m
    }

    fn read(dir: &Path, file: &str) -> String {
        fs::read_to_string(dir.join(file)).expect("file written")
    }

    /// Lines without their trailing comment, split into words.
    fn words(text: &str) -> Vec<Vec<String>> {
        text.lines()
            .filter(|l| !l.starts_with('#'))
            .map(|l| {
                l.split('#')
                    .next()
                    .unwrap_or("")
                    .split_whitespace()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_name_file_and_packages() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 1);
        m.add(LayerProperty::new(FlowProperties::new(10.0, 1.0))).expect("lpf");
        m.add(Well::new(StressPeriodData::steady(vec![WellRecord::new(0, 1, 1, -10.0)])))
            .expect("wel");
        m.add(Pcg::default()).expect("pcg");

        let written = m.write_input().expect("write");
        assert_eq!(written[0], tmp.path().join("m.nam"));
        assert_eq!(written.len(), 7);

        let nam = read(tmp.path(), "m.nam");
        let lines: Vec<&str> = nam.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(
            lines,
            vec![
                "LIST 2 m.list",
                "DIS 11 m.dis",
                "BAS6 13 m.bas",
                "LPF 15 m.lpf",
                "WEL 20 m.wel",
                "OC 14 m.oc",
                "PCG 27 m.pcg",
                "DATA(BINARY) 51 m.hds REPLACE",
            ]
        );

        let wel = words(&read(tmp.path(), "m.wel"));
        assert_eq!(wel[0], vec!["1", "0"]);
        assert_eq!(wel[1], vec!["1", "0"]);
        assert_eq!(&wel[2][..3], &["1", "2", "2"]);
        assert_eq!(wel[2][3].parse::<f64>().expect("rate"), -10.0);

        let dis = words(&read(tmp.path(), "m.dis"));
        assert_eq!(dis[0], vec!["1", "3", "3", "1", "4", "2"]);
        assert_eq!(dis.last().expect("period").last().map(String::as_str), Some("SS"));
    }

    #[test]
    fn test_list_package_periods() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 4);
        let w = WellRecord::new(0, 0, 0, -5.0);
        let spd = StressPeriodData::new()
            .with_period(0, vec![w])
            .with_period(1, vec![w])
            .with_period(3, vec![w, WellRecord::new(0, 2, 2, -1.0)]);
        m.add(Well::new(spd)).expect("wel");
        m.add(LayerProperty::default()).expect("lpf");
        m.write_input().expect("write");

        let itmp: Vec<String> = read(tmp.path(), "m.wel")
            .lines()
            .filter(|l| l.contains("ITMP"))
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .collect();
        assert_eq!(itmp, vec!["1", "-1", "0", "2"]);

        let wel = words(&read(tmp.path(), "m.wel"));
        assert_eq!(wel[0][0], "2", "MXACT is the largest period");
    }

    #[test]
    fn test_mnw2_reuses_pumping() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 3);
        m.add(LayerProperty::default()).expect("lpf");
        let skin = LossType::Skin {
            rw: 1.0,
            rskin: 2.0,
            kskin: 5.0,
        };
        let wells = vec![
            Mnw2Well {
                wellid: "well1".into(),
                loss: skin,
                nodes: vec![WellNode::Interval {
                    ztop: 9.5,
                    zbotm: 5.1,
                    row: 1,
                    column: 1,
                }],
                zpump: Some(6.2),
            },
            Mnw2Well {
                wellid: "well2".into(),
                loss: skin,
                nodes: vec![WellNode::Cell {
                    layer: 0,
                    row: 2,
                    column: 2,
                }],
                zpump: None,
            },
        ];
        let spd = StressPeriodData::new()
            .with_period(0, vec![Mnw2Rate::new("well1", 0.0), Mnw2Rate::new("well2", 0.0)])
            .with_period(1, vec![Mnw2Rate::new("well1", 100.0), Mnw2Rate::new("well2", 1000.0)])
            .with_control(vec![2, 2, -1]);
        let mnw2 = MultiNodeWell::new(wells, spd);
        assert_eq!(mnw2.nodtot(), 2);
        m.add(mnw2).expect("mnw2");
        m.write_input().expect("write");

        let text = read(tmp.path(), "m.mnw2");
        let itmp: Vec<&str> = text
            .lines()
            .filter(|l| l.contains("# 3 ITMP"))
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(itmp, vec!["2", "2", "-1"]);
        assert!(text.contains("well1 -1 # 2a"));
        assert!(text.contains("well2 1 # 2a"));
        assert!(text.lines().any(|l| l.starts_with("SKIN -1 ")));
        assert_eq!(text.matches("# 4a").count(), 4);
    }

    #[test]
    fn test_recharge_repeats() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 3);
        m.add(LayerProperty::default()).expect("lpf");
        m.add(Recharge::per_period(&[(0, 1e-3), (2, 2e-3)])).expect("rch");
        m.write_input().expect("write");

        let inrech: Vec<String> = read(tmp.path(), "m.rch")
            .lines()
            .filter(|l| l.contains("INRECH"))
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .collect();
        assert_eq!(inrech, vec!["1", "-1", "1"]);
    }

    #[test]
    fn test_recharge_needs_first_period() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 2);
        m.add(LayerProperty::default()).expect("lpf");
        m.add(Recharge::per_period(&[(1, 1e-3)])).expect("rch");
        assert!(matches!(
            m.write_input(),
            Err(ModflowError::StressPeriod(StressPeriodError::MissingFirstPeriod))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let tmp = TempDir::new().expect("tempdir");

        let mut no_bas = model(tmp.path(), Version::Mf2005, 1);
        no_bas.remove(PackageKind::Bas6);
        assert!(matches!(no_bas.validate(), Err(ModflowError::Config(_))));

        let mut outside = model(tmp.path(), Version::Mf2005, 1);
        outside
            .add(Well::new(StressPeriodData::steady(vec![WellRecord::new(0, 3, 0, -1.0)])))
            .expect("wel");
        assert!(matches!(
            outside.validate(),
            Err(ModflowError::CellOutOfBounds {
                package: "WEL",
                row: 3,
                ..
            })
        ));

        let mut nwt_only = model(tmp.path(), Version::Mf2005, 1);
        nwt_only.add(UpstreamWeighting::default()).expect("upw");
        assert!(matches!(nwt_only.validate(), Err(ModflowError::Config(_))));

        let mut both = model(tmp.path(), Version::MfNwt, 1);
        both.add(UpstreamWeighting::default()).expect("upw");
        both.add(LayerProperty::default()).expect("lpf");
        assert!(matches!(both.validate(), Err(ModflowError::Config(_))));

        let mut bad_shape = model(tmp.path(), Version::Mf2005, 1);
        bad_shape
            .add(Basic::new(Array3::from_elem((1, 2, 3), IBound::Active), 1.0))
            .expect("bas");
        assert!(matches!(bad_shape.validate(), Err(ModflowError::ShapeMismatch { .. })));

        // nothing is written for an invalid model
        assert!(bad_shape.write_input().is_err());
        assert!(!tmp.path().join("m.nam").exists());
    }

    #[test]
    fn test_units() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 1);
        m.add(LayerProperty::default().with_budget(BudgetOutput::default())).expect("lpf");
        m.add(
            Well::new(StressPeriodData::steady(vec![WellRecord::new(0, 1, 1, -1.0)]))
                .with_budget(BudgetOutput::default()),
        )
        .expect("wel");
        let files = m.output_files().expect("units");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].unit, 51);
        assert_eq!(files[1].file_name, "m.cbc");

        m.add(
            Well::new(StressPeriodData::steady(vec![WellRecord::new(0, 1, 1, -1.0)]))
                .with_budget(BudgetOutput::file(53, "wells.cbc")),
        )
        .expect("wel");
        assert!(matches!(m.output_files(), Err(ModflowError::Config(_))));

        m.add(
            Well::new(StressPeriodData::steady(vec![WellRecord::new(0, 1, 1, -1.0)]))
                .with_budget(BudgetOutput::unit(51)),
        )
        .expect("wel");
        assert!(matches!(m.output_files(), Err(ModflowError::Config(_))));
    }

    #[test]
    fn test_add_replaces() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 1);
        assert!(m.add(Pcg::default()).expect("pcg").is_none());
        assert!(m.add(Pcg::default()).expect("pcg").is_some());
        assert!(m.has(PackageKind::Dis));
        assert_eq!(
            m.package_kinds(),
            vec![PackageKind::Dis, PackageKind::Bas6, PackageKind::Oc, PackageKind::Pcg]
        );

        let grid = Grid::uniform(1, 1, 1, 1.0, 1.0, 1.0, 0.0).expect("grid");
        assert!(m.add(Discretization::steady(grid)).is_err());
    }

    #[test]
    fn test_transient_storage() {
        let tmp = TempDir::new().expect("tempdir");
        let grid = Grid::uniform(2, 2, 2, 1.0, 1.0, 10.0, 0.0).expect("grid");
        let dis = Discretization::new(
            grid,
            periods(&[1.0, 10.0], &[1, 5], &[true, false]).expect("periods"),
        )
        .expect("dis");
        let mut m = Model::new("t", Version::MfNwt).with_workspace(tmp.path());
        m.set_discretization(dis);
        m.add(Basic::all_active(10.0)).expect("bas");
        m.add(UpstreamWeighting::new(
            FlowProperties::new(1.0, 0.1)
                .with_storage(1e-5, 0.2)
                .with_laytyp(1),
        ))
        .expect("upw");
        m.add(Nwt::default()).expect("nwt");
        m.add(OutputControl::default()).expect("oc");
        m.write_input().expect("write");

        let upw = read(tmp.path(), "t.upw");
        assert_eq!(upw.matches("#ss layer").count(), 2);
        assert_eq!(upw.matches("#sy layer").count(), 2);
        assert!(upw.lines().any(|l| l == "1 1 #LAYTYP"));
        assert!(read(tmp.path(), "t.nwt").contains("COMPLEX"));
        assert!(read(tmp.path(), "t.dis").contains(" TR "));
    }

    #[test]
    fn test_sfr() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 2);
        m.add(LayerProperty::default()).expect("lpf");
        let reach = |row, segment, reach| ReachRecord {
            layer: 0,
            row,
            column: 1,
            segment,
            reach,
            rchlen: 10.0,
            strtop: 4.0,
            slope: 0.001,
            strthick: 1.0,
            strhc1: 0.5,
        };
        let segments = vec![
            SegmentRecord::rectangular(1, 2, 0.04, 5.0),
            SegmentRecord::rectangular(2, 0, 0.04, 5.0),
        ];
        let mut second = segments.clone();
        second[0].flow = 10.0;
        let sfr = StreamFlow::new(
            vec![reach(0, 1, 1), reach(1, 1, 2), reach(2, 2, 1)],
            StressPeriodData::new()
                .with_period(0, segments)
                .with_period(1, second),
        )
        .with_budget(BudgetOutput::default())
        .with_listing(81);
        assert_eq!(sfr.nss(), 2);
        m.add(sfr).expect("sfr");
        m.write_input().expect("write");

        let text = read(tmp.path(), "m.sfr");
        let lines = words(&text);
        assert_eq!(&lines[0][..4], &["-3", "2", "0", "0"]);
        assert_eq!(&lines[0][6..], &["53", "81", "1", "0"]);
        assert_eq!(text.matches("# 6b WIDTH1").count(), 2);
        assert_eq!(text.matches("# 6a").count(), 4);

        let nam = read(tmp.path(), "m.nam");
        assert!(nam.lines().any(|l| l == "DATA 81 m.sfr.out"));
        assert!(nam.lines().any(|l| l == "DATA(BINARY) 53 m.cbc REPLACE"));
    }

    #[test]
    fn test_sfr_rejects_bad_segments() {
        let tmp = TempDir::new().expect("tempdir");
        let mut m = model(tmp.path(), Version::Mf2005, 1);
        let r = ReachRecord {
            layer: 0,
            row: 0,
            column: 0,
            segment: 1,
            reach: 1,
            rchlen: 1.0,
            strtop: 1.0,
            slope: 0.1,
            strthick: 1.0,
            strhc1: 1.0,
        };
        let mut s = SegmentRecord::rectangular(1, 0, 0.04, 1.0);
        s.icalc = 2;
        m.add(StreamFlow::new(vec![r], StressPeriodData::steady(vec![s])))
            .expect("sfr");
        assert!(matches!(m.validate(), Err(ModflowError::Unsupported(_))));
    }
}
