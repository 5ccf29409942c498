#[cfg(test)]
mod tests {
    use std::fs;

    use modflow_kit::output::{BudgetData, CellBudgetFile, HeadFile, Precision};
    use modflow_kit::ModflowError;
    use ndarray::array;
    use tempfile::NamedTempFile;

    fn int(buf: &mut Vec<u8>, v: i32) {
        buf.extend_from_slice(bytemuck::bytes_of(&v));
    }

    fn real(buf: &mut Vec<u8>, v: f64, precision: Precision) {
        match precision {
            Precision::Single => buf.extend_from_slice(bytemuck::bytes_of(&(v as f32))),
            Precision::Double => buf.extend_from_slice(bytemuck::bytes_of(&v)),
        }
    }

    fn label(buf: &mut Vec<u8>, text: &str) {
        buf.extend_from_slice(format!("{:>16}", text).as_bytes());
    }

    #[allow(clippy::too_many_arguments)]
    fn head_record(
        buf: &mut Vec<u8>,
        precision: Precision,
        kstp: i32,
        kper: i32,
        totim: f64,
        text: &str,
        layer: i32,
        values: &[&[f64]],
    ) {
        int(buf, kstp);
        int(buf, kper);
        real(buf, totim, precision);
        real(buf, totim, precision);
        label(buf, text);
        int(buf, values[0].len() as i32);
        int(buf, values.len() as i32);
        int(buf, layer);
        for row in values {
            for &v in *row {
                real(buf, v, precision);
            }
        }
    }

    fn two_layer_heads(precision: Precision) -> Vec<u8> {
        let mut buf = Vec::new();
        for (kper, totim) in [(1, 1.0), (2, 11.0)] {
            head_record(&mut buf, precision, 1, kper, totim, "HEAD", 1, &[&[10.0, 9.0, 8.0], &[7.0, 6.0, 5.0]]);
            head_record(&mut buf, precision, 1, kper, totim, "HEAD", 2, &[&[1.0, 2.0, 3.0], &[4.0, 5.0, totim]]);
        }
        buf
    }

    #[test]
    fn test_single_precision_heads() {
        let file = HeadFile::from_bytes(&two_layer_heads(Precision::Single), "m.hds", None).expect("heads");
        assert_eq!(file.precision(), Precision::Single);
        assert_eq!(file.records().len(), 4);
        assert_eq!(file.nlay(), 2);
        assert_eq!(file.times(), vec![1.0, 11.0]);
        assert_eq!(file.kstpkper(), vec![(0, 0), (0, 1)]);

        let h = file.data_at(11.0).expect("time 11");
        assert_eq!(h.dim(), (2, 2, 3));
        assert_eq!(h[[0, 0, 0]], 10.0);
        assert_eq!(h[[1, 1, 2]], 11.0);
        assert_eq!(file.data_for(0, 0).expect("first period")[[1, 1, 2]], 1.0);
        assert_eq!(file.last().expect("last"), h);
        assert_eq!(file.layer_at(1.0, 1).expect("layer"), array![[1.0, 2.0, 3.0], [4.0, 5.0, 1.0]]);
        assert_eq!(file.time_series(1, 1, 2).expect("series"), vec![(1.0, 1.0), (11.0, 11.0)]);
    }

    #[test]
    fn test_double_precision_heads() {
        let bytes = two_layer_heads(Precision::Double);
        let file = HeadFile::from_bytes(&bytes, "m.hds", None).expect("heads");
        assert_eq!(file.precision(), Precision::Double);
        assert_eq!(file.times(), vec![1.0, 11.0]);
        assert_eq!(file.data_at(1.0).expect("time 1")[[0, 1, 1]], 6.0);

        assert!(HeadFile::from_bytes(&bytes, "m.hds", Some(Precision::Single)).is_err());
    }

    #[test]
    fn test_missing_time() {
        let file = HeadFile::from_bytes(&two_layer_heads(Precision::Single), "m.hds", None).expect("heads");
        assert!(matches!(file.data_at(5.0), Err(ModflowError::RecordNotFound { .. })));
        assert!(matches!(file.data_for(3, 0), Err(ModflowError::RecordNotFound { .. })));
        assert!(file.time_series(4, 0, 0).is_err());
    }

    #[test]
    fn test_truncated_heads() {
        let mut bytes = two_layer_heads(Precision::Single);
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            HeadFile::from_bytes(&bytes, "m.hds", None),
            Err(ModflowError::Malformed { .. })
        ));
    }

    #[test]
    fn test_text_filter() {
        let mut bytes = Vec::new();
        head_record(&mut bytes, Precision::Single, 1, 1, 1.0, "HEAD", 1, &[&[3.0]]);
        head_record(&mut bytes, Precision::Single, 1, 1, 1.0, "DRAWDOWN", 1, &[&[0.5]]);
        let tmp = NamedTempFile::new().expect("tempfile");
        fs::write(tmp.path(), &bytes).expect("write");

        let ddn = HeadFile::open_text(tmp.path(), "drawdown").expect("drawdown");
        assert_eq!(ddn.records().len(), 1);
        assert_eq!(ddn.data_at(1.0).expect("ddn")[[0, 0, 0]], 0.5);
        let heads = HeadFile::open_text(tmp.path(), "head").expect("heads");
        assert_eq!(heads.data_at(1.0).expect("head")[[0, 0, 0]], 3.0);
    }

    fn compact_header(
        buf: &mut Vec<u8>,
        precision: Precision,
        text: &str,
        shape: (i32, i32, i32),
        imeth: i32,
        totim: f64,
    ) {
        let (nlay, nrow, ncol) = shape;
        int(buf, 1);
        int(buf, 1);
        label(buf, text);
        int(buf, ncol);
        int(buf, nrow);
        int(buf, -nlay);
        int(buf, imeth);
        real(buf, 1.0, precision);
        real(buf, 1.0, precision);
        real(buf, totim, precision);
    }

    fn river_budget(precision: Precision) -> Vec<u8> {
        let mut buf = Vec::new();
        compact_header(&mut buf, precision, "RIVER LEAKAGE", (2, 2, 3), 2, 1.0);
        int(&mut buf, 2);
        int(&mut buf, 1);
        real(&mut buf, 0.25, precision);
        int(&mut buf, 12);
        real(&mut buf, -1.5, precision);

        compact_header(&mut buf, precision, "STORAGE", (2, 2, 3), 1, 1.0);
        for n in 0..12 {
            real(&mut buf, n as f64, precision);
        }
        buf
    }

    #[test]
    fn test_compact_budget() {
        for precision in [Precision::Single, Precision::Double] {
            let file = CellBudgetFile::from_bytes(&river_budget(precision), "m.cbc", None).expect("budget");
            assert_eq!(file.precision(), precision);
            assert_eq!(file.record_names(), vec!["RIVER LEAKAGE", "STORAGE"]);
            assert_eq!(file.times(), vec![1.0]);

            let riv = file.data("river leakage", 1.0).expect("leakage");
            assert_eq!(riv.len(), 1);
            assert_eq!(riv[0].kper, 0);
            assert_eq!(riv[0].imeth, 2);
            let flows = riv[0].data.as_list().expect("list");
            assert_eq!(flows[1].cell(2, 3), Some((1, 1, 2)));
            assert_eq!(file.list_flows("RIVER LEAKAGE", 1.0).expect("flows"), vec![0.25, -1.5]);

            let storage = file.data_for("storage", 0, 0).expect("storage");
            match &storage[0].data {
                BudgetData::Full(values) => {
                    assert_eq!(values.dim(), (2, 2, 3));
                    assert_eq!(values[[1, 0, 1]], 7.0);
                }
                other => panic!("expected a full array, got {:?}", other),
            }
            assert!(file.list_flows("storage", 1.0).is_err());
            assert!(matches!(file.data("WELLS", 1.0), Err(ModflowError::RecordNotFound { .. })));
            assert!(file.data("STORAGE", 2.0).is_err());
        }
    }

    #[test]
    fn test_budget_methods() {
        let p = Precision::Single;
        let mut buf = Vec::new();

        // full header, no times
        int(&mut buf, 1);
        int(&mut buf, 1);
        label(&mut buf, "FLOW RIGHT FACE");
        int(&mut buf, 2);
        int(&mut buf, 1);
        int(&mut buf, 1);
        real(&mut buf, 3.0, p);
        real(&mut buf, 4.0, p);

        // layer indicator array
        compact_header(&mut buf, p, "RECHARGE", (2, 1, 2), 3, 5.0);
        int(&mut buf, 2);
        int(&mut buf, 1);
        real(&mut buf, 0.1, p);
        real(&mut buf, 0.2, p);

        // layer one only
        compact_header(&mut buf, p, "ET", (2, 1, 2), 4, 5.0);
        real(&mut buf, -0.1, p);
        real(&mut buf, -0.2, p);

        // list with auxiliary values
        compact_header(&mut buf, p, "MNW2", (2, 1, 2), 5, 5.0);
        int(&mut buf, 2);
        label(&mut buf, "IFACE");
        int(&mut buf, 1);
        int(&mut buf, 3);
        real(&mut buf, -100.0, p);
        real(&mut buf, 6.0, p);

        let tmp = NamedTempFile::new().expect("tempfile");
        fs::write(tmp.path(), &buf).expect("write");
        let file = CellBudgetFile::open(tmp.path()).expect("budget");
        assert_eq!(file.records().len(), 4);
        assert_eq!(file.times(), vec![5.0]);
        assert_eq!(file.kstpkper(), vec![(0, 0)]);

        let frf = &file.records()[0];
        assert_eq!(frf.totim, None);
        assert_eq!(frf.data.as_full().expect("full"), &array![[[3.0, 4.0]]]);

        let rch = file.data("recharge", 5.0).expect("recharge");
        let rch = rch[0].data.as_full().expect("full");
        assert_eq!(rch[[1, 0, 0]], 0.1_f32 as f64);
        assert_eq!(rch[[0, 0, 0]], 0.0);
        assert_eq!(rch[[0, 0, 1]], 0.2_f32 as f64);

        let et = file.data("ET", 5.0).expect("et");
        let et = et[0].data.as_full().expect("full");
        assert_eq!(et[[1, 0, 1]], 0.0);
        assert_eq!(et[[0, 0, 1]], -0.2_f32 as f64);

        let mnw = file.data("mnw2", 5.0).expect("mnw2");
        assert_eq!(mnw[0].aux_names, vec!["IFACE"]);
        let flows = mnw[0].data.as_list().expect("list");
        assert_eq!(flows[0].node, 3);
        assert_eq!(flows[0].aux, vec![6.0]);
        assert_eq!(flows[0].cell(1, 2), Some((1, 0, 0)));
    }

    #[test]
    fn test_bad_budget_method() {
        let mut buf = Vec::new();
        compact_header(&mut buf, Precision::Single, "STORAGE", (1, 1, 1), 9, 1.0);
        assert!(matches!(
            CellBudgetFile::from_bytes(&buf, "m.cbc", Some(Precision::Single)),
            Err(ModflowError::Malformed { .. })
        ));
    }
}
