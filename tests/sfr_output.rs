#[cfg(test)]
mod tests {
    use std::fs;

    use modflow_kit::{ModflowError, SfrOutput};
    use tempfile::NamedTempFile;

    const LISTING: &str = "
  STREAM LISTING     PERIOD     1 STEP     1
 LAYER ROW COL. STREAM  RCH.    FLOW INTO  FLOW TO   FLOW OUT OF   OVRLND.   DIRECT    STREAM   STREAM   STREAM  STREAM     STREAMBED
                      SEG.NO.   NO.       STRM. RCH.  AQUIFER   STRM. RCH.   RUNOFF    PRECIP     ET       HEAD     DEPTH   WIDTH    CONDCTNC.
 ---------------------------------------------------------------------------------------------------------------------------------------
     1   1   6      1     1   0.0000E+00  -2.5000E+01   2.5000E+01   0.0000E+00   0.0000E+00   0.0000E+00   9.5000E+00   5.0000E-01   5.0000E+00   1.0000E+01
     1   2   6      1     2   2.5000E+01   1.0000E+01   1.5000E+01   0.0000E+00   0.0000E+00   0.0000E+00   9.4000E+00   4.0000E-01   5.0000E+00   1.0000E+01

  STREAM LISTING     PERIOD     2 STEP     3
 LAYER ROW COL. STREAM  RCH.    FLOW INTO  FLOW TO   FLOW OUT OF   OVRLND.   DIRECT    STREAM   STREAM   STREAM  STREAM     STREAMBED     STREAMBED
                      SEG.NO.   NO.       STRM. RCH.  AQUIFER   STRM. RCH.   RUNOFF    PRECIP     ET       HEAD     DEPTH   WIDTH    CONDCTNC.     GRADIENT
 ---------------------------------------------------------------------------------------------------------------------------------------
     1   1   6      1     1   0.0000E+00  -3.0000E+01   3.0000E+01   0.0000E+00   0.0000E+00   0.0000E+00   9.6000E+00   6.0000E-01   5.0000E+00   1.0000E+01  -2.0000E-01
";

    #[test]
    fn test_parse_listing() {
        let out = SfrOutput::parse_str(LISTING, "m.sfr.out").expect("listing");
        assert_eq!(out.records().len(), 3);

        let first = &out.records()[0];
        assert_eq!((first.kper, first.kstp), (0, 0));
        assert_eq!((first.layer, first.row, first.column), (0, 0, 5));
        assert_eq!((first.segment, first.reach), (1, 1));
        assert_eq!(first.qaquifer, -25.0);
        assert_eq!(first.stage, 9.5);
        assert_eq!(first.gradient, None);

        let reach = out.reach(1, 1);
        assert_eq!(reach.len(), 2);
        assert_eq!((reach[1].kper, reach[1].kstp), (1, 2));
        assert_eq!(reach[1].gradient, Some(-0.2));

        assert_eq!(out.at(0, 0).len(), 2);
        assert!(out.reach(2, 1).is_empty());
    }

    #[test]
    fn test_open() {
        let tmp = NamedTempFile::new().expect("tempfile");
        fs::write(tmp.path(), LISTING).expect("write");
        let out = SfrOutput::open(tmp.path()).expect("listing");
        assert_eq!(out.path(), tmp.path());
        assert_eq!(out.at(2, 1)[0].qout, 30.0);
    }

    #[test]
    fn test_rows_before_listing_are_ignored() {
        let text = "     1   1   6      1     1   0.0 1.0 2.0 3.0 4.0 5.0 6.0 7.0 8.0 9.0\n";
        let out = SfrOutput::parse_str(text, "m.sfr.out").expect("listing");
        assert!(out.records().is_empty());
    }

    #[test]
    fn test_malformed() {
        let bad_header = "  STREAM LISTING     PERIOD     x STEP     1\n";
        assert!(matches!(
            SfrOutput::parse_str(bad_header, "m.sfr.out"),
            Err(ModflowError::Malformed { .. })
        ));

        let bad_row = "  STREAM LISTING     PERIOD     1 STEP     1\n     1   1   6      1     1   0.0 1.0 2.0 3.0 4.0 5.0 6.0 7.0 8.0 9.0 10.0 11.0\n";
        assert!(matches!(
            SfrOutput::parse_str(bad_row, "m.sfr.out"),
            Err(ModflowError::Malformed { .. })
        ));
    }
}
