#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use modflow_kit::{PeriodData, StressPeriodData, StressPeriodError, carry_forward, itmp_codes};

    #[test]
    fn test_control_with_repeat() {
        let spd = StressPeriodData::new()
            .with_period(0, vec!["A"])
            .with_period(1, vec!["B"])
            .with_control(vec![2, 2, -1]);

        let resolved = spd.resolve(3).expect("valid");
        assert_eq!(resolved, vec![vec!["A"], vec!["B"], vec!["B"]]);
        assert_eq!(itmp_codes(&resolved), vec![1, 1, -1]);
    }

    #[test]
    fn test_missing_period_without_control_is_empty() {
        let spd = StressPeriodData::new()
            .with_period(0, vec!["A"])
            .with_period(2, vec!["C"]);

        let resolved = spd.resolve(3).expect("valid");
        assert_eq!(resolved, vec![vec!["A"], vec![], vec!["C"]]);
        assert_eq!(itmp_codes(&resolved), vec![1, 0, 1]);
    }

    #[test]
    fn test_empty_first_period_and_resolving_twice() {
        let spd = StressPeriodData::new()
            .with_period(0, vec![])
            .with_period(1, vec!["A"]);

        let first = spd.resolve(3).expect("valid");
        let second = spd.resolve(3).expect("valid");
        assert_eq!(first, vec![vec![], vec!["A"], vec![]]);
        assert_eq!(first, second);
        assert_eq!(itmp_codes(&first), vec![0, 1, 0]);
    }

    #[test]
    fn test_positive_control_writes_the_given_records() {
        // the count only marks the period as new, the records given are what gets written
        let spd = StressPeriodData::new()
            .with_period(0, vec!["A", "B"])
            .with_control(vec![1]);
        let resolved = spd.resolve(1).expect("valid");
        assert_eq!(resolved, vec![vec!["A", "B"]]);
        assert_eq!(itmp_codes(&resolved), vec![2]);
    }

    #[test]
    fn test_steady_only_fills_first_period() {
        let spd = StressPeriodData::steady(vec![1, 2]);
        let resolved = spd.resolve(2).expect("valid");
        assert_eq!(resolved, vec![vec![1, 2], vec![]]);
    }

    #[test]
    fn test_zero_control_ignores_records() {
        let spd = StressPeriodData::new()
            .with_period(0, vec!["A"])
            .with_period(1, vec!["B"])
            .with_control(vec![1, 0]);
        assert_eq!(spd.resolve(2).expect("valid"), vec![vec!["A"], vec![]]);
    }

    #[test]
    fn test_repeat_chains() {
        let spd = StressPeriodData::new()
            .with_period(0, vec![7])
            .with_control(vec![1, -1, -1, -1]);
        let resolved = spd.resolve(4).expect("valid");
        assert!(resolved.iter().all(|r| *r == vec![7]));
        assert_eq!(itmp_codes(&resolved), vec![1, -1, -1, -1]);
    }

    #[test]
    fn test_repeat_after_empty_is_empty() {
        let spd = StressPeriodData::new()
            .with_period(0, vec![1])
            .with_control(vec![1, 0, -1]);
        let resolved = spd.resolve(3).expect("valid");
        assert_eq!(resolved, vec![vec![1], vec![], vec![]]);
        assert_eq!(itmp_codes(&resolved), vec![1, 0, 0]);
    }

    #[test]
    fn test_decode() {
        let spd = StressPeriodData::new()
            .with_period(0, vec!["A"])
            .with_control(vec![1, -1, 0]);
        let decoded = spd.decode(3).expect("valid");
        assert_eq!(
            decoded,
            vec![
                PeriodData::Explicit(vec!["A"]),
                PeriodData::RepeatPrevious,
                PeriodData::Empty
            ]
        );
    }

    #[test]
    fn test_errors() {
        let out_of_range = StressPeriodData::new().with_period(3, vec![1]);
        assert_eq!(
            out_of_range.resolve(3),
            Err(StressPeriodError::PeriodOutOfRange { period: 3, nper: 3 })
        );

        let short = StressPeriodData::new()
            .with_period(0, vec![1])
            .with_control(vec![1, -1]);
        assert_eq!(
            short.resolve(3),
            Err(StressPeriodError::ControlLength {
                expected: 3,
                found: 2
            })
        );

        let repeat_first = StressPeriodData::<i32>::new().with_control(vec![-1, 0]);
        assert_eq!(repeat_first.resolve(2), Err(StressPeriodError::RepeatAtFirstPeriod));

        let missing = StressPeriodData::new()
            .with_period(0, vec![1])
            .with_control(vec![1, 1]);
        assert_eq!(missing.resolve(2), Err(StressPeriodError::MissingRecords { period: 1 }));
    }

    #[test]
    fn test_every_period_resolved() {
        let spd: StressPeriodData<u8> = BTreeMap::from([(1, vec![5]), (4, vec![6, 7])]).into();
        for nper in 5..9 {
            let resolved = spd.resolve(nper).expect("valid");
            assert_eq!(resolved.len(), nper);
            let codes = itmp_codes(&resolved);
            for (period, (code, records)) in codes.iter().zip(&resolved).enumerate() {
                match *code {
                    0 => assert!(records.is_empty()),
                    -1 => assert_eq!(*records, resolved[period - 1]),
                    n => assert_eq!(n as usize, records.len()),
                }
            }
        }
    }

    #[test]
    fn test_identical_explicit_periods_become_repeats() {
        let spd = StressPeriodData::new()
            .with_period(0, vec![1.5])
            .with_period(1, vec![1.5]);
        let resolved = spd.resolve(2).expect("valid");
        assert_eq!(itmp_codes(&resolved), vec![1, -1]);
    }

    #[test]
    fn test_carry_forward() {
        let values = BTreeMap::from([(0, 1.0), (2, 3.0)]);
        assert_eq!(carry_forward(4, &values), Ok(vec![1.0, 1.0, 3.0, 3.0]));

        let late = BTreeMap::from([(1, 1.0)]);
        assert_eq!(carry_forward(2, &late), Err(StressPeriodError::MissingFirstPeriod));

        assert_eq!(
            carry_forward(2, &BTreeMap::from([(0, 1.0), (2, 2.0)])),
            Err(StressPeriodError::PeriodOutOfRange { period: 2, nper: 2 })
        );
    }
}
