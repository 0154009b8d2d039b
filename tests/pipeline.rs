//! 端到端流水线：文件 → 配分函数 → 连接 → 强度 → 线型 → 截面

use approx::assert_relative_eq;
use picocross::parsers::{load_exomol_states, TransitionChunks};
use picocross::spectra::{CrossSection, WavenumberGrid};
use picocross::units::{Quantity, DALTON, KELVIN, WAVENUMBER};
use picocross::{
    combine_states_transitions, doppler_hwhm, doppler_profile, intensity, PicocrossError,
};

use std::io::Write;
use tempfile::NamedTempFile;

const STATES: &str = "           1     0.000000      1       0  +  1
           2  1594.746000      3       1  +  1
           3  1634.967000      5       2  +  1
           4  3151.630000      3       1  +  1
           5  3657.053000      1       0  +  1
";

const TRANS: &str = "           2            1 1.0000e-01
           3            1 2.0000e-02
           4            2 5.0000e-03
           5            1 3.0000e-02
           4            1 1.0000e-03
";

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_pipeline_chunked_matches_whole() {
    let states_file = write_temp(STATES);
    let trans_file = write_temp(TRANS);

    let states = load_exomol_states(states_file.path()).unwrap();
    let t = Quantity::scalar(1500.0, KELVIN);
    let q = states.partition_function(&t).unwrap();
    assert!(q.as_scalar().unwrap() > 1.0);

    let mass = Quantity::scalar(18.010565, DALTON);
    let grid = WavenumberGrid::from_range(1400.0, 3800.0, 0.05).unwrap();
    let bins = grid.as_quantity();

    let run = |chunk_size: usize| {
        let mut xs = CrossSection::new(grid.clone());
        for chunk in TransitionChunks::open(trans_file.path(), chunk_size).unwrap() {
            let lines = combine_states_transitions(&states, &chunk.unwrap())
                .into_quantities()
                .unwrap();
            let s = intensity(
                &lines.wavenumber,
                &lines.a_coefficient,
                &lines.lower_energy,
                &lines.upper_degeneracy,
                &t,
                &q,
            )
            .unwrap();
            let hwhm = doppler_hwhm(&lines.wavenumber, &t, &mass).unwrap();
            let profile = doppler_profile(&bins, &lines.wavenumber, &hwhm).unwrap();
            xs.accumulate(&s, &profile).unwrap();
        }
        xs
    };

    let whole = run(100);
    let chunked = run(2);
    assert_eq!(whole.line_count(), 5);
    assert_eq!(chunked.line_count(), 5);

    for (a, b) in whole.values().iter().zip(chunked.values().iter()) {
        assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-300);
    }

    // 最强线为 2 -> 1
    let (peak_x, _) = whole.peak().unwrap();
    assert!((peak_x - 1594.746).abs() < 0.05);
}

#[test]
fn test_missing_state_is_reported() {
    let states_file = write_temp(STATES);
    let trans_file = write_temp("           9            1 1.0000e-01\n");

    let states = load_exomol_states(states_file.path()).unwrap();
    let transitions = picocross::parsers::load_exomol_transitions(trans_file.path()).unwrap();
    let joined = combine_states_transitions(&states, &transitions);

    assert_eq!(joined.len(), 1);
    assert!(matches!(
        joined.into_quantities(),
        Err(PicocrossError::MissingJoinMatch { upper_id: 9, .. })
    ));
}

#[test]
fn test_partition_function_rejects_bad_temperature() {
    let err = picocross::partition_function(
        &Quantity::from_vec(vec![0.0, 100.0], WAVENUMBER),
        &Quantity::from(vec![1.0, 3.0]),
        &Quantity::scalar(-10.0, KELVIN),
    )
    .unwrap_err();
    assert!(matches!(err, PicocrossError::InvalidPhysicalValue { .. }));
}
