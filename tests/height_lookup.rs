use bead_tracker::zlut::{self, CalibrationEntry, CalibrationTable};
use bead_tracker::{estimate_height, RadialProfile};

/// Two fixed radial shapes; table entries blend linearly between them.
fn shape_a(len: usize) -> Vec<f32> {
    (0..len).map(|i| 120.0 - 8.0 * i as f32).collect()
}

fn shape_b(len: usize) -> Vec<f32> {
    (0..len).map(|i| 30.0 + 3.0 * i as f32).collect()
}

fn blend(len: usize, t: f32) -> RadialProfile {
    shape_a(len)
        .iter()
        .zip(&shape_b(len))
        .map(|(&a, &b)| a * (1.0 - t) + b * t)
        .collect()
}

/// Table with heights `40..=50` and profiles blending from shape A to B.
fn reference_table(len: usize) -> CalibrationTable {
    let entries = (0..=10)
        .map(|i| CalibrationEntry {
            height: 40.0 + i as f64,
            profile: blend(len, i as f32 / 10.0),
        })
        .collect();
    CalibrationTable::from_entries(entries).unwrap()
}

#[test]
fn interior_entry_round_trips_exactly() {
    let _ = env_logger::builder().is_test(true).try_init();
    let table = reference_table(17);
    for k in 2..=8usize {
        let query = table.entries()[k].profile.clone();
        let z = estimate_height(&query, &table).unwrap().expect("height");
        let expected = table.entries()[k].height;
        assert!((z - expected).abs() < 1e-3, "k={k} z={z}");
    }
}

#[test]
fn boundary_matches_are_never_extrapolated() {
    let table = reference_table(17);
    for k in [0usize, 1, 9, 10] {
        let query = table.entries()[k].profile.clone();
        assert_eq!(estimate_height(&query, &table).unwrap(), None, "k={k}");
    }
}

#[test]
fn halfway_query_interpolates_between_entries() {
    let _ = env_logger::builder().is_test(true).try_init();
    let table = reference_table(17);
    // Exactly halfway in shape between the height-45 and height-46 entries.
    let query = blend(17, 0.55);
    let z = estimate_height(&query, &table).unwrap().expect("height");
    // The difference curve is an exact V centered between two entries; the
    // least-squares parabola shrinks the fitted offset slightly toward the
    // window center, so the estimate lands within a tenth of an entry.
    assert!((z - 45.5).abs() <= 0.1, "z={z}");
}

#[test]
fn duplicate_heights_warn_but_table_still_works() {
    let mut entries: Vec<CalibrationEntry> = (0..=10)
        .map(|i| CalibrationEntry {
            height: 40.0 + i as f64,
            profile: blend(17, i as f32 / 10.0),
        })
        .collect();
    entries[7].height = 46.0; // collides with entry 6
    let n = entries.len();
    let table = CalibrationTable::from_entries(entries).unwrap();
    assert!(table.duplicate_heights());
    assert_eq!(table.len(), n);

    // Estimation away from the duplicated pair still resolves.
    let query = table.entries()[3].profile.clone();
    let z = estimate_height(&query, &table).unwrap().expect("height");
    assert!((z - table.entries()[3].height).abs() < 1e-3, "z={z}");
}

#[test]
fn persisted_table_round_trips_through_a_session() {
    let dir = std::env::temp_dir().join(format!("bead-tracker-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let table = reference_table(17);
    zlut::io::save_table(&table, &dir).unwrap();
    let loaded = zlut::io::load_table(&dir).unwrap();
    assert_eq!(loaded.len(), table.len());
    assert_eq!(loaded.radius(), table.radius());

    // Estimates agree between the original and reloaded tables.
    let query = blend(17, 0.4);
    let a = estimate_height(&query, &table).unwrap();
    let b = estimate_height(&query, &loaded).unwrap();
    match (a, b) {
        (Some(za), Some(zb)) => assert!((za - zb).abs() < 1e-6, "za={za} zb={zb}"),
        other => panic!("expected numeric heights, got {other:?}"),
    }
    std::fs::remove_dir_all(&dir).ok();
}
