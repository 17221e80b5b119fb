/// Integration tests for the pace planner core
///
/// Run with: cargo test --test integration_tests -- --nocapture

use pace_planner_backend::config::PlannerConfig;
use pace_planner_backend::model::{build_plan, build_prediction, PlanRequest, PredictRequest};
use pace_planner_backend::solver::{solve, solve_with_profile, PaceProfile};
use pace_planner_backend::splits::{key_splits_for, project, DEFAULT_FINISH_WINDOW_KM};
use pace_planner_backend::timefmt::{format_hms, format_pace};

const HALF_MARATHON_KM: f64 = 21.0975;
const MARATHON_KM: f64 = 42.195;

#[test]
fn test_half_marathon_negative_split_scenario() {
    println!("\n=== Test: 1:30:00 half marathon, 20 s negative split ===");
    let curve = solve(5400.0, HALF_MARATHON_KM, 20.0).unwrap();

    let total = curve.total_seconds();
    let delta = curve.first_pace() - curve.last_pace();
    println!("✓ {} kilometers, sum={:.4}s, first-last={:.4}s", curve.len(), total, delta);

    assert!((total - 5400.0).abs() < 0.001, "sum drifted from target");
    assert!((delta - 20.0).abs() < 0.1, "strategy delta not honored");
    assert!(curve.converged());
}

#[test]
fn test_full_marathon_negative_split_scenario() {
    println!("\n=== Test: 4:00:00 full marathon, 30 s negative split ===");
    let curve = solve(14400.0, MARATHON_KM, 30.0).unwrap();

    assert!((curve.total_seconds() - 14400.0).abs() < 0.001);
    assert!((curve.first_pace() - curve.last_pace() - 30.0).abs() < 0.1);

    // Every kilometer faster than (or equal to) the one before it
    for pair in curve.paces().windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "pace curve not non-increasing");
    }
    println!("✓ start {:.2}s/km -> finish {:.2}s/km", curve.first_pace(), curve.last_pace());
}

#[test]
fn test_even_split_scenario() {
    println!("\n=== Test: even split degenerates to a flat curve ===");
    for &(t, d) in &[(5400.0, HALF_MARATHON_KM), (14400.0, MARATHON_KM), (3000.0, 10.0)] {
        let curve = solve(t, d, 0.0).unwrap();
        let first = curve.first_pace();
        for &pace in curve.paces() {
            assert!((pace - first).abs() < 1e-6, "flat curve has unequal paces");
        }
        assert!((curve.total_seconds() - t).abs() < 1e-9);
        println!("✓ t={}s d={}km: {} equal paces of {:.3}s", t, d, curve.len(), first);
    }
}

#[test]
fn test_final_checkpoint_always_reports_target() {
    println!("\n=== Test: finish-line checkpoint is exact ===");
    // Awkward targets that do not divide evenly
    for &target in &[13530.0, 14401.0, 9999.0, 12345.6] {
        let curve = solve(target, MARATHON_KM, 25.0).unwrap();
        let splits = project(&curve, &[MARATHON_KM], DEFAULT_FINISH_WINDOW_KM);
        assert_eq!(splits[0].cumulative_seconds, target);
    }
    println!("✓ displayed total always equals the requested goal");
}

#[test]
fn test_full_marathon_plan_table() {
    println!("\n=== Test: full marathon plan table ===");
    let req: PlanRequest = serde_json::from_str(
        r#"{"target": "4:00:00", "race": "full", "strategy": "negative", "strategy_seconds": 30}"#,
    )
    .unwrap();
    let plan = build_plan(&req, &PlannerConfig::default()).unwrap();

    let distances: Vec<f64> = plan.splits.iter().map(|s| s.distance_km).collect();
    assert_eq!(
        distances,
        vec![5.0, 10.0, 15.0, 20.0, 21.0975, 25.0, 30.0, 35.0, 40.0, 41.0, 42.0, 42.195]
    );

    // Cumulative times strictly increase down the table
    for pair in plan.splits.windows(2) {
        assert!(pair[1].cumulative_seconds > pair[0].cumulative_seconds);
    }

    // The last three rows sit in the finish window and show the finishing pace
    let finish_pace = plan.splits.last().unwrap().reference_pace_sec_per_km;
    for row in plan.splits.iter().rev().take(3) {
        assert_eq!(row.reference_pace_sec_per_km, finish_pace);
    }
    // 40 km does not
    let row_40 = plan.splits.iter().find(|s| s.distance_km == 40.0).unwrap();
    assert!(row_40.reference_pace_sec_per_km > finish_pace);

    assert_eq!(plan.splits.last().unwrap().cumulative_time, "4:00:00");
    for row in &plan.splits {
        println!("  {:>8.4} km  {:>9}  {}", row.distance_km, row.reference_pace, row.cumulative_time);
    }
    println!("✓ table matches checkpoint semantics");
}

#[test]
fn test_half_marathon_plan_table() {
    println!("\n=== Test: half marathon plan table ===");
    let req: PlanRequest = serde_json::from_str(
        r#"{"target": "1:45:30", "race": "half", "strategy": "negative", "strategy_seconds": 15}"#,
    )
    .unwrap();
    let plan = build_plan(&req, &PlannerConfig::default()).unwrap();

    let distances: Vec<f64> = plan.splits.iter().map(|s| s.distance_km).collect();
    assert_eq!(distances, vec![5.0, 10.0, 15.0, 20.0, 21.0975]);
    assert_eq!(plan.splits.last().unwrap().cumulative_seconds, 6330.0);
    assert_eq!(plan.splits.last().unwrap().cumulative_time, "1:45:30");
    println!("✓ half plan: {} rows, finish {}", plan.splits.len(), plan.splits.last().unwrap().cumulative_time);
}

#[test]
fn test_even_strategy_plan() {
    println!("\n=== Test: even strategy plan ===");
    let req: PlanRequest =
        serde_json::from_str(r#"{"target": 14400, "race": "full"}"#).unwrap();
    let plan = build_plan(&req, &PlannerConfig::default()).unwrap();

    let avg = 14400.0 / MARATHON_KM;
    for row in &plan.splits {
        assert_eq!(row.reference_pace_sec_per_km, avg);
        if row.distance_km < MARATHON_KM {
            assert!((row.cumulative_seconds - avg * row.distance_km).abs() < 1e-9);
        }
    }
    assert_eq!(plan.splits.last().unwrap().cumulative_seconds, 14400.0);
    assert_eq!(plan.start_pace, plan.finish_pace);
    println!("✓ constant pace {} across all rows", plan.avg_pace);
}

#[test]
fn test_predictor_modes() {
    println!("\n=== Test: finish-time predictor ===");
    let even: PredictRequest = serde_json::from_str(r#"{"pace": "5:00"}"#).unwrap();
    let even = build_prediction(&even).unwrap();
    assert_eq!(even.rows.len(), 3);
    assert_eq!(even.rows[0].predicted_time, "0:50:00");
    assert!((even.rows[2].predicted_seconds - 300.0 * MARATHON_KM).abs() < 1e-9);

    let negative: PredictRequest = serde_json::from_str(
        r#"{"pace": 300, "strategy": "negative", "strategy_seconds": 20}"#,
    )
    .unwrap();
    let negative = build_prediction(&negative).unwrap();
    for (e, n) in even.rows.iter().zip(&negative.rows) {
        assert!((e.predicted_seconds - n.predicted_seconds).abs() < 1e-6);
    }
    for row in &even.rows {
        println!("  {:<14} {}", row.label, row.predicted_time);
    }
    println!("✓ both strategies agree on totals");
}

#[test]
fn test_quadratic_profile_is_a_separate_model() {
    println!("\n=== Test: quadratic profile stays separate ===");
    let linear = solve(14400.0, MARATHON_KM, 30.0).unwrap();
    let quadratic =
        solve_with_profile(14400.0, MARATHON_KM, 30.0, PaceProfile::Quadratic).unwrap();

    // Linear keeps the sum invariant, quadratic does not
    assert!((linear.total_seconds() - 14400.0).abs() < 1e-9);
    assert!((quadratic.total_seconds() - 14400.0).abs() > 1.0);

    // Quadratic slows only the start: finish pace equals the average
    let avg = 14400.0 / MARATHON_KM;
    assert!((quadratic.last_pace() - avg).abs() < 1e-9);
    assert!((quadratic.first_pace() - (avg + 30.0)).abs() < 1e-9);
    println!(
        "✓ linear sum={:.3}s, quadratic sum={:.3}s (documented drift)",
        linear.total_seconds(),
        quadratic.total_seconds()
    );
}

#[test]
fn test_validation_is_atomic() {
    println!("\n=== Test: invalid input fails atomically ===");
    assert!(solve(-1.0, MARATHON_KM, 10.0).is_err());
    assert!(solve(14400.0, f64::NAN, 10.0).is_err());

    let req: PlanRequest =
        serde_json::from_str(r#"{"target": "bogus", "race": "full"}"#).unwrap();
    assert!(build_plan(&req, &PlannerConfig::default()).is_err());

    let req: PredictRequest = serde_json::from_str(r#"{"pace": 0}"#).unwrap();
    assert!(build_prediction(&req).is_err());
    println!("✓ no partial results on invalid input");
}

#[test]
fn test_stateless_across_requests() {
    println!("\n=== Test: repeated solves are independent ===");
    let cfg = PlannerConfig::default();
    let req: PlanRequest = serde_json::from_str(
        r#"{"target": 14400, "race": "full", "strategy": "negative", "strategy_seconds": 30}"#,
    )
    .unwrap();

    let first = build_plan(&req, &cfg).unwrap();
    let second = build_plan(&req, &cfg).unwrap();
    for (a, b) in first.splits.iter().zip(&second.splits) {
        assert_eq!(a.cumulative_seconds, b.cumulative_seconds);
        assert_eq!(a.reference_pace_sec_per_km, b.reference_pace_sec_per_km);
    }
    println!("✓ identical inputs give identical tables");
}

#[test]
fn test_display_formatting_semantics() {
    println!("\n=== Test: display formatting ===");
    assert_eq!(format_hms(13530.0), "3:45:30");
    assert_eq!(format_hms(13529.5), "3:45:30"); // round to nearest second
    assert_eq!(format_pace(255.4), "4:15 /km");
    assert_eq!(format_pace(300.0), "5:00 /km");
    println!("✓ H:MM:SS and M:SS /km semantics reproduced");
}

#[test]
fn test_wider_finish_window_config() {
    println!("\n=== Test: finish window is configurable ===");
    let cfg: PlannerConfig = serde_json::from_str(r#"{"finish_window_km": 3.0}"#).unwrap();
    let curve = solve(14400.0, MARATHON_KM, 30.0).unwrap();
    let checkpoints = key_splits_for(MARATHON_KM, &cfg.key_splits_km);
    let splits = project(&curve, &checkpoints, cfg.finish_window_km);

    // With a 3 km window the 40 km row also shows the finishing pace
    let row_40 = splits.iter().find(|s| s.distance_km == 40.0).unwrap();
    assert_eq!(row_40.reference_pace_sec_per_km, curve.last_pace());
    println!("✓ 40 km row picked up the finishing pace under a 3 km window");
}
