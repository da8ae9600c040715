use colregs_core::decision::{Cell, DecisionSpace};
use colregs_core::enums::{CrossingSide, PassingSide};
use colregs_core::error::ConfigError;
use colregs_cpa::CpaEngine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::metric::cpa_utility;
use crate::objective::{ObjectiveBuilder, ObjectiveFunction, ObjectiveKind, RuleObjective};
use crate::stand_on::StandOnAction;

const EPS: f64 = 1e-6;
const COLLISION: f64 = 10.0;
const ALL_CLEAR: f64 = 75.0;

fn make_builder(kind: ObjectiveKind) -> ObjectiveBuilder {
    ObjectiveBuilder::new(kind)
        .collision_distance(COLLISION)
        .all_clear_distance(ALL_CLEAR)
        .tol(2000.0)
}

/// Reciprocal courses 1000 m apart, ownship heading North, closing at 4 m/s.
fn make_head_on_engine() -> CpaEngine {
    CpaEngine::new(0.0, 1000.0, 180.0, 2.0, 0.0, 0.0)
}

/// Starboard turn that yields the given CPA in the head-on geometry above.
/// CPA = 1000 * sin(turn / 2) for equal speeds.
fn head_on_turn_for_cpa(cpa: f64) -> f64 {
    2.0 * (cpa / 1000.0).asin().to_degrees()
}

#[test]
fn test_cpa_utility_shape() {
    for floor in [0.0, 15.0, 25.0] {
        assert_eq!(cpa_utility(5.0, COLLISION, ALL_CLEAR, floor), 0.0);
        assert!((cpa_utility(COLLISION, COLLISION, ALL_CLEAR, floor) - floor).abs() < EPS);
        assert_eq!(cpa_utility(ALL_CLEAR, COLLISION, ALL_CLEAR, floor), 100.0);
        assert_eq!(cpa_utility(500.0, COLLISION, ALL_CLEAR, floor), 100.0);
        let mid = cpa_utility(42.5, COLLISION, ALL_CLEAR, floor);
        assert!((mid - (floor + (100.0 - floor) * 0.5)).abs() < EPS);
    }
}

#[test]
fn test_cpa_utility_zero_width_range() {
    assert_eq!(cpa_utility(9.0, 10.0, 10.0, 25.0), 0.0);
    assert_eq!(cpa_utility(10.0, 10.0, 10.0, 25.0), 100.0);
}

#[test]
fn test_cpa_utility_monotone() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..100 {
        let collision = rng.gen_range(0.0..50.0);
        let all_clear = collision + rng.gen_range(0.0..200.0);
        let floor = rng.gen_range(0.0..50.0);
        let mut prev = 0.0;
        for k in 0..=100 {
            let d = collision + (all_clear - collision) * k as f64 / 100.0;
            let u = cpa_utility(d, collision, all_clear, floor);
            assert!(u + 1e-9 >= prev);
            assert!((0.0..=100.0).contains(&u));
            prev = u;
        }
    }
}

#[test]
fn test_build_requires_distances() {
    let engine = make_head_on_engine();
    let err = ObjectiveBuilder::new(ObjectiveKind::Cpa)
        .all_clear_distance(ALL_CLEAR)
        .build(&engine)
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingParam("collision_distance"));
}

#[test]
fn test_build_rejects_inverted_distances() {
    let engine = make_head_on_engine();
    let err = ObjectiveBuilder::new(ObjectiveKind::HeadOn)
        .collision_distance(80.0)
        .all_clear_distance(20.0)
        .build(&engine)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvertedDistances { .. }));
}

#[test]
fn test_build_rejects_bad_tol() {
    let engine = make_head_on_engine();
    assert!(make_builder(ObjectiveKind::Cpa).tol(0.0).build(&engine).is_err());
    assert!(make_builder(ObjectiveKind::Cpa).tol(f64::NAN).build(&engine).is_err());
}

#[test]
fn test_build_requires_variant_params() {
    let engine = make_head_on_engine();
    let err = make_builder(ObjectiveKind::Overtaking).build(&engine).unwrap_err();
    assert_eq!(err, ConfigError::MissingParam("passing_side"));
    let err = make_builder(ObjectiveKind::CrossingGiveWay)
        .crossing_side(CrossingSide::Stern)
        .build(&engine)
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingParam("osh"));
    let err = make_builder(ObjectiveKind::CrossingStandOn)
        .own_heading(0.0)
        .build(&engine)
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingParam("original_course"));
    // In extremis needs no latched course.
    assert!(make_builder(ObjectiveKind::CrossingStandOn)
        .own_heading(0.0)
        .in_extremis(true)
        .build(&engine)
        .is_ok());
}

#[test]
fn test_set_param_text() {
    let engine = make_head_on_engine();
    let mut builder = ObjectiveBuilder::new(ObjectiveKind::CrossingGiveWay);
    builder.set_param("collision_distance", "10").unwrap();
    builder.set_param("all_clear_distance", "75").unwrap();
    builder.set_param("passing_side", "bow").unwrap();
    builder.set_param("osh", "0").unwrap();
    builder.set_param("ok_cn_bow_cross_dist", "30").unwrap();
    assert!(builder.set_param("passing_side", "sideways").is_err());
    assert!(builder.set_param("collision_distance", "-1").is_err());
    assert_eq!(
        builder.set_param("bogus", "1"),
        Err(ConfigError::UnknownParam("bogus".to_string()))
    );
    let objective = builder.build(&engine).unwrap();
    assert_eq!(objective.kind(), ObjectiveKind::CrossingGiveWay);
    match objective {
        ObjectiveFunction::CrossingGiveWay(o) => assert_eq!(o.passing_side(), CrossingSide::Bow),
        _ => panic!("wrong variant"),
    }
    let mut cpa = ObjectiveBuilder::new(ObjectiveKind::Cpa);
    assert!(cpa.set_param("passing_side", "port").is_err());
}

#[test]
fn test_generic_cpa_objective() {
    let engine = make_head_on_engine();
    let objective = make_builder(ObjectiveKind::Cpa).build(&engine).unwrap();
    assert_eq!(objective.name(), "cpa");
    // Holding course is a collision.
    assert_eq!(objective.evaluate(&Cell::at(0.0, 2.0)), 0.0);
    // Halfway between collision and all-clear.
    let turn = head_on_turn_for_cpa(42.5);
    let u = objective.evaluate(&Cell::at(turn, 2.0));
    assert!((u - 50.0).abs() < 1e-3, "{u}");
    let turn = head_on_turn_for_cpa(200.0);
    assert_eq!(objective.evaluate(&Cell::at(turn, 2.0)), 100.0);
}

#[test]
fn test_head_on_scenario_utilities() {
    let engine = make_head_on_engine();
    let objective = make_builder(ObjectiveKind::HeadOn).build(&engine).unwrap();
    let good = Cell::at(head_on_turn_for_cpa(80.0), 2.0);
    let bad = Cell::at(head_on_turn_for_cpa(5.0), 2.0);
    assert!((engine.eval_cpa(good.course, good.speed, 2000.0) - 80.0).abs() < 1e-6);
    assert!((engine.eval_cpa(bad.course, bad.speed, 2000.0) - 5.0).abs() < 1e-6);
    assert_eq!(objective.evaluate(&good), 100.0);
    assert_eq!(objective.evaluate(&bad), 0.0);
}

#[test]
fn test_head_on_rejects_port_turn() {
    let engine = make_head_on_engine();
    let objective = make_builder(ObjectiveKind::HeadOn).build(&engine).unwrap();
    // A port turn crosses the contact's bow and passes starboard to starboard.
    let turn = 360.0 - head_on_turn_for_cpa(80.0);
    assert!(engine.crosses_bow(turn, 2.0));
    assert_eq!(objective.evaluate(&Cell::at(turn, 2.0)), 0.0);
}

#[test]
fn test_head_on_bearing_rate_term() {
    let engine = make_head_on_engine();
    let objective = make_builder(ObjectiveKind::HeadOn).build(&engine).unwrap();
    let initial = match objective {
        ObjectiveFunction::HeadOn(o) => o.initial_bearing_rate(),
        _ => panic!("wrong variant"),
    };
    // Both turning square to starboard at 2 m/s: 4 m/s across 1000 m.
    assert!((initial + (0.004f64).to_degrees()).abs() < EPS);
    // The term lifts a just-clear CPA above the bare floor.
    let turn = head_on_turn_for_cpa(12.0);
    let bare = 25.0 + 75.0 * 2.0 / 65.0;
    assert!(objective.evaluate(&Cell::at(turn, 2.0)) > bare);
}

#[test]
fn test_head_on_monotone_in_cpa() {
    let engine = make_head_on_engine();
    let objective = make_builder(ObjectiveKind::HeadOn).build(&engine).unwrap();
    let mut prev = 0.0;
    for cpa in (10..=90).map(|d| d as f64) {
        let u = objective.evaluate(&Cell::at(head_on_turn_for_cpa(cpa), 2.0));
        assert!(u + 1e-9 >= prev, "cpa {cpa}: {u} < {prev}");
        assert!(u <= 100.0);
        prev = u;
    }
}

#[test]
fn test_head_on_coincident() {
    let engine = CpaEngine::new(0.0, 0.0, 180.0, 2.0, 0.0, 0.0);
    let objective = make_builder(ObjectiveKind::HeadOn).build(&engine).unwrap();
    assert_eq!(objective.evaluate(&Cell::at(90.0, 2.0)), 0.0);
}

/// Contact 100 m ahead heading North at 1 m/s, ownship 20 m to its port.
fn make_overtaking_engine() -> CpaEngine {
    CpaEngine::new(20.0, 100.0, 0.0, 1.0, 0.0, 0.0)
}

#[test]
fn test_overtaking_floor() {
    let engine = make_overtaking_engine();
    let objective = make_builder(ObjectiveKind::Overtaking)
        .passing_side(PassingSide::Port)
        .build(&engine)
        .unwrap();
    // Straight past on the contact's port side, 20 m abeam.
    let cell = Cell::at(0.0, 3.0);
    assert!((engine.eval_cpa(0.0, 3.0, 2000.0) - 20.0).abs() < EPS);
    assert!(engine.passes_port(0.0, 3.0));
    let expected = 15.0 + 85.0 * 10.0 / 65.0;
    assert!((objective.evaluate(&cell) - expected).abs() < EPS);
}

#[test]
fn test_overtaking_wrong_side_is_zero() {
    let engine = make_overtaking_engine();
    let port = make_builder(ObjectiveKind::Overtaking)
        .passing_side(PassingSide::Port)
        .build(&engine)
        .unwrap();
    let star = make_builder(ObjectiveKind::Overtaking)
        .passing_side(PassingSide::Starboard)
        .build(&engine)
        .unwrap();
    // Angling hard right to pass down the contact's starboard side.
    let cell = Cell::at(30.0, 4.0);
    assert!(engine.passes_star(30.0, 4.0));
    assert!(star.evaluate(&cell) > 0.0);
    assert_eq!(port.evaluate(&cell), 0.0);
    // Stopped ownship never passes, so only CPA counts.
    let stopped = Cell::at(0.0, 0.0);
    assert!((port.evaluate(&stopped) - star.evaluate(&stopped)).abs() < EPS);
}

/// Ownship heading North, contact 200 m East and 200 m North heading West.
fn make_give_way_engine() -> CpaEngine {
    CpaEngine::new(200.0, 200.0, 270.0, 2.0, 0.0, 0.0)
}

#[test]
fn test_give_way_stern_rejects_bow_crossing() {
    let engine = make_give_way_engine();
    let objective = make_builder(ObjectiveKind::CrossingGiveWay)
        .crossing_side(CrossingSide::Stern)
        .own_heading(0.0)
        .build(&engine)
        .unwrap();
    // Racing ahead at 4 m/s crosses the bow.
    assert!(engine.crosses_bow(0.0, 4.0));
    assert_eq!(objective.evaluate(&Cell::at(0.0, 4.0)), 0.0);
    // A hard starboard turn to run parallel never crosses and is allowed.
    assert!(objective.evaluate(&Cell::at(90.0, 2.0)) > 0.0);
    // A port turn that crosses neither bow nor stern is rejected.
    assert!(!engine.crosses_bow_or_stern(270.0, 2.0));
    assert_eq!(objective.evaluate(&Cell::at(270.0, 2.0)), 0.0);
}

#[test]
fn test_give_way_stern_allows_slow_stern_crossing() {
    let engine = make_give_way_engine();
    let objective = make_builder(ObjectiveKind::CrossingGiveWay)
        .crossing_side(CrossingSide::Stern)
        .own_heading(0.0)
        .build(&engine)
        .unwrap();
    assert!(engine.crosses_stern(0.0, 1.0));
    let dist = engine.eval_cpa(0.0, 1.0, 2000.0);
    let expected = if dist >= ALL_CLEAR {
        100.0
    } else {
        25.0 + 75.0 * (dist - COLLISION) / 65.0
    };
    assert!((objective.evaluate(&Cell::at(0.0, 1.0)) - expected).abs() < EPS);
}

#[test]
fn test_give_way_bow_requires_clearance() {
    let engine = make_give_way_engine();
    let objective = make_builder(ObjectiveKind::CrossingGiveWay)
        .crossing_side(CrossingSide::Bow)
        .own_heading(0.0)
        .ok_bow_cross_dist(150.0)
        .build(&engine)
        .unwrap();
    // 10 deg right at 4 m/s: crosses the bow, but with too little margin.
    let tight = engine.crosses_bow_dist(10.0, 4.0).unwrap();
    assert!(tight <= 150.0, "{tight}");
    assert_eq!(objective.evaluate(&Cell::at(10.0, 4.0)), 0.0);
    // A right turn that does not cross the bow is rejected too.
    assert!(!engine.crosses_bow(90.0, 4.0));
    assert_eq!(objective.evaluate(&Cell::at(90.0, 4.0)), 0.0);
    // Holding course is not a right turn and is scored by CPA.
    assert!(objective.evaluate(&Cell::at(0.0, 4.0)) > 0.0);
}

#[test]
fn test_stand_on_hold() {
    let engine = make_give_way_engine();
    let objective = make_builder(ObjectiveKind::CrossingStandOn)
        .own_heading(0.0)
        .original_course(0.0)
        .original_speed(2.0)
        .build(&engine)
        .unwrap();
    assert_eq!(objective.evaluate(&Cell::at(0.0, 2.0)), 100.0);
    // Course weighs twice as much as speed.
    let off_course = objective.evaluate(&Cell::at(10.0, 2.0));
    let off_speed = objective.evaluate(&Cell::at(0.0, 2.75));
    assert!((off_course - 200.0 / 3.0).abs() < EPS);
    assert!((off_speed - 250.0 / 3.0).abs() < EPS);
    // Course wraps through North.
    assert!((objective.evaluate(&Cell::at(350.0, 2.0)) - off_course).abs() < EPS);
    assert_eq!(objective.evaluate(&Cell::at(90.0, 4.0)), 0.0);
}

#[test]
fn test_stand_on_avoid_bans_port_turn_for_port_contact() {
    // Contact on ownship's port bow.
    let engine = CpaEngine::new(-200.0, 200.0, 90.0, 2.0, 0.0, 0.0);
    assert!(engine.ownship_contact_rel_bearing(0.0) > 180.0);
    let objective = make_builder(ObjectiveKind::CrossingStandOn)
        .own_heading(0.0)
        .in_extremis(true)
        .build(&engine)
        .unwrap();
    match objective {
        ObjectiveFunction::CrossingStandOn(o) => assert_eq!(o.action(), StandOnAction::Avoid),
        _ => panic!("wrong variant"),
    }
    assert_eq!(objective.evaluate(&Cell::at(300.0, 2.0)), 0.0);
    assert!(objective.evaluate(&Cell::at(90.0, 2.0)) > 0.0);
}

#[test]
fn test_stand_on_avoid_allows_port_turn_for_starboard_contact() {
    let engine = make_give_way_engine();
    let objective = make_builder(ObjectiveKind::CrossingStandOn)
        .own_heading(0.0)
        .in_extremis(true)
        .build(&engine)
        .unwrap();
    let cell = Cell::at(270.0, 2.0);
    let dist = engine.eval_cpa(270.0, 2.0, 2000.0);
    assert!(dist >= ALL_CLEAR);
    assert_eq!(objective.evaluate(&cell), 100.0);
}

#[test]
fn test_all_objectives_bounded_and_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(29);
    let space = DecisionSpace::new(36, 6, 4.0).unwrap();
    for _ in 0..30 {
        let engine = CpaEngine::new(
            rng.gen_range(-300.0..300.0),
            rng.gen_range(-300.0..300.0),
            rng.gen_range(0.0..360.0),
            rng.gen_range(0.0..4.0),
            rng.gen_range(-300.0..300.0),
            rng.gen_range(-300.0..300.0),
        );
        let builders = [
            make_builder(ObjectiveKind::Cpa),
            make_builder(ObjectiveKind::Overtaking).passing_side(PassingSide::Starboard),
            make_builder(ObjectiveKind::HeadOn),
            make_builder(ObjectiveKind::CrossingGiveWay)
                .crossing_side(CrossingSide::Stern)
                .own_heading(45.0),
            make_builder(ObjectiveKind::CrossingStandOn)
                .own_heading(45.0)
                .original_course(45.0)
                .original_speed(2.0),
        ];
        for builder in builders {
            let objective = builder.build(&engine).unwrap();
            let a = objective.evaluate_space(&space);
            let b = objective.evaluate_space(&space);
            assert_eq!(a.len(), space.len());
            assert_eq!(a, b);
            assert!(a.iter().all(|u| (0.0..=100.0).contains(u)));
        }
    }
}
