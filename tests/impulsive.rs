use astro_calculator::core::constants::MU_EARTH_KM3_S2 as MU;
use astro_calculator::impulsive::lambert;
use astro_calculator::impulsive::{ImpulsiveError, hohmann, plan_rendezvous};
use astro_calculator::orbits::{circular_speed, orbital_period};

const LEO_KM: f64 = 6678.0;
const GEO_KM: f64 = 42_164.0;

#[test]
fn hohmann_symmetry_and_time_match() {
    let up = hohmann(LEO_KM, GEO_KM, MU).expect("up");
    let down = hohmann(GEO_KM, LEO_KM, MU).expect("down");

    // Total dv symmetric under exchange of r1 and r2
    assert!((up.dv_total_km_s - down.dv_total_km_s).abs() < 1e-12);
    assert!((up.tof_seconds - down.tof_seconds).abs() < 1e-9);

    // Outward transfer burns prograde, inward transfer burns retrograde
    assert!(up.dv1_km_s > 0.0 && up.dv2_km_s > 0.0);
    assert!(down.dv1_km_s < 0.0 && down.dv2_km_s < 0.0);
}

#[test]
fn hohmann_leo_to_geo_reasonable_numbers() {
    let h = hohmann(LEO_KM, GEO_KM, MU).expect("hohmann");
    assert!((h.dv1_km_s - 2.4258).abs() < 1e-3, "dv1 = {}", h.dv1_km_s);
    assert!((h.dv2_km_s - 1.4668).abs() < 1e-3, "dv2 = {}", h.dv2_km_s);
    assert!((h.dv_total_km_s - 3.8926).abs() < 1e-3, "dv_total = {}", h.dv_total_km_s);
    let hours = h.tof_seconds / 3600.0;
    assert!((hours - 5.275).abs() < 1e-2, "tof_hours = {}", hours);
}

#[test]
fn hohmann_rejects_non_positive_radius() {
    assert_eq!(hohmann(-1.0, GEO_KM, MU), Err(ImpulsiveError::InvalidRadius(-1.0)));
}

#[test]
fn rendezvous_wait_is_within_one_synodic_period() {
    for phase in [0.0, 90.0, 180.0, 359.0] {
        let plan = plan_rendezvous(LEO_KM, GEO_KM, phase, MU).expect("plan");
        assert!(plan.wait_time_s >= 0.0);
        assert!(plan.wait_time_s < plan.synodic_period_s, "phase {phase}: {plan:?}");
        assert!((plan.total_time_s - plan.wait_time_s - plan.transfer.tof_seconds).abs() < 1e-6);
    }
}

#[test]
fn lambert_quarter_orbit_matches_circular_velocity() {
    let r1 = [7000.0, 0.0, 0.0];
    let r2 = [0.0, 7000.0, 0.0];
    let tof = orbital_period(MU, 7000.0) / 4.0;

    let solution = lambert::solve_prograde(r1, r2, tof, MU).expect("lambert solve");
    let v1 = solution.v1_km_s;
    let v2 = solution.v2_km_s;
    let expected_speed = circular_speed(MU, 7000.0);

    assert!(v1[0].abs() < 1e-2, "expected tangential departure: {:?}", v1);
    assert!((v1[1] - expected_speed).abs() < 1e-2, "departure speed: {:?}", v1);
    assert!((v2[0] + expected_speed).abs() < 1e-2, "arrival velocity: {:?}", v2);
    assert!(v2[1].abs() < 1e-2, "expected tangential arrival: {:?}", v2);
}
