use super::*;
use crate::instance::ProblemInstance;
use crate::rand::{draw_instance, InstanceCfg, ReplayToken};
use crate::RingCfg;
use proptest::prelude::*;

/// One caller, one ring of circumference `d`, access distances `(a, b)`.
fn single(d: f64, a: f64, b: f64) -> ProblemInstance {
    ProblemInstance::from_rows(&[d], &[vec![a]], &[vec![b]]).unwrap()
}

#[test]
fn below_best_access_is_empty() {
    let p = single(20.0, 4.0, 6.0);
    assert_eq!(p.feasible_region(0, 0, 3.5), FeasibleRegion::Empty);
    assert!(p.feasible_region(0, 0, 3.5).boundary_values().is_empty());
}

#[test]
fn at_best_access_collapses_to_midpoint() {
    // Holds whichever access point is the nearer one.
    assert_eq!(
        single(20.0, 4.0, 6.0).feasible_region(0, 0, 4.0),
        FeasibleRegion::Point(10.0)
    );
    assert_eq!(
        single(20.0, 6.0, 4.0).feasible_region(0, 0, 4.0),
        FeasibleRegion::Point(10.0)
    );
}

#[test]
fn invalid_tolerance_keeps_tie_at_midpoint() {
    let p = single(20.0, 4.0, 6.0);
    for eps_tie in [-1e-9, f64::NAN] {
        let r = p.feasible_region_with(0, 0, 4.0, RingCfg { eps_tie });
        assert_eq!(r, FeasibleRegion::Point(10.0), "eps_tie={eps_tie}");
    }
}

#[test]
fn a_nearer_covers_whole_ring() {
    let p = single(20.0, 4.0, 6.0);
    let r = p.feasible_region(0, 0, 4.5);
    assert_eq!(r, FeasibleRegion::Arcs(vec![RingArc { lo: 0.0, hi: 20.0 }]));
    assert_eq!(r.boundary_values(), vec![0.0, 20.0]);
    // Tied access distances take the same branch.
    let tied = single(20.0, 5.0, 5.0).feasible_region(0, 0, 7.0);
    assert_eq!(tied.boundary_values(), vec![0.0, 20.0]);
}

#[test]
fn b_nearer_before_reaching_a() {
    // A=9, B=3, D=20, α=5: arc of half-width 2 around 10.
    let r = single(20.0, 9.0, 3.0).feasible_region(0, 0, 5.0);
    assert_eq!(r, FeasibleRegion::Arcs(vec![RingArc { lo: 8.0, hi: 12.0 }]));
    assert!(r.contains(10.0, 0.0));
    assert!(!r.contains(7.9, 0.0));
}

#[test]
fn b_nearer_exactly_at_a_adds_point_zero() {
    let r = single(20.0, 9.0, 3.0).feasible_region(0, 0, 9.0);
    assert_eq!(
        r,
        FeasibleRegion::Arcs(vec![RingArc::point(0.0), RingArc { lo: 4.0, hi: 16.0 }])
    );
    assert_eq!(r.boundary_values(), vec![0.0, 4.0, 16.0]);
}

#[test]
fn b_nearer_past_a_grows_arcs_from_both_ends() {
    let r = single(20.0, 9.0, 3.0).feasible_region(0, 0, 11.0);
    assert_eq!(r.boundary_values(), vec![0.0, 2.0, 2.0, 18.0, 18.0, 20.0]);
    let merged = r.normalized_arcs();
    assert_eq!(merged, vec![RingArc { lo: 0.0, hi: 20.0 }]);
}

#[test]
fn arcs_are_clamped_to_ring() {
    // α−B = 14 exceeds D/2 = 5: the arc around B covers the ring.
    let r = single(10.0, 20.0, 1.0).feasible_region(0, 0, 15.0);
    assert_eq!(r, FeasibleRegion::Arcs(vec![RingArc { lo: 0.0, hi: 10.0 }]));
    for x in r.boundary_values() {
        assert!((0.0..=10.0).contains(&x));
    }
}

#[test]
fn zero_length_ring_is_deterministic() {
    let p = single(0.0, 2.0, 1.0);
    assert_eq!(p.feasible_region(0, 0, 1.0), FeasibleRegion::Point(0.0));
    let r = p.feasible_region(0, 0, 3.0);
    assert!(r.boundary_values().iter().all(|&x| x == 0.0));
}

#[test]
fn tie_tolerance_is_configurable() {
    let p = single(20.0, 9.0, 3.0);
    let alpha = 3.0 + 1e-12;
    assert_eq!(p.feasible_region(0, 0, alpha), FeasibleRegion::Point(10.0));
    let exact = p.feasible_region_with(0, 0, alpha, RingCfg::exact());
    assert!(matches!(exact, FeasibleRegion::Arcs(_)));
}

#[test]
fn boundary_value_matrices_match_closed_form() {
    let p = single(20.0, 9.0, 3.0);
    let bv = p.boundary_values(11.0);
    assert_eq!(bv.mu_star[(0, 0)], 2.0);
    assert_eq!(bv.mu_double_star[(0, 0)], 18.0);
    assert_eq!(bv.nu_star[(0, 0)], 2.0);
    assert_eq!(bv.nu_double_star[(0, 0)], 18.0);
}

#[test]
fn region_table_has_instance_shape() {
    let inst = crate::reference_instance();
    let table = inst.feasible_regions(8.0, RingCfg::default());
    assert_eq!(table.shape(), (inst.m(), inst.n()));
    assert_eq!(table[(3, 2)], inst.feasible_region(3, 2, 8.0));
}

#[test]
fn intersection_of_arcs() {
    let x = FeasibleRegion::Arcs(vec![
        RingArc { lo: 0.0, hi: 4.0 },
        RingArc { lo: 8.0, hi: 12.0 },
    ]);
    let y = FeasibleRegion::Arcs(vec![RingArc { lo: 3.0, hi: 9.0 }]);
    assert_eq!(
        x.intersect(&y, 0.0),
        FeasibleRegion::Arcs(vec![RingArc { lo: 3.0, hi: 4.0 }, RingArc { lo: 8.0, hi: 9.0 }])
    );
    let p = FeasibleRegion::Point(10.0);
    assert_eq!(x.intersect(&p, 0.0), FeasibleRegion::Point(10.0));
    assert_eq!(y.intersect(&p, 0.0), FeasibleRegion::Empty);
    assert_eq!(x.intersect(&FeasibleRegion::Empty, 0.0), FeasibleRegion::Empty);
}

fn pair_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    // Integer-valued data so ties between α and the access distances occur.
    (0u32..30, 0u32..15, 0u32..15, 0u32..30)
        .prop_map(|(d, a, b, alpha)| (d as f64, a as f64, b as f64, alpha as f64 * 0.5))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Empty exactly below the best access distance, a single midpoint at it.
    #[test]
    fn empty_and_point_cases((d, a, b, alpha) in pair_strategy()) {
        let p = single(d, a, b);
        let delta = a.min(b);
        let r = p.feasible_region(0, 0, alpha);
        prop_assert_eq!(r.is_empty(), alpha < delta);
        prop_assert_eq!(r == FeasibleRegion::Point(0.5 * d), alpha == delta);
    }

    /// Boundary values never leave the ring.
    #[test]
    fn boundary_values_within_ring((d, a, b, alpha) in pair_strategy()) {
        let r = single(d, a, b).feasible_region(0, 0, alpha);
        for x in r.boundary_values() {
            prop_assert!((0.0..=d).contains(&x), "x={x} outside [0, {d}]");
        }
    }

    /// Raising α never drops a boundary point out of the region.
    #[test]
    fn regions_grow_with_threshold(
        (d, a, b, alpha) in pair_strategy(),
        step in 0u32..20,
    ) {
        let p = single(d, a, b);
        let lower = p.feasible_region(0, 0, alpha);
        let higher = p.feasible_region(0, 0, alpha + step as f64 * 0.5);
        for x in lower.boundary_values() {
            prop_assert!(higher.contains(x, 1e-9), "x={x} lost: {lower:?} -> {higher:?}");
        }
    }
}

#[test]
fn monotone_on_random_instances() {
    let cfg = RingCfg::default();
    for index in 0..32 {
        let inst = draw_instance(InstanceCfg::default(), ReplayToken { seed: 3, index });
        let base = inst.minimum_threshold();
        let alphas = [base, base + 0.5, base + 2.0, base + 7.0];
        for w in alphas.windows(2) {
            let before = inst.feasible_regions(w[0], cfg);
            let after = inst.feasible_regions(w[1], cfg);
            for (r0, r1) in before.iter().zip(after.iter()) {
                for x in r0.boundary_values() {
                    assert!(r1.contains(x, cfg.eps_tie), "index {index}: {x} lost");
                }
            }
        }
    }
}
