//! Smoke tests for the reference models through the public API.

use gf_core::units::{k, pa};
use gf_eos::{CountingModel, Feed, GibbsModel, IdealMixture, RegularSolution};

#[test]
fn ideal_mixture_never_gains_by_splitting() {
    let model = IdealMixture::new(2);
    let feed = Feed::new(vec![1.0, 1.0]).unwrap();
    let (p, t) = (pa(1e5), k(300.0));

    let g_single = model.gibbs_energy(p, t, feed.amounts());
    let g_split =
        model.gibbs_energy(p, t, &[0.8, 0.2]) + model.gibbs_energy(p, t, &[0.2, 0.8]);

    assert!(g_split > g_single);
}

#[test]
fn regular_solution_gains_by_splitting_above_critical_interaction() {
    let model = RegularSolution::symmetric_binary(3.0).unwrap();
    let (p, t) = (pa(1e5), k(300.0));

    let g_single = model.gibbs_energy(p, t, &[1.0, 1.0]);
    let g_split =
        model.gibbs_energy(p, t, &[0.93, 0.07]) + model.gibbs_energy(p, t, &[0.07, 0.93]);

    println!("single = {g_single:.3} J, split = {g_split:.3} J");
    assert!(g_split < g_single);
}

#[test]
fn regular_solution_stays_homogeneous_below_critical_interaction() {
    let model = RegularSolution::symmetric_binary(1.5).unwrap();
    let (p, t) = (pa(1e5), k(300.0));

    let g_single = model.gibbs_energy(p, t, &[1.0, 1.0]);
    let g_split =
        model.gibbs_energy(p, t, &[0.9, 0.1]) + model.gibbs_energy(p, t, &[0.1, 0.9]);

    assert!(g_split > g_single);
}

#[test]
fn counting_wrapper_is_shareable_across_threads() {
    let model = CountingModel::new(IdealMixture::new(3));
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    let g = model.gibbs_energy(pa(1e5), k(320.0), &[0.1, 0.2, 0.7]);
                    assert!(g.is_finite());
                }
            });
        }
    });
    assert_eq!(model.evaluations(), 100);
    assert_eq!(model.failures(), 0);
}
