use approx::assert_relative_eq;
use banshee_animation_core::{EaseEnds, EaseMethod, Easing, EasingError};

const METHODS: [EaseMethod; 10] = [
    EaseMethod::Sine,
    EaseMethod::Quad,
    EaseMethod::Cubic,
    EaseMethod::Quart,
    EaseMethod::Quint,
    EaseMethod::Expo,
    EaseMethod::Circ,
    EaseMethod::Back,
    EaseMethod::Elastic,
    EaseMethod::Bounce,
];

fn easing(ends: EaseEnds, method: EaseMethod) -> Easing {
    Easing::smooth(ends, method, Some(method.default_param())).unwrap()
}

#[test]
fn every_curve_starts_at_zero_and_ends_at_one() {
    for ends in [EaseEnds::In, EaseEnds::Out, EaseEnds::InOut] {
        for method in METHODS {
            let e = easing(ends, method);
            assert_relative_eq!(e.shape(0.0), 0.0, epsilon = 1e-3);
            assert_relative_eq!(e.shape(1.0), 1.0, epsilon = 1e-3);
        }
    }
}

#[test]
fn in_out_passes_through_midpoint() {
    for method in METHODS {
        let e = easing(EaseEnds::InOut, method);
        assert_relative_eq!(e.shape(0.5), 0.5, epsilon = 1e-3);
    }
}

#[test]
fn out_mirrors_in() {
    for method in METHODS {
        let ein = easing(EaseEnds::In, method);
        let eout = easing(EaseEnds::Out, method);
        for t in [0.1f32, 0.3, 0.6, 0.9] {
            assert_relative_eq!(eout.shape(t), 1.0 - ein.shape(1.0 - t), epsilon = 1e-5);
        }
    }
}

#[test]
fn polynomial_reference_values() {
    assert_relative_eq!(easing(EaseEnds::In, EaseMethod::Cubic).shape(0.5), 0.125, epsilon = 1e-6);
    assert_relative_eq!(easing(EaseEnds::In, EaseMethod::Quart).shape(0.5), 0.0625, epsilon = 1e-6);
    assert_relative_eq!(easing(EaseEnds::Out, EaseMethod::Quint).shape(0.5), 0.96875, epsilon = 1e-6);
    assert_relative_eq!(
        easing(EaseEnds::In, EaseMethod::Sine).shape(0.5),
        1.0 - std::f32::consts::FRAC_1_SQRT_2,
        epsilon = 1e-6
    );
}

#[test]
fn names_resolve_from_identifiers() {
    let e = Easing::parse("easeOutBounce", &[0.5]).unwrap();
    assert_eq!(e.name(), "easeOutBounce");
    assert!(matches!(
        Easing::parse("easeInBack", &[f32::NAN]),
        Err(EasingError::NonFiniteParam { .. })
    ));
    assert!(matches!(
        Easing::parse("bezier", &[]),
        Err(EasingError::UnknownEasing { .. })
    ));
}

fn ease_in(method: EaseMethod, param: f32) -> Easing {
    Easing::smooth(EaseEnds::In, method, Some(param)).unwrap()
}

fn assert_samples(easing: Easing, samples: &[(f32, f32)]) {
    for &(t, expected) in samples {
        assert_relative_eq!(easing.shape(t), expected, epsilon = 1e-5);
    }
}

#[test]
fn transcendental_reference_values() {
    assert_samples(
        easing(EaseEnds::In, EaseMethod::Expo),
        &[(0.25, 0.0055243), (0.5, 0.03125), (0.75, 0.1767767)],
    );
    assert_samples(
        easing(EaseEnds::In, EaseMethod::Circ),
        &[(0.25, 0.0317542), (0.5, 0.1339746), (0.75, 0.3385622)],
    );
}

#[test]
fn back_reference_values() {
    assert_samples(
        ease_in(EaseMethod::Back, 1.70158),
        &[(0.25, -0.0641366), (0.5, -0.0876975), (0.75, 0.1825903)],
    );
    assert_samples(
        ease_in(EaseMethod::Back, 2.5),
        &[(0.25, -0.1015625), (0.5, -0.1875), (0.75, 0.0703125)],
    );
}

#[test]
fn elastic_reference_values() {
    assert_samples(
        ease_in(EaseMethod::Elastic, 1.0),
        &[(0.25, -0.0396282), (0.5, 0.0), (0.75, 0.5576106)],
    );
    assert_samples(
        ease_in(EaseMethod::Elastic, 2.0),
        &[(0.4, -0.164291), (0.5, -0.3535534), (0.6, -0.4283814), (0.9, 0.7795023)],
    );
}

#[test]
fn bounce_reference_values() {
    assert_samples(
        ease_in(EaseMethod::Bounce, 0.5),
        &[(0.25, 0.109375), (0.5, 0.46875), (0.75, 0.5273438)],
    );
    assert_samples(
        ease_in(EaseMethod::Bounce, 0.25),
        &[(0.25, 0.0273438), (0.5, 0.234375), (0.75, 0.5273438)],
    );
    // bounciness 0.25 reproduces the classic out-bounce curve
    let out = Easing::smooth(EaseEnds::Out, EaseMethod::Bounce, Some(0.25)).unwrap();
    assert_samples(out, &[(0.2, 0.3025), (0.5, 0.765625), (0.8, 0.94)]);
}
