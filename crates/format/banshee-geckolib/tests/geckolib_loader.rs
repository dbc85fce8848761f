use approx::assert_relative_eq;
use banshee_animation_core::{
    BoneTransform, Config, HierarchyComposer, LookupError, LoopPolicy, MetaValue, Vec3,
};
use banshee_geckolib::{load_animations, load_geometry, AnimationSet, Geometry};
use banshee_test_fixtures::{animations, geometries};

fn player() -> (Geometry, AnimationSet) {
    let geometry = load_geometry(&geometries::json("player").expect("geometry fixture"))
        .expect("geometry should load");
    let set = load_animations(&animations::json("player").expect("animation fixture"), &geometry)
        .expect("animations should load");
    (geometry, set)
}

fn deg(v: f32) -> f32 {
    v.to_radians()
}

#[test]
fn geometry_tree_matches_fixture() {
    let (geometry, _) = player();
    assert_eq!(geometry.identifier(), Some("geometry.banshee.player"));
    assert_eq!(geometry.len(), 15);

    let tree = geometry.tree().unwrap();
    assert_eq!(tree.name, "pelvis");
    assert_eq!(tree.len(), 15);
    let order: Vec<_> = tree.walk().take(6).map(|n| n.name.as_str()).collect();
    assert_eq!(
        order,
        ["pelvis", "spine", "left_upper_arm", "left_lower_arm", "left_hand", "right_upper_arm"]
    );
    assert_eq!(tree.find("head").unwrap().pivot, Vec3::new(0.0, 1.5, 0.0));
}

#[test]
fn animations_keep_document_order_and_metadata() {
    let (_, set) = player();
    let names: Vec<_> = set.keys().map(String::as_str).collect();
    assert_eq!(names, ["walk", "wave", "idle"]);

    assert_eq!(set["walk"].loop_policy(), LoopPolicy::Loop);
    assert_eq!(set["wave"].loop_policy(), LoopPolicy::HoldLastFrame);
    assert_eq!(set["idle"].loop_policy(), LoopPolicy::None);

    let wave = set["wave"].meta();
    assert_eq!(
        wave.blend_weight,
        MetaValue::Expression("query.anim_time * 2".into())
    );
    assert_eq!(wave.start_delay.as_number(), Some(0.5));
    assert!(!wave.override_previous_animation);
    assert!(set["idle"].meta().override_previous_animation);
}

#[test]
fn walk_cycle_samples() {
    let (_, set) = player();
    let walk = &set["walk"];
    assert_eq!(walk.bone_count(), 5);

    let thigh = walk.pose("left_thigh").unwrap();
    assert_relative_eq!(thigh.rotation().evaluate(0.0).x, deg(30.0), epsilon = 1e-6);
    assert_relative_eq!(thigh.rotation().evaluate(0.25).x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(thigh.rotation().evaluate(0.5).x, deg(-30.0), epsilon = 1e-6);
    // loop wraps
    assert_relative_eq!(
        thigh.rotation().evaluate(1.25),
        thigh.rotation().evaluate(0.25),
        epsilon = 1e-6
    );

    let pelvis = walk.pose("pelvis").unwrap();
    assert_relative_eq!(
        pelvis.position().evaluate(0.25),
        Vec3::new(0.0, 1.0 / 16.0, 0.0),
        epsilon = 1e-6
    );

    let arm = walk.pose("left_upper_arm").unwrap();
    // easeInOutSine passes its midpoint at the segment midpoint
    assert_relative_eq!(arm.rotation().evaluate(0.25).x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(
        walk.pose("head").unwrap().rotation().evaluate(0.6).y,
        deg(10.0),
        epsilon = 1e-6
    );
}

#[test]
fn wave_holds_and_steps() {
    let (_, set) = player();
    let wave = &set["wave"];

    let arm = wave.pose("right_upper_arm").unwrap();
    assert_eq!(arm.rotation().evaluate(5.0), arm.rotation().evaluate(2.0));
    assert_relative_eq!(arm.rotation().evaluate(5.0).z, deg(150.0), epsilon = 1e-5);
    // easeOutBack overshoots the target before settling
    assert!(arm.rotation().evaluate(0.4).z > deg(150.0));

    let hand = wave.pose("right_hand").unwrap();
    assert_eq!(hand.rotation().evaluate(0.2).z, 0.0);
    assert_eq!(hand.rotation().evaluate(0.7).z, 0.0);
    assert_relative_eq!(hand.rotation().evaluate(0.8).z, deg(15.0), epsilon = 1e-6);
    assert_relative_eq!(hand.rotation().evaluate(1.0).z, deg(30.0), epsilon = 1e-6);

    let head = wave.pose("head").unwrap();
    assert_eq!(head.scale().evaluate(0.0), Vec3::repeat(1.0));
    assert_relative_eq!(head.scale().evaluate(0.5), Vec3::repeat(1.1), epsilon = 1e-6);
}

#[test]
fn composes_walk_over_geometry() {
    let (geometry, set) = player();
    let tree = geometry.tree().unwrap();
    let walk = &set["walk"];

    let pose = HierarchyComposer::default()
        .compose(&tree, walk, 0.25, BoneTransform::identity())
        .unwrap();
    assert_eq!(pose.len(), 15);

    let pelvis = pose.get("pelvis").unwrap();
    assert_relative_eq!(
        pelvis.transform.translation.vector,
        Vec3::new(0.0, 0.0625, 0.0),
        epsilon = 1e-6
    );
    // unanimated bones inherit their parent's world transform
    assert_eq!(pose.get("spine"), pose.get("pelvis"));
    assert_eq!(pose.get("left_calf"), pose.get("left_thigh"));
    assert_eq!(pose.get("left_foot"), pose.get("left_thigh"));

    let missing = HierarchyComposer::new(Config::strict())
        .compose(&tree, walk, 0.25, BoneTransform::identity())
        .unwrap_err();
    match missing {
        LookupError::MissingBones { bones } => {
            assert_eq!(bones.len(), 10);
            assert_eq!(bones[0], "spine");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fixture_names_resolve() {
    let mut keys = geometries::keys();
    keys.extend(animations::keys());
    assert_eq!(keys, ["player", "player"]);
    assert!(geometries::path("player").unwrap().exists());
    assert!(animations::json("missing").is_err());
}

#[test]
fn raw_documents_agree_with_loader() {
    let (geometry, set) = player();

    let geo: serde_json::Value = geometries::load("player").unwrap();
    let bones = geo["minecraft:geometry"][0]["bones"].as_array().unwrap();
    assert_eq!(bones.len(), geometry.len());

    let doc: serde_json::Value = animations::load("player").unwrap();
    let mut names: Vec<_> = doc["animations"].as_object().unwrap().keys().cloned().collect();
    let mut loaded: Vec<_> = set.keys().cloned().collect();
    names.sort();
    loaded.sort();
    assert_eq!(names, loaded);
    assert_eq!(doc["animations"]["walk"]["animation_length"].as_f64(), Some(1.0));

    let on_disk = std::fs::read_to_string(animations::path("player").unwrap()).unwrap();
    assert_eq!(on_disk, animations::json("player").unwrap());
    assert!(animations::load::<serde_json::Value>("missing").is_err());
}
