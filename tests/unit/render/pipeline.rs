use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{Rgba8, foundation::error::MonsterError};

/// Generates a flat-colored square per part; optionally refuses one category.
struct FixtureStore {
    refuse: Option<PartCategory>,
    loads: AtomicUsize,
}

impl FixtureStore {
    fn new() -> Self {
        Self {
            refuse: None,
            loads: AtomicUsize::new(0),
        }
    }

    fn refusing(category: PartCategory) -> Self {
        Self {
            refuse: Some(category),
            ..Self::new()
        }
    }
}

impl PartStore for FixtureStore {
    fn load(&self, key: PartKey) -> MonsterResult<Arc<image::RgbaImage>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        if self.refuse == Some(key.category()) {
            return Err(MonsterError::part_not_found(key.to_string()));
        }
        let o = key.category().ordinal() as u32;
        let shade = (key.index() * 16) as u8;
        Ok(Arc::new(image::RgbaImage::from_fn(120, 120, |x, y| {
            let inside = (20 + o * 5..100 - o * 5).contains(&x) && (20..100).contains(&y);
            if inside {
                image::Rgba([shade, 40 + o as u8 * 30, 255 - shade, 255])
            } else {
                image::Rgba([0, 0, 0, 0])
            }
        })))
    }
}

fn transforms(m: &Monster) -> Vec<LayerTransform> {
    m.layers.iter().map(|l| l.transform).collect()
}

#[test]
fn layers_follow_draw_order() {
    let m = generate_monster(b"order", &FixtureStore::new(), &GenerateOptions::default());
    let cats: Vec<PartCategory> = m.layers.iter().map(|l| l.category).collect();
    assert_eq!(cats, PartCategory::DRAW_ORDER);
    for l in &m.layers {
        assert!(l.drawn());
        assert_eq!(l.index, m.descriptor.index(l.category));
    }
    assert_eq!(m.image.dimensions(), (120, 120));
}

#[test]
fn body_is_always_tinted_with_descriptor_color() {
    let m = generate_monster(b"body", &FixtureStore::new(), &GenerateOptions::default());
    let body = &m.layers[PartCategory::Body.ordinal()];
    assert_eq!(
        body.transform,
        LayerTransform::Tint {
            hue: m.descriptor.hue,
            saturation: m.descriptor.saturation,
        }
    );
    for c in [PartCategory::Hair, PartCategory::Eyes, PartCategory::Mouth] {
        assert_eq!(m.layers[c.ordinal()].transform, LayerTransform::None);
    }
}

#[test]
fn limb_decisions_replay_the_stream_in_draw_order() {
    for i in 0..40 {
        let input = format!("replay-{i}");
        let m = generate_monster(
            input.as_bytes(),
            &FixtureStore::new(),
            &GenerateOptions::default(),
        );

        let (d, mut rng) = MonsterDescriptor::select_with_stream(input.as_bytes());
        let expect = |rng: &mut Pcg64Dxsm| {
            if rng.next_f64_01() < LIMB_TINT_PROBABILITY {
                LayerTransform::Tint {
                    hue: rng.next_f64_01(),
                    saturation: d.saturation,
                }
            } else {
                LayerTransform::None
            }
        };
        let legs = expect(&mut rng);
        let arms = expect(&mut rng);
        assert_eq!(m.layers[PartCategory::Legs.ordinal()].transform, legs);
        assert_eq!(m.layers[PartCategory::Arms.ordinal()].transform, arms);
    }
}

#[test]
fn limb_golden_values() {
    let m = generate_monster(b"limb-8", &FixtureStore::new(), &GenerateOptions::default());
    let LayerTransform::Tint { hue: legs_hue, .. } = m.layers[0].transform else {
        panic!("legs should be tinted: {:?}", m.layers[0]);
    };
    let LayerTransform::Tint { hue: arms_hue, .. } = m.layers[2].transform else {
        panic!("arms should be tinted: {:?}", m.layers[2]);
    };
    assert!((legs_hue - 0.599_766_820_206_27).abs() < 1e-12);
    assert!((arms_hue - 0.216_424_262_203_538_94).abs() < 1e-12);

    let m = generate_monster(b"limb-1", &FixtureStore::new(), &GenerateOptions::default());
    assert_eq!(m.layers[0].transform, LayerTransform::None);
    assert_eq!(m.layers[2].transform, LayerTransform::None);
}

#[test]
fn missing_part_is_skipped_not_fatal() {
    let store = FixtureStore::refusing(PartCategory::Eyes);
    let m = generate_monster(b"missing", &store, &GenerateOptions::default());
    assert_eq!(store.loads.load(Ordering::Relaxed), 6);
    assert_eq!(m.image.dimensions(), (120, 120));
    for l in &m.layers {
        assert_eq!(l.drawn(), l.category != PartCategory::Eyes, "{l:?}");
    }
    assert!(
        m.layers[PartCategory::Eyes.ordinal()]
            .error
            .as_deref()
            .unwrap()
            .contains("eyes_")
    );
}

#[test]
fn missing_legs_do_not_consume_tint_draws() {
    let m = generate_monster(
        b"limb-0",
        &FixtureStore::refusing(PartCategory::Legs),
        &GenerateOptions::default(),
    );
    let LayerTransform::Tint { hue, .. } = m.layers[PartCategory::Arms.ordinal()].transform else {
        panic!("arms should be tinted: {:?}", m.layers);
    };
    assert!((hue - 0.182_861_192_997_517_9).abs() < 1e-12);
}

#[test]
fn non_artistic_mode_draws_parts_untouched() {
    let opts = GenerateOptions {
        artistic: false,
        greyscale: true,
        ..GenerateOptions::default()
    };
    let m = generate_monster(b"plain", &FixtureStore::new(), &opts);
    assert!(transforms(&m).iter().all(|t| *t == LayerTransform::None));
}

#[test]
fn greyscale_desaturates_every_layer() {
    for i in 0..20 {
        let input = format!("grey-{i}");
        let grey = generate_monster(
            input.as_bytes(),
            &FixtureStore::new(),
            &GenerateOptions {
                greyscale: true,
                ..GenerateOptions::default()
            },
        );
        assert!(
            grey.layers
                .iter()
                .all(|l| l.transform == LayerTransform::Desaturate),
            "{input}: {:?}",
            grey.layers
        );
        assert!(grey.image.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }
}

#[test]
fn greyscale_consumes_the_same_draws() {
    let mut rng_colour = MonsterDescriptor::select_with_stream(b"limb-8").1;
    let mut rng_grey = rng_colour;
    let d = MonsterDescriptor::select(b"limb-8");
    let grey_opts = GenerateOptions {
        greyscale: true,
        ..GenerateOptions::default()
    };
    for category in [PartCategory::Legs, PartCategory::Arms] {
        choose_transform(category, &GenerateOptions::default(), &d, &mut rng_colour);
        choose_transform(category, &grey_opts, &d, &mut rng_grey);
    }
    assert_eq!(rng_colour, rng_grey);
}

#[test]
fn non_artistic_mode_consumes_no_draws() {
    let (d, rng) = MonsterDescriptor::select_with_stream(b"plain");
    let mut after = rng;
    let opts = GenerateOptions {
        artistic: false,
        ..GenerateOptions::default()
    };
    for category in PartCategory::DRAW_ORDER {
        choose_transform(category, &opts, &d, &mut after);
    }
    assert_eq!(after, rng);
}

#[test]
fn parallel_transforms_do_not_change_output() {
    let serial = generate(b"parallel", &FixtureStore::new(), &GenerateOptions::default());
    let parallel = generate(
        b"parallel",
        &FixtureStore::new(),
        &GenerateOptions {
            parallel: true,
            ..GenerateOptions::default()
        },
    );
    assert_eq!(serial.as_raw(), parallel.as_raw());
}

#[test]
fn corners_show_background() {
    let opts = GenerateOptions {
        background: Rgba8::new(255, 0, 0, 255),
        ..GenerateOptions::default()
    };
    let img = generate(b"corner", &FixtureStore::new(), &opts);
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(119, 119).0, [255, 0, 0, 255]);
}

#[test]
fn outcomes_serialize_for_reports() {
    let m = generate_monster(b"json", &FixtureStore::new(), &GenerateOptions::default());
    let v = serde_json::to_value(&m.layers).unwrap();
    assert_eq!(v[3]["category"], "body");
    assert_eq!(v[3]["transform"]["kind"], "tint");
}
