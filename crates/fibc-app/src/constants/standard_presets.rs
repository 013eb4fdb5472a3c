//! Standard bag presets shipped with the calculator

use fibc_domain::model::{BagPreset, BagSpecification, SewnRatio, SpoutSpec, StrapSpec, TieSpec};

const STANDARD_SPOUT: SpoutSpec = SpoutSpec {
    diameter_cm: 40.0,
    height_cm: 48.0,
};

const STANDARD_TIE: TieSpec = TieSpec {
    weight_per_meter_g: 10.0,
    length_cm: 150.0,
};

/// 1 t bag, 90×90×140, filling and discharge spout, loops sewn 2/3
fn one_ton_two_spout() -> BagSpecification {
    BagSpecification {
        height_cm: 140.0,
        width_cm: 90.0,
        bottom_size_cm: 95.0,
        main_density_gm2: 180.0,
        aux_density_gm2: 95.0,
        top_spout: Some(STANDARD_SPOUT),
        bottom_spout: Some(STANDARD_SPOUT),
        tie: STANDARD_TIE,
        strap: StrapSpec {
            loop_height_cm: 25.0,
            sewn_ratio: SewnRatio::TwoThirds,
            weight_per_meter_g: 35.0,
        },
        thread_weight_per_cm_g: 0.077,
    }
}

pub fn standard_presets() -> Vec<BagPreset> {
    vec![
        BagPreset::new("std-1t-2spout", one_ton_two_spout())
            .with_description("1 t, 90x90x140, filling + discharge spout, loops sewn 2/3"),
        BagPreset::new(
            "std-1t-discharge",
            BagSpecification {
                top_spout: None,
                ..one_ton_two_spout()
            },
        )
        .with_description("1 t, open top, discharge spout"),
        BagPreset::new(
            "std-500kg-open",
            BagSpecification {
                height_cm: 100.0,
                bottom_size_cm: 92.0,
                main_density_gm2: 160.0,
                top_spout: None,
                bottom_spout: None,
                strap: StrapSpec {
                    loop_height_cm: 25.0,
                    sewn_ratio: SewnRatio::OneThird,
                    weight_per_meter_g: 30.0,
                },
                ..one_ton_two_spout()
            },
        )
        .with_description("500 kg, open top, flat bottom, loops sewn 1/3"),
    ]
}

pub fn get_standard_preset(name: &str) -> Option<BagPreset> {
    standard_presets().into_iter().find(|p| p.matches_name(name))
}

pub fn is_standard_preset(name: &str) -> bool {
    get_standard_preset(name).is_some()
}
