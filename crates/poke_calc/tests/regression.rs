//! Regression scenarios from early-route planning.
//!
//! Every expected percentage here was checked against an exact
//! rational computation of the same turn sequence.

mod common;

use common::helpers::{approx_eq, baby_nidoran, caterpie, geodude, horn_attack, nidoran, tackle};
use poke_calc::{n_shot, n_shot_with_mods, DamageCalc, KillOptions, StatModifier};

fn leered() -> StatModifier {
    StatModifier {
        defense: -1,
        ..StatModifier::NONE
    }
}

fn one_badge_boost() -> StatModifier {
    StatModifier {
        attack_badge_boosts: 1,
        ..StatModifier::NONE
    }
}

#[test]
fn test_horn_attack_rolls() {
    let (mv, att, def) = (horn_attack(), nidoran(), caterpie());
    let calc = DamageCalc::new(&mv, &att, &def);

    assert_eq!((calc.min_damage(false), calc.max_damage(false)), (9, 11));
    assert_eq!((calc.min_damage(true), calc.max_damage(true)), (11, 14));

    let dist = calc.roll_distribution();
    assert_eq!(dist.format_rolls(false), "9x15, 10x23, 11x1");
    assert_eq!(dist.format_rolls(true), "11x2, 12x18, 13x18, 14x1");
}

#[test]
fn test_horn_attack_n_hits() {
    let (mv, att, def) = (horn_attack(), nidoran(), caterpie());
    let none = StatModifier::NONE;

    let expected = [0.0, 0.0, 46.08966667759565, 100.0, 100.0, 100.0, 100.0, 100.0];
    for (i, &want) in expected.iter().enumerate() {
        let hits = i + 1;
        for options in [KillOptions::default(), KillOptions::repeating()] {
            let got = n_shot(&att, &def, hits, &mv, &none, &none, options).unwrap();
            println!("{}-hit Kill%: {} (repeat: {})", hits, got, options.repeat);
            assert!(approx_eq(got, want), "{hits} hits: expected {want}, got {got}");
        }
    }
}

#[test]
fn test_tackle_n_hits() {
    let (mv, att, def) = (tackle(), nidoran(), caterpie());
    let none = StatModifier::NONE;
    let calc = DamageCalc::new(&mv, &att, &def);
    assert_eq!((calc.min_damage(false), calc.max_damage(false)), (5, 6));
    assert_eq!((calc.min_damage(true), calc.max_damage(true)), (6, 8));

    let cases = [
        (4, 2.3414965257257434e-05),
        (5, 1.3761837199067994),
        (6, 100.0),
    ];
    for (hits, want) in cases {
        let got = n_shot(&att, &def, hits, &mv, &none, &none, KillOptions::repeating()).unwrap();
        assert!(approx_eq(got, want), "{hits} hits: expected {want}, got {got}");
    }
}

#[test]
fn test_leer_then_badge_boost() {
    let (mv, att, def) = (horn_attack(), nidoran(), caterpie());
    assert_eq!(leered().mod_defense(&def), 8);

    let got = n_shot_with_mods(
        &att,
        &def,
        2,
        &[&mv, &mv],
        &[StatModifier::NONE, one_badge_boost()],
        &[leered(), leered()],
        KillOptions::default(),
    )
    .unwrap();
    assert!(approx_eq(got, 65.70621467906342), "got {got}");
}

#[test]
fn test_leer_both_turns() {
    let (mv, att, def) = (horn_attack(), nidoran(), caterpie());

    let plain = n_shot(&att, &def, 2, &mv, &StatModifier::NONE, &leered(), KillOptions::default()).unwrap();
    assert!(approx_eq(plain, 15.428850824781188), "got {plain}");

    for options in [KillOptions::default(), KillOptions::repeating()] {
        let boosted = n_shot(&att, &def, 2, &mv, &one_badge_boost(), &leered(), options).unwrap();
        assert!(approx_eq(boosted, 85.09551881568201), "got {boosted}");
    }
}

#[test]
fn test_geodude_tackle_ranges() {
    let (mv, att, def) = (tackle(), geodude(), baby_nidoran(18));
    let calc = DamageCalc::new(&mv, &att, &def);
    assert_eq!((calc.min_damage(false), calc.max_damage(false)), (11, 14));
    assert_eq!((calc.min_damage(true), calc.max_damage(true)), (20, 24));

    // Only a crit kills from 18 in one hit: 10 / 256
    let one = n_shot(&att, &def, 1, &mv, &StatModifier::NONE, &StatModifier::NONE, KillOptions::default()).unwrap();
    assert_eq!(one, 3.90625);

    for options in [KillOptions::default(), KillOptions::repeating()] {
        let two = n_shot(&att, &def, 2, &mv, &StatModifier::NONE, &StatModifier::NONE, options).unwrap();
        assert_eq!(two, 100.0);
    }
}

#[test]
fn test_geodude_tackle_two_hits_by_hp() {
    let cases: [(u16, f64); 25] = [
        (15, 100.0),
        (16, 100.0),
        (17, 100.0),
        (18, 100.0),
        (19, 100.0),
        (20, 100.0),
        (21, 100.0),
        (22, 100.0),
        (23, 99.75715953217455),
        (24, 95.38603111131657),
        (25, 71.34482479659763),
        (26, 31.761828541050296),
        (27, 9.906186436760356),
        (28, 7.720622226331361),
        (29, 7.659912109375),
        (30, 7.659912109375),
        (31, 7.659912109375),
        (32, 7.590811163245808),
        (33, 6.870187010755671),
        (34, 5.251250558586046),
        (35, 3.2522589027058677),
        (36, 1.3273039748212525),
        (37, 0.2957255647497535),
        (38, 0.1575236724913708),
        (39, 0.152587890625),
    ];

    let (mv, att) = (tackle(), geodude());
    let none = StatModifier::NONE;
    for (hp, want) in cases {
        let def = baby_nidoran(hp);
        let got = n_shot(&att, &def, 2, &mv, &none, &none, KillOptions::repeating()).unwrap();
        println!("HP {}: {}%", hp, got);
        assert!(approx_eq(got, want), "hp {hp}: expected {want}, got {got}");
    }
}

#[test]
fn test_one_shot_percent() {
    let (mv, att) = (tackle(), geodude());

    let def = baby_nidoran(13);
    let calc = DamageCalc::new(&mv, &att, &def);
    assert!(calc.one_shot_percent(false) > 0.0);
    assert!(calc.one_shot_percent(false) < 100.0);
    assert_eq!(calc.one_shot_percent(true), 100.0);

    let def = baby_nidoran(25);
    assert_eq!(DamageCalc::new(&mv, &att, &def).one_shot_percent(true), 0.0);
}
