//! Type enum and ordered matchup table generation.

use crate::models::TypeChart;
use heck::ToPascalCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Generate the Type enum, name lookup and matchup table
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json = fs::read_to_string(data_dir.join("gen1/typechart.json")).expect("typechart.json");
    let chart: TypeChart = serde_json::from_str(&json).expect("parse typechart");

    let type_count = chart.types.len();
    let known: HashSet<String> = chart.types.iter().map(|t| t.name.to_pascal_case()).collect();

    let idents: Vec<_> = chart
        .types
        .iter()
        .map(|t| format_ident!("{}", t.name.to_pascal_case()))
        .collect();

    // Enum order is the cartridge's internal type order
    let variants: Vec<TokenStream> = idents
        .iter()
        .enumerate()
        .map(|(i, ident)| {
            let idx = i as u8;
            quote! { #ident = #idx }
        })
        .collect();

    let name_arms: Vec<TokenStream> = chart
        .types
        .iter()
        .zip(&idents)
        .map(|(t, ident)| {
            let name = t.name.to_pascal_case();
            quote! { Type::#ident => #name }
        })
        .collect();

    let special_idents: Vec<_> = chart
        .types
        .iter()
        .zip(&idents)
        .filter(|(t, _)| t.special)
        .map(|(_, ident)| ident.clone())
        .collect();

    let matchup_entries: Vec<TokenStream> = chart
        .matchups
        .iter()
        .map(|m| {
            let attacker = m.attacker.to_pascal_case();
            let defender = m.defender.to_pascal_case();
            assert!(known.contains(&attacker), "unknown attacking type {}", m.attacker);
            assert!(known.contains(&defender), "unknown defending type {}", m.defender);

            let attacker = format_ident!("{}", attacker);
            let defender = format_ident!("{}", defender);
            let effectiveness = match m.multiplier {
                0 => format_ident!("Immune"),
                5 => format_ident!("NotVeryEffective"),
                20 => format_ident!("SuperEffective"),
                other => panic!("unsupported multiplier {} for {} -> {}", other, m.attacker, m.defender),
            };
            quote! {
                Matchup {
                    attacker: Type::#attacker,
                    defender: Type::#defender,
                    effectiveness: TypeEffectiveness::#effectiveness,
                }
            }
        })
        .collect();
    let matchup_count = matchup_entries.len();

    let mut phf_map = phf_codegen::Map::new();
    let lookup_keys: Vec<String> = chart.types.iter().map(|t| t.name.to_lowercase()).collect();
    for (key, ident) in lookup_keys.iter().zip(&idents) {
        phf_map.entry(key.as_str(), &format!("Type::{}", ident));
    }
    let phf_str = phf_map.build().to_string();

    let code = quote! {
        /// Gen 1 elemental type
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Type {
            #(#variants),*
        }

        impl Type {
            /// Total number of types
            pub const COUNT: usize = #type_count;

            /// Every type, in cartridge order
            pub const ALL: [Type; #type_count] = [#(Type::#idents),*];

            /// Parse type from string (case-insensitive)
            #[inline]
            pub fn from_str(s: &str) -> Option<Self> {
                TYPE_LOOKUP.get(s.to_ascii_lowercase().as_str()).copied()
            }

            /// Display name
            pub const fn name(self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }

            /// Whether moves of this type use the Special stat on both sides
            #[inline]
            pub const fn is_special(self) -> bool {
                matches!(self, #(Type::#special_idents)|*)
            }
        }

        /// Non-neutral effectiveness of one matchup entry.
        /// Discriminants are the multiplier times ten.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[repr(u8)]
        pub enum TypeEffectiveness {
            /// 0x damage
            Immune = 0,
            /// 0.5x damage
            NotVeryEffective = 5,
            /// 2x damage
            SuperEffective = 20,
        }

        impl TypeEffectiveness {
            /// Multiplier on the ten-scale used by the cartridge
            #[inline]
            pub const fn tenths(self) -> u32 {
                self as u32
            }
        }

        /// One entry of the cartridge's type matchup table
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct Matchup {
            pub attacker: Type,
            pub defender: Type,
            pub effectiveness: TypeEffectiveness,
        }

        /// Matchup table in cartridge order (pairs not listed are neutral)
        pub static MATCHUPS: [Matchup; #matchup_count] = [
            #(#matchup_entries),*
        ];
    };

    let dest = out_dir.join("types.rs");
    let mut file = BufWriter::new(File::create(&dest).expect("create types.rs"));
    writeln!(file, "{}", code).expect("write types.rs");
    writeln!(file).expect("write types.rs");
    writeln!(
        file,
        "static TYPE_LOOKUP: phf::Map<&'static str, Type> = {};",
        phf_str
    )
    .expect("write types.rs");
}
