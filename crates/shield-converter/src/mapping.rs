//! Fixed name → code tables of the SHIELD engine.
//!
//! Predefined materials use ICRU numbers (elements by atomic number, then
//! the compound catalogue from 99), isotopes use NUCLID codes.

use once_cell::sync::Lazy;
use sim_setup::{HeavyIon, Particle, StateOfMatter};
use std::collections::HashMap;

/// ICRU number of vacuum.
pub const VACUUM_ICRU: i64 = 1000;

/// Particle code shared by every heavy ion.
pub const HEAVY_ION_CODE: i64 = 25;

/// Particle code meaning "all particles".
pub const ALL_PARTICLES_CODE: i64 = -1;

static PREDEFINED_MATERIALS: &[(&str, i64)] = &[
    ("vacuum", VACUUM_ICRU),
    ("hydrogen", 1), ("helium", 2), ("lithium", 3),
    ("beryllium", 4), ("boron", 5), ("carbon", 6),
    ("nitrogen", 7), ("oxygen", 8), ("fluorine", 9),
    ("neon", 10), ("sodium", 11), ("magnesium", 12),
    ("aluminum", 13), ("silicon", 14), ("phosphorus", 15),
    ("sulfur", 16), ("chlorine", 17), ("argon", 18),
    ("potassium", 19), ("calcium", 20), ("scandium", 21),
    ("titanium", 22), ("vanadium", 23), ("chromium", 24),
    ("manganese", 25), ("iron", 26), ("cobalt", 27),
    ("nickel", 28), ("copper", 29), ("zinc", 30),
    ("gallium", 31), ("germanium", 32), ("arsenic", 33),
    ("selenium", 34), ("bromine", 35), ("krypton", 36),
    ("rubidium", 37), ("strontium", 38), ("yttrium", 39),
    ("zirconium", 40), ("niobium", 41), ("molybdenum", 42),
    ("technetium", 43), ("ruthenium", 44), ("rhodium", 45),
    ("palladium", 46), ("silver", 47), ("cadmium", 48),
    ("indium", 49), ("tin", 50), ("antimony", 51),
    ("tellurium", 52), ("iodine", 53), ("xenon", 54),
    ("cesium", 55), ("barium", 56), ("lanthanum", 57),
    ("cerium", 58), ("praseodymium", 59), ("neodymium", 60),
    ("promethium", 61), ("samarium", 62), ("europium", 63),
    ("gadolinium", 64), ("terbium", 65), ("dysprosium", 66),
    ("holmium", 67), ("erbium", 68), ("thulium", 69),
    ("ytterbium", 70), ("lutetium", 71), ("hafnium", 72),
    ("tantalum", 73), ("tungsten", 74), ("rhenium", 75),
    ("osmium", 76), ("iridium", 77), ("platinum", 78),
    ("gold", 79), ("mercury", 80), ("thallium", 81),
    ("lead", 82), ("bismuth", 83), ("polonium", 84),
    ("astatine", 85), ("radon", 86), ("francium", 87),
    ("radium", 88), ("actinium", 89), ("thorium", 90),
    ("protactinium", 91), ("uranium", 92), ("neptunium", 93),
    ("plutonium", 94), ("americium", 95), ("curium", 96),
    ("berkelium", 97), ("californium", 98), ("a-150_tissue_equivalent_plastic", 99),
    ("acetone", 100), ("acetylene", 101), ("adenine", 102),
    ("adipose_tissue_icrp", 103), ("air_dry", 104), ("alanine", 105),
    ("aluminum_oxide", 106), ("amber", 107), ("ammonia", 108),
    ("aniline", 109), ("anthracene", 110), ("b-100_bone_equivalent_plastic", 111),
    ("bakelite", 112), ("barium_fluoride", 113), ("barium_sulfate", 114),
    ("benzene", 115), ("beryllium_oxide", 116), ("bismuth_germanium_oxide", 117),
    ("blood_icrp", 118), ("bone_compact_icru", 119), ("bone_cortical_icrp", 120),
    ("boron_carbide", 121), ("boron_oxide", 122), ("brain_icrp", 123),
    ("butane", 124), ("n-butyl_alcohol", 125), ("c-552_air_equivalent_plastic", 126),
    ("cadmium_telluride", 127), ("cadmium_tungstate", 128), ("calcium_carbonate", 129),
    ("calcium_fluoride", 130), ("calcium_oxide", 131), ("calcium_sulfate", 132),
    ("calcium_tungstate", 133), ("carbon_dioxide", 134), ("carbon_tetrachloride", 135),
    ("cellulose_acetate_cellophane", 136), ("cellulose_acetate_butyrate", 137), ("cellulose_nitrate", 138),
    ("ceric_sulfate_dosimeter_solution", 139), ("cesium_fluoride", 140), ("cesium_iodide", 141),
    ("chlorobenzene", 142), ("chloroform", 143), ("concrete_portland", 144),
    ("cyclohexane", 145), ("1_2-dichlorobenzene", 146), ("dichlorodiethyl_ether", 147),
    ("1_2-dichloroethane", 148), ("diethyl_ether", 149), ("n_n-dimethyl_formamide", 150),
    ("dimethyl_sulfoxide", 151), ("ethane", 152), ("ethyl_alcohol", 153),
    ("ethyl_cellulose", 154), ("ethylene", 155), ("eye_lens_icrp", 156),
    ("ferric_oxide", 157), ("ferroboride", 158), ("ferrous_oxide", 159),
    ("ferrous_sulfate_dosimeter_solution", 160), ("freon-12", 161), ("freon-12b2", 162),
    ("freon-13", 163), ("freon-13b1", 164), ("freon-13i1", 165),
    ("gadolinium_oxysulfide", 166), ("gallium_arsenide", 167), ("gel_in_photographic_emulsion", 168),
    ("pyrex_glass", 169), ("glass_lead", 170), ("glass_plate", 171),
    ("glucose", 172), ("glutamine", 173), ("glycerol", 174),
    ("guanine", 175), ("gypsum", 176), ("n-heptane", 177),
    ("n-hexane", 178), ("kapton_polyimide_film", 179), ("lanthanum_oxybromide", 180),
    ("lanthanum_oxysulfide", 181), ("lead_oxide", 182), ("lithium_amide", 183),
    ("lithium_carbonate", 184), ("lithium_fluoride", 185), ("lithium_hydride", 186),
    ("lithium_iodide", 187), ("lithium_oxide", 188), ("lithium_tetraborate", 189),
    ("lung_icrp", 190), ("m3_wax", 191), ("magnesium_carbonate", 192),
    ("magnesium_fluoride", 193), ("magnesium_oxide", 194), ("magnesium_tetraborate", 195),
    ("mercuric_iodide", 196), ("methane", 197), ("methanol", 198),
    ("mix_d_wax", 199), ("ms20_tissue_substitute", 200), ("muscle_skeletal_icrp", 201),
    ("muscle_striated_icru", 202), ("muscle_equivalent_liquid_with_sucrose", 203), ("muscle_equivalent_liquid_without_sucrose", 204),
    ("naphthalene", 205), ("nitrobenzene", 206), ("nitrous_oxide", 207),
    ("nylon_du_pont_elvamide_8062", 208), ("nylon_type_6_and_6_6", 209), ("nylon_type_6_10", 210),
    ("nylon_type_11_rilsan", 211), ("octane_liquid", 212), ("paraffin_wax", 213),
    ("n-pentane", 214), ("photographic_emulsion", 215), ("plastic_scintillator_vinyltoluene_based", 216),
    ("plutonium_dioxide", 217), ("polyacrylonitrile", 218), ("polycarbonate_makrolon_lexan", 219),
    ("polychlorostyrene", 220), ("polyethylene", 221), ("polyethylene_terephthalate_mylar", 222),
    ("polymethyl_methacralate_lucite_perspex", 223), ("polyoxymethylene", 224), ("polypropylene", 225),
    ("polystyrene", 226), ("teflon", 227), ("polytrifluorochloroethylene", 228),
    ("polyvinyl_acetate", 229), ("polyvinyl_alcohol", 230), ("polyvinyl_butyral", 231),
    ("polyvinyl_chloride", 232), ("polyvinylidene_chloride_saran", 233), ("polyvinylidene_fluoride", 234),
    ("polyvinyl_pyrrolidone", 235), ("potassium_iodide", 236), ("potassium_oxide", 237),
    ("propane", 238), ("propane_liquid", 239), ("n-propyl_alcohol", 240),
    ("pyridine", 241), ("rubber_butyl", 242), ("rubber_natural", 243),
    ("rubber_neoprene", 244), ("silicon_dioxide", 245), ("silver_bromide", 246),
    ("silver_chloride", 247), ("silver_halides_in_photographic_emulsion", 248), ("silver_iodide", 249),
    ("skin_icrp", 250), ("sodium_carbonate", 251), ("sodium_iodide", 252),
    ("sodium_monoxide", 253), ("sodium_nitrate", 254), ("stilbene", 255),
    ("sucrose", 256), ("terphenyl", 257), ("testes_icrp", 258),
    ("tetrachloroethylene", 259), ("thallium_chloride", 260), ("tissue_soft_icrp", 261),
    ("tissue_soft_icru_four_component", 262), ("tissue_equivalent_gas_methane_based", 263), ("tissue_equivalent_gas_propane_based", 264),
    ("titanium_dioxide", 265), ("toluene", 266), ("trichloroethylene", 267),
    ("triethyl_phosphate", 268), ("tungsten_hexafluoride", 269), ("uranium_dicarbide", 270),
    ("uranium_monocarbide", 271), ("uranium_oxide", 272), ("urea", 273),
    ("valine", 274), ("viton_fluoroelastomer", 275), ("water_liquid", 276),
    ("water_vapor", 277), ("xylene", 278),
];

static ISOTOPES: &[(&str, i64)] = &[
    ("h-*", 1), ("he-*", 2), ("li-*", 3), ("be-*", 4), ("b-*", 5), ("c-*", 6),
    ("n-*", 7), ("o-*", 8), ("f-*", 9), ("ne-*", 10), ("na-*", 11), ("mg-*", 12),
    ("al-*", 13), ("si-*", 14), ("p-*", 15), ("s-*", 16), ("cl-*", 17), ("ar-*", 18),
    ("k-*", 19), ("ca-*", 20), ("sc-*", 21), ("ti-*", 22), ("v-*", 23), ("cr-*", 24),
    ("mn-*", 25), ("fe-*", 26), ("co-*", 27), ("ni-*", 28), ("cu-*", 29), ("zn-*", 30),
    ("ga-*", 31), ("ge-*", 32), ("as-*", 33), ("se-*", 34), ("br-*", 35), ("kr-*", 36),
    ("rb-*", 37), ("sr-*", 38), ("y-*", 39), ("zr-*", 40), ("nb-*", 41), ("mo-*", 42),
    ("tc-*", 43), ("ru-*", 44), ("rh-*", 45), ("pd-*", 46), ("ag-*", 47), ("cd-*", 48),
    ("in-*", 49), ("sn-*", 50), ("sb-*", 51), ("te-*", 52), ("i-*", 53), ("xe-*", 54),
    ("cs-*", 55), ("ba-*", 56), ("la-*", 57), ("ce-*", 58), ("pr-*", 59), ("nd-*", 60),
    ("pm-*", 61), ("sm-*", 62), ("eu-*", 63), ("gd-*", 64), ("tb-*", 65), ("dy-*", 66),
    ("ho-*", 67), ("er-*", 68), ("tm-*", 69), ("yb-*", 70), ("lu-*", 71), ("hf-*", 72),
    ("ta-*", 73), ("w-*", 74), ("re-*", 75), ("os-*", 76), ("ir-*", 77), ("pt-*", 78),
    ("au-*", 79), ("hg-*", 80), ("tl-*", 81), ("pb-*", 82), ("bi-*", 83), ("po-*", 84),
    ("at-*", 85), ("rn-*", 86), ("fr-*", 87), ("ra-*", 88), ("ac-*", 89), ("th-*", 90),
    ("pa-*", 91), ("u-*", 92), ("be-9", 4), ("f-19", 9), ("na-23", 11), ("al-27", 13),
    ("p-31", 15), ("sc-45", 21), ("mn-55", 25), ("co-59", 27), ("as-75", 33), ("y-89", 39),
    ("nb-93", 41), ("rh-103", 45), ("i-127", 53), ("cs-133", 55), ("pr-141", 59), ("tb-159", 65),
    ("ho-165", 67), ("tm-169", 69), ("au-197", 79), ("bi-209", 83), ("h-1", 93), ("h-2", 94),
    ("h-3", 95), ("he-3", 96), ("he-4", 97), ("li-6", 98), ("li-7", 99), ("b-10", 100),
    ("b-11", 101), ("u-234", 102), ("u-235", 103), ("u-238", 104),
];

static PARTICLES: &[(&str, i64)] = &[
    ("all", ALL_PARTICLES_CODE),
    ("neutron", 1),
    ("proton", 2),
    ("pion_pi_minus", 3),
    ("pion_pi_plus", 4),
    ("pion_pi_zero", 5),
    ("anti_neutron", 6),
    ("anti_proton", 7),
    ("kaon_minus", 8),
    ("kaon_plus", 9),
    ("kaon_zero", 10),
    ("kaon_anti", 11),
    ("gamma", 12),
    ("electron", 13),
    ("positron", 14),
    ("muon_minus", 15),
    ("muon_plus", 16),
    ("e_neutrino", 17),
    ("e_anti_neutrino", 18),
    ("mi_neutrino", 19),
    ("mi_anti_neutrino", 20),
    ("deuteron", 21),
    ("triton", 22),
    ("he_3", 23),
    ("he_4", 24),
];

static SCORING: &[(&str, &str)] = &[
    ("energy", "ENERGY"),
    ("fluence", "FLUENCE"),
    ("crossflu", "CROSSFLU"),
    ("dose", "DOSE"),
    ("letflu", "LETFLU"),
    ("dlet", "DLET"),
    ("tlet", "TLET"),
    ("avg_energy", "AVG-ENERGY"),
    ("avg_beta", "AVG-BETA"),
    ("ddd", "DDD"),
    ("spc", "SPC"),
    ("alanine", "ALANINE"),
    ("counter", "COUNTER"),
];

/// Scoring quantities weighted by stopping power in a chosen material.
static LET_SCORING: &[&str] = &["letflu", "dlet", "tlet"];

static MATERIAL_INDEX: Lazy<HashMap<&'static str, i64>> =
    Lazy::new(|| PREDEFINED_MATERIALS.iter().copied().collect());

static ISOTOPE_INDEX: Lazy<HashMap<&'static str, i64>> =
    Lazy::new(|| ISOTOPES.iter().copied().collect());

static PARTICLE_INDEX: Lazy<HashMap<&'static str, i64>> =
    Lazy::new(|| PARTICLES.iter().copied().collect());

static SCORING_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SCORING.iter().copied().collect());

/// ICRU number of a predefined material name.
pub fn predefined_material_icru(name: &str) -> Option<i64> {
    MATERIAL_INDEX.get(name).copied()
}

/// NUCLID code of an isotope name.
pub fn isotope_nuclid(name: &str) -> Option<i64> {
    ISOTOPE_INDEX.get(name).copied()
}

/// Engine particle code. Heavy ions always share [`HEAVY_ION_CODE`].
pub fn particle_code(particle: &Particle) -> Option<i64> {
    match particle {
        Particle::All => Some(ALL_PARTICLES_CODE),
        Particle::HeavyIon(HeavyIon { .. }) => Some(HEAVY_ION_CODE),
        Particle::Predefined(name) => PARTICLE_INDEX.get(name.as_str()).copied(),
    }
}

/// Name a particle the way diagnostics quote it.
pub fn particle_name(particle: &Particle) -> String {
    match particle {
        Particle::All => "all".to_string(),
        Particle::Predefined(name) => name.clone(),
        Particle::HeavyIon(_) => "heavy_ion".to_string(),
    }
}

/// Card name of a scoring quantity.
pub fn scoring_card(kind: &str) -> Option<&'static str> {
    SCORING_INDEX.get(kind).copied()
}

pub fn is_let_scoring(kind: &str) -> bool {
    LET_SCORING.contains(&kind)
}

/// STATE code; `None` for a state that is not emitted.
pub fn state_code(state: StateOfMatter) -> Option<i64> {
    match state {
        StateOfMatter::Solid => Some(0),
        StateOfMatter::Liquid => Some(1),
        StateOfMatter::Gas => Some(2),
        StateOfMatter::NonDefined => None,
    }
}

/// Supported predefined material names in ICRU order.
pub fn predefined_materials() -> impl Iterator<Item = (&'static str, i64)> {
    PREDEFINED_MATERIALS.iter().copied()
}

pub fn isotopes() -> impl Iterator<Item = (&'static str, i64)> {
    ISOTOPES.iter().copied()
}

pub fn particles() -> impl Iterator<Item = (&'static str, i64)> {
    PARTICLES.iter().copied()
}

pub fn scoring_quantities() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCORING.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_table() {
        assert_eq!(predefined_material_icru("vacuum"), Some(1000));
        assert_eq!(predefined_material_icru("hydrogen"), Some(1));
        assert_eq!(predefined_material_icru("californium"), Some(98));
        assert_eq!(predefined_material_icru("a-150_tissue_equivalent_plastic"), Some(99));
        assert_eq!(predefined_material_icru("methanol"), Some(198));
        assert_eq!(predefined_material_icru("water_liquid"), Some(276));
        assert_eq!(predefined_material_icru("water_vapor"), Some(277));
        assert_eq!(predefined_material_icru("xylene"), Some(278));
        assert_eq!(predefined_material_icru("unobtainium"), None);
    }

    #[test]
    fn material_names_are_unique() {
        assert_eq!(MATERIAL_INDEX.len(), PREDEFINED_MATERIALS.len());
        assert_eq!(ISOTOPE_INDEX.len(), ISOTOPES.len());
    }

    #[test]
    fn isotope_table() {
        assert_eq!(isotope_nuclid("h-*"), Some(1));
        assert_eq!(isotope_nuclid("c-*"), Some(6));
        assert_eq!(isotope_nuclid("si-*"), Some(14));
        assert_eq!(isotope_nuclid("gd-*"), Some(64));
        assert_eq!(isotope_nuclid("u-*"), Some(92));
        assert_eq!(isotope_nuclid("na-23"), Some(11));
        assert_eq!(isotope_nuclid("h-2"), Some(94));
        assert_eq!(isotope_nuclid("u-235"), Some(103));
        assert_eq!(isotope_nuclid("xx-1"), None);
    }

    #[test]
    fn particle_codes() {
        assert_eq!(particle_code(&Particle::All), Some(-1));
        assert_eq!(particle_code(&Particle::named("proton")), Some(2));
        assert_eq!(particle_code(&Particle::named("he_4")), Some(24));
        assert_eq!(
            particle_code(&Particle::HeavyIon(HeavyIon {
                charge: 6,
                nucleons_count: 12
            })),
            Some(25)
        );
        assert_eq!(particle_code(&Particle::named("graviton")), None);
    }

    #[test]
    fn scoring_cards() {
        assert_eq!(scoring_card("avg_energy"), Some("AVG-ENERGY"));
        assert_eq!(scoring_card("dose"), Some("DOSE"));
        assert_eq!(scoring_card("kerma"), None);
        assert!(is_let_scoring("tlet"));
        assert!(!is_let_scoring("dose"));
    }

    #[test]
    fn state_codes() {
        assert_eq!(state_code(StateOfMatter::Liquid), Some(1));
        assert_eq!(state_code(StateOfMatter::NonDefined), None);
    }
}
