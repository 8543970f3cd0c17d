//! Element symbols, standard atomic weights and isotope masses.
//!
//! Weights are in unified atomic mass units. Elements with no stable isotope
//! carry the mass number of their longest-lived isotope.

/// One entry of the periodic table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Element {
    /// Element symbol (`"Cl"`).
    pub symbol: &'static str,
    /// Atomic number Z.
    pub number: u32,
    /// Standard atomic weight.
    pub weight: f64,
}

const fn el(symbol: &'static str, number: u32, weight: f64) -> Element {
    Element {
        symbol,
        number,
        weight,
    }
}

/// Mass of the electron in u.
pub const ELECTRON_MASS: f64 = 5.485_799_090_65e-4;

#[rustfmt::skip]
const ELEMENTS: &[Element] = &[
    // Period 1
    el("H", 1, 1.008), el("He", 2, 4.002_602),
    // Deuterium is written as its own symbol in many datasets.
    el("D", 1, 2.014_101_778),
    // Period 2
    el("Li", 3, 6.94), el("Be", 4, 9.012_183_1), el("B", 5, 10.81), el("C", 6, 12.011),
    el("N", 7, 14.007), el("O", 8, 15.999), el("F", 9, 18.998_403_163), el("Ne", 10, 20.1797),
    // Period 3
    el("Na", 11, 22.989_769_28), el("Mg", 12, 24.305), el("Al", 13, 26.981_538_5),
    el("Si", 14, 28.085), el("P", 15, 30.973_761_998), el("S", 16, 32.06), el("Cl", 17, 35.45),
    el("Ar", 18, 39.948),
    // Period 4
    el("K", 19, 39.0983), el("Ca", 20, 40.078), el("Sc", 21, 44.955_908), el("Ti", 22, 47.867),
    el("V", 23, 50.9415), el("Cr", 24, 51.9961), el("Mn", 25, 54.938_044), el("Fe", 26, 55.845),
    el("Co", 27, 58.933_194), el("Ni", 28, 58.6934), el("Cu", 29, 63.546), el("Zn", 30, 65.38),
    el("Ga", 31, 69.723), el("Ge", 32, 72.630), el("As", 33, 74.921_595), el("Se", 34, 78.971),
    el("Br", 35, 79.904), el("Kr", 36, 83.798),
    // Period 5
    el("Rb", 37, 85.4678), el("Sr", 38, 87.62), el("Y", 39, 88.905_84), el("Zr", 40, 91.224),
    el("Nb", 41, 92.906_37), el("Mo", 42, 95.95), el("Tc", 43, 98.0), el("Ru", 44, 101.07),
    el("Rh", 45, 102.905_50), el("Pd", 46, 106.42), el("Ag", 47, 107.8682), el("Cd", 48, 112.414),
    el("In", 49, 114.818), el("Sn", 50, 118.710), el("Sb", 51, 121.760), el("Te", 52, 127.60),
    el("I", 53, 126.904_47), el("Xe", 54, 131.293),
    // Period 6
    el("Cs", 55, 132.905_451_96), el("Ba", 56, 137.327), el("La", 57, 138.905_47),
    el("Ce", 58, 140.116), el("Pr", 59, 140.907_66), el("Nd", 60, 144.242), el("Pm", 61, 145.0),
    el("Sm", 62, 150.36), el("Eu", 63, 151.964), el("Gd", 64, 157.25), el("Tb", 65, 158.925_35),
    el("Dy", 66, 162.500), el("Ho", 67, 164.930_33), el("Er", 68, 167.259), el("Tm", 69, 168.934_22),
    el("Yb", 70, 173.045), el("Lu", 71, 174.9668), el("Hf", 72, 178.49), el("Ta", 73, 180.947_88),
    el("W", 74, 183.84), el("Re", 75, 186.207), el("Os", 76, 190.23), el("Ir", 77, 192.217),
    el("Pt", 78, 195.084), el("Au", 79, 196.966_569), el("Hg", 80, 200.592), el("Tl", 81, 204.38),
    el("Pb", 82, 207.2), el("Bi", 83, 208.980_40), el("Po", 84, 209.0), el("At", 85, 210.0),
    el("Rn", 86, 222.0),
    // Period 7
    el("Fr", 87, 223.0), el("Ra", 88, 226.0), el("Ac", 89, 227.0), el("Th", 90, 232.0377),
    el("Pa", 91, 231.035_88), el("U", 92, 238.028_91), el("Np", 93, 237.0), el("Pu", 94, 244.0),
    el("Am", 95, 243.0), el("Cm", 96, 247.0), el("Bk", 97, 247.0), el("Cf", 98, 251.0),
    el("Es", 99, 252.0), el("Fm", 100, 257.0), el("Md", 101, 258.0), el("No", 102, 259.0),
    el("Lr", 103, 266.0), el("Rf", 104, 267.0), el("Db", 105, 268.0), el("Sg", 106, 269.0),
    el("Bh", 107, 270.0), el("Hs", 108, 269.0), el("Mt", 109, 278.0), el("Ds", 110, 281.0),
    el("Rg", 111, 282.0), el("Cn", 112, 285.0), el("Nh", 113, 286.0), el("Fl", 114, 289.0),
    el("Mc", 115, 290.0), el("Lv", 116, 293.0), el("Ts", 117, 294.0), el("Og", 118, 294.0),
];

/// `(symbol, mass number, atomic mass)` for the isotopes the catalog uses.
#[rustfmt::skip]
const ISOTOPES: &[(&str, u32, f64)] = &[
    ("H", 1, 1.007_825_032_07), ("H", 2, 2.014_101_777_8), ("H", 3, 3.016_049_277_7),
    ("He", 3, 3.016_029_319_1), ("He", 4, 4.002_603_254_15),
    ("Li", 6, 6.015_122_795), ("Li", 7, 7.016_004_55),
    ("Be", 9, 9.012_182_2),
    ("B", 10, 10.012_937_0), ("B", 11, 11.009_305_4),
    ("C", 12, 12.0), ("C", 13, 13.003_354_837_8), ("C", 14, 14.003_241_989),
    ("N", 14, 14.003_074_004_8), ("N", 15, 15.000_108_898_2),
    ("O", 16, 15.994_914_619_56), ("O", 17, 16.999_131_70), ("O", 18, 17.999_161_0),
    ("F", 19, 18.998_403_22),
    ("Ne", 20, 19.992_440_175_4), ("Ne", 22, 21.991_385_114),
    ("Na", 23, 22.989_769_280_9),
    ("Mg", 24, 23.985_041_700), ("Mg", 25, 24.985_836_92), ("Mg", 26, 25.982_592_929),
    ("Al", 27, 26.981_538_63),
    ("Si", 28, 27.976_926_532_5), ("Si", 29, 28.976_494_700), ("Si", 30, 29.973_770_17),
    ("P", 31, 30.973_761_63),
    ("S", 32, 31.972_071_00), ("S", 33, 32.971_458_76), ("S", 34, 33.967_866_90),
    ("Cl", 35, 34.968_852_68), ("Cl", 37, 36.965_902_59),
    ("Ar", 36, 35.967_545_106), ("Ar", 40, 39.962_383_122_5),
    ("K", 39, 38.963_706_68), ("K", 41, 40.961_825_76),
    ("Ca", 40, 39.962_590_98),
    ("Ti", 48, 47.947_946_3),
    ("Fe", 54, 53.939_610_5), ("Fe", 56, 55.934_937_5),
    ("Ni", 58, 57.935_342_9),
    ("Cu", 63, 62.929_597_5), ("Cu", 65, 64.927_789_5),
    ("Zn", 64, 63.929_142_2),
    ("Br", 79, 78.918_337_1), ("Br", 81, 80.916_290_6),
    ("Kr", 84, 83.911_507),
    ("I", 127, 126.904_473),
    ("Xe", 129, 128.904_779_4), ("Xe", 132, 131.904_153_5),
    ("Cs", 133, 132.905_451_933),
    ("Hg", 202, 201.970_643),
    ("Pb", 208, 207.976_652_1),
];

/// Looks up an element by symbol.
#[must_use]
pub fn element(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Returns true if `symbol` names an element.
#[must_use]
pub fn is_element(symbol: &str) -> bool {
    element(symbol).is_some()
}

/// Returns the atomic mass of the isotope `mass_number`-`symbol`, if tabulated.
#[must_use]
pub fn isotope_mass(symbol: &str, mass_number: u32) -> Option<f64> {
    ISOTOPES
        .iter()
        .find(|&&(s, a, _)| s == symbol && a == mass_number)
        .map(|&(_, _, mass)| mass)
}
