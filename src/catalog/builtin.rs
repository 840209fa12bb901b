//! Bright stars shipped with the binary. ICRS positions at J2000.

/// hip, name, ra_deg, dec_deg, pm_ra_mas_yr (incl. cos dec), pm_dec_mas_yr
pub const BRIGHT_STARS: [(u32, &str, f64, f64, f64, f64); 8] = [
    (32349, "Sirius", 101.28715533, -16.71611586, -546.01, -1223.07),
    (30438, "Canopus", 95.98795783, -52.69566138, 19.93, 23.24),
    (69673, "Arcturus", 213.91530029, 19.18240916, -1093.39, -2000.06),
    (91262, "Vega", 279.23473479, 38.78368896, 200.94, 286.23),
    (24608, "Capella", 79.17232794, 45.99799147, 75.25, -426.89),
    (24436, "Rigel", 78.63446707, -8.20163837, 1.31, 0.50),
    (27989, "Betelgeuse", 88.79293899, 7.40706399, 27.54, 11.30),
    (11767, "Polaris", 37.95456067, 89.26410897, 44.48, -11.85),
];
