// src/noyau/lecture.rs
//
// ΣLocal : lecture décimale TRONQUÉE de la valeur binaire exacte d’un f64.
// Un f64 fini est un rationnel exact (m·2^e) : on le convertit sans perte,
// puis on tronque à `digits` décimales. Aucun calcul en précision étendue :
// on montre seulement ce que contient vraiment le double (ex: 0.1 -> 0.1000000000000000055…).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize, neg: bool) -> String {
    if scaled.is_negative() {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> entier “scalé” = trunc(r * 10^digits) (troncature vers zéro)
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/* ------------------------ ΣLocal ------------------------ */

/// Lecture tronquée à `digits` décimales. None si NaN / ±∞ (rien à lire).
pub fn lecture_tronquee(valeur: f64, digits: usize) -> Option<String> {
    // from_float : None pour NaN / ∞
    let r = BigRational::from_float(valeur)?;
    let scaled = rational_scaled(&r, digits);

    // le signe se perd si la troncature donne 0 (ex: -0.001 à 2 décimales) : on le garde
    let neg = r.is_negative();
    Some(scaled_to_decimal(scaled, digits, neg))
}
