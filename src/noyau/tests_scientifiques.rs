//! Tests scientifiques (campagne) : propriétés de la grammaire + formules de référence.
//!
//! - précédence / associativité / parenthèses
//! - signe collé au nombre (pas de moins unaire)
//! - variables ($nom), défaut 0
//! - erreurs (parenthèses, pile vide, jeton malformé)
//! - IEEE-754 conservé (pas d’erreur sur division par zéro)
//! - idempotence (aucun état caché hors registre)

use std::time::{Duration, Instant};

use approx::assert_relative_eq;

use super::eval::Evaluateur;
use super::erreur::ErreurFormule;

fn evaluateur_reference() -> Evaluateur {
    let mut ev = Evaluateur::new();
    ev.enregistrer_variable("a", 2.5);
    ev.enregistrer_variable("abc", 5.75);
    ev
}

fn eval_ok(ev: &Evaluateur, formule: &str) -> f64 {
    ev.evaluer(formule)
        .unwrap_or_else(|e| panic!("formule={formule:?} err={e}"))
}

fn assert_vaut(formule: &str, attendu: f64) {
    let v = eval_ok(&evaluateur_reference(), formule);
    assert_eq!(v, attendu, "formule={formule:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Grammaire ------------------------ */

#[test]
fn sci_associativite() {
    assert_vaut("8 - 4 - 2", 2.0);
    assert_vaut("16 / 4 / 2", 2.0);
    assert_vaut("2^3^2", 512.0);
    assert_vaut("(2^3)^2", 64.0);
}

#[test]
fn sci_precedence() {
    assert_vaut("2 + 3 * 4", 14.0);
    assert_vaut("(2 + 3) * 4", 20.0);
    assert_vaut("2 * 3 ^ 2", 18.0);
    assert_vaut("1 + 2 * ((3 + 4) * 5 + 6)", 83.0);
}

#[test]
fn sci_signe_colle() {
    assert_vaut("+2 - -4", 6.0);
    assert_vaut("-2.5 - +4.5", -7.0);
    assert_vaut("2 + -4", -2.0);
    assert_vaut("(-3/2 + 3) * 4", 6.0);
}

/* ------------------------ Formules de référence ------------------------ */

#[test]
fn sci_formules_de_reference() {
    assert_vaut("(1 + 2) * (3 + 4) * (5 + 6)", 231.0);
    assert_vaut("(3/2 + 3) * 4", 18.0);
    assert_vaut("(1 + 2) * (3 - 4) * (5 + 6)", -33.0);
    assert_vaut("($a + 4) * 4", 26.0);
    assert_vaut("($abc + $a) * 4", 33.0);

    let ev = evaluateur_reference();
    assert_relative_eq!(
        eval_ok(&ev, "((1.25 + 2.35) / (3.45 + 4.5) / (5 + 6.75)) * (7.5 * 8.5^9.5)"),
        195181460.39783,
        max_relative = 1e-12
    );
    assert_relative_eq!(eval_ok(&ev, "$abc^$a"), 79.281089869763, max_relative = 1e-12);
}

/* ------------------------ Variables ------------------------ */

#[test]
fn sci_variable_inconnue_vaut_zero() {
    let ev = Evaluateur::new();
    assert_eq!(eval_ok(&ev, "$inconnue"), 0.0);
    assert_eq!(eval_ok(&ev, "($inconnue + 4) * 4"), 16.0);
    // la lecture n’a rien ajouté au registre
    assert!(ev.registre().est_vide());
}

#[test]
fn sci_registre_persiste_entre_evaluations() {
    let mut ev = Evaluateur::new();
    ev.enregistrer_variable("x", 1.0);
    assert_eq!(eval_ok(&ev, "$x * 10"), 10.0);

    ev.enregistrer_variable("x", 4.0);
    assert_eq!(eval_ok(&ev, "$x * 10"), 40.0);

    ev.registre_mut().retirer("x");
    assert_eq!(eval_ok(&ev, "$x * 10"), 0.0);
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_parentheses_desequilibrees() {
    let ev = Evaluateur::new();
    assert_eq!(ev.evaluer("(2 + 3"), Err(ErreurFormule::ParenthesesDesequilibrees));
    assert_eq!(ev.evaluer("2 + 3)"), Err(ErreurFormule::ParenthesesDesequilibrees));
}

#[test]
fn sci_jeton_malforme() {
    let ev = Evaluateur::new();
    assert_eq!(
        ev.evaluer("2 + abc"),
        Err(ErreurFormule::JetonMalforme("abc".into()))
    );
    assert_eq!(
        ev.evaluer("sin(1)"),
        Err(ErreurFormule::JetonMalforme("sin".into()))
    );
    assert_eq!(ev.evaluer("2 < 3"), Err(ErreurFormule::JetonMalforme("<".into())));
}

#[test]
fn sci_ieee754_conserve() {
    let ev = Evaluateur::new();
    assert_eq!(eval_ok(&ev, "1 / 0"), f64::INFINITY);
    assert_eq!(eval_ok(&ev, "-1 / 0"), f64::NEG_INFINITY);
    assert!(eval_ok(&ev, "0 / 0").is_nan());
    assert!(eval_ok(&ev, "-8 ^ 0.5").is_nan());
    // ∞ se propage
    assert_eq!(eval_ok(&ev, "1 / 0 + 1"), f64::INFINITY);
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    let ev = evaluateur_reference();
    for f in ["1 + 2 * ((3 + 4) * 5 + 6)", "$abc^$a", "2^3^2", "1 / 3"] {
        let premier = eval_ok(&ev, f);
        for _ in 0..5 {
            assert_eq!(eval_ok(&ev, f).to_bits(), premier.to_bits(), "formule={f:?}");
        }
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 300 niveaux de parenthèses : ne coûte rien à la résolution (pas d’opérateur)
    let n = 300;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    budget(t0, max);
    assert_eq!(eval_ok(&Evaluateur::new(), &expr), 1.0);
    budget(t0, max);
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // somme à gauche : nombre de termes - 1 opérateurs en attente
    let mut expr = String::new();
    for k in 0..500 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.5");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&Evaluateur::new(), &expr), 250.0);
}

#[test]
fn sci_stress_puissances_a_droite() {
    // 1^1^...^1 : associativité droite, 199 opérateurs en attente
    let expr = vec!["1"; 200].join("^");
    assert_eq!(eval_ok(&Evaluateur::new(), &expr), 1.0);
}
