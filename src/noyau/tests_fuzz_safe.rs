//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - chaque formule générée est ENTIÈREMENT parenthésée : on calcule sa valeur
//!   pendant la génération, dans le même ordre d’opérations => égalité exacte attendue
//! - mutations : retirer une parenthèse doit donner ParenthesesDesequilibrees

use std::time::{Duration, Instant};

use super::erreur::ErreurFormule;
use super::eval::Evaluateur;
use super::expr::Operateur;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (texte + valeur attendue) ------------------------ */

const VARIABLES: [(&str, f64); 3] = [("a", 2.5), ("abc", 5.75), ("n", -3.0)];

fn evaluateur_fuzz() -> Evaluateur {
    let mut ev = Evaluateur::new();
    for (nom, v) in VARIABLES {
        ev.enregistrer_variable(nom, v);
    }
    ev
}

/// Littéral exactement représentable (entier ou demi), signe parfois collé.
fn gen_nombre(rng: &mut Rng) -> (String, f64) {
    let entier = rng.pick(10) as i32 - 4;
    let demi = rng.coin();
    let v = if demi {
        entier as f64 + 0.5
    } else {
        entier as f64
    };

    let texte = if v >= 0.0 && rng.coin() {
        format!("+{v}")
    } else {
        format!("{v}")
    };
    (texte, v)
}

fn gen_atome(rng: &mut Rng) -> (String, f64) {
    match rng.pick(6) {
        0 => {
            let (nom, v) = VARIABLES[rng.pick(VARIABLES.len() as u32) as usize];
            (format!("${nom}"), v)
        }
        1 => ("$absente".to_string(), 0.0),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> (String, f64) {
    if depth == 0 || rng.pick(5) == 0 {
        return gen_atome(rng);
    }

    let (ga, va) = gen_expr(rng, depth - 1);

    // exposant : petit entier littéral (valeurs bornées)
    if rng.pick(6) == 0 {
        let k = rng.pick(4);
        let v = Operateur::Puissance.appliquer(va, k as f64);
        return (format!("({ga} ^ {k})"), v);
    }

    let (gb, vb) = gen_expr(rng, depth - 1);
    let op = match rng.pick(4) {
        0 => Operateur::Plus,
        1 => Operateur::Moins,
        2 => Operateur::Fois,
        _ => Operateur::Divise,
    };
    let v = op.appliquer(va, vb);
    (format!("({ga} {} {gb})", op.symbole()), v)
}

fn assert_meme_valeur(formule: &str, obtenu: f64, attendu: f64) {
    if attendu.is_nan() {
        assert!(obtenu.is_nan(), "formule={formule:?} obtenu={obtenu}");
    } else {
        assert_eq!(obtenu, attendu, "formule={formule:?}");
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_valeur_attendue_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let ev = evaluateur_fuzz();
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus = 0usize;
    for _ in 0..200 {
        budget(t0, max);

        let (formule, attendu) = gen_expr(&mut rng, 6);
        let obtenu = ev
            .evaluer(&formule)
            .unwrap_or_else(|e| panic!("erreur non attendue: formule={formule:?} err={e}"));
        assert_meme_valeur(&formule, obtenu, attendu);

        // même formule, même registre => même bits
        let encore = ev.evaluer(&formule).unwrap_or_else(|e| panic!("err: {e}"));
        assert_eq!(obtenu.to_bits(), encore.to_bits(), "formule={formule:?}");
        vus += 1;
    }

    assert_eq!(vus, 200);
}

#[test]
fn fuzz_safe_espaces_insignifiants() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let ev = evaluateur_fuzz();
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..80 {
        budget(t0, max);

        let (formule, attendu) = gen_expr(&mut rng, 4);
        // espaces multipliés + tabulations : aucune influence
        let aere = formule.replace(' ', " \t  ").replace('(', "( ");
        let obtenu = ev
            .evaluer(&aere)
            .unwrap_or_else(|e| panic!("formule={aere:?} err={e}"));
        assert_meme_valeur(&aere, obtenu, attendu);
    }
}

#[test]
fn fuzz_safe_mutation_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let ev = evaluateur_fuzz();
    let mut rng = Rng::new(0x5EED_u64);

    let mut mutees = 0usize;
    for _ in 0..120 {
        budget(t0, max);

        let (formule, _) = gen_expr(&mut rng, 5);
        let cible = if rng.coin() { '(' } else { ')' };
        let positions: Vec<usize> = formule
            .char_indices()
            .filter(|&(_, c)| c == cible)
            .map(|(i, _)| i)
            .collect();
        if positions.is_empty() {
            continue;
        }

        let i = positions[rng.pick(positions.len() as u32) as usize];
        let mut mutee = formule.clone();
        mutee.remove(i);

        assert_eq!(
            ev.evaluer(&mutee),
            Err(ErreurFormule::ParenthesesDesequilibrees),
            "formule={mutee:?}"
        );
        mutees += 1;
    }

    assert!(mutees > 20, "trop peu de mutations: {mutees}");
}
