// src/noyau/jetons.rs
//
// Découpage d’une formule en fragments bruts (aucun typage ici).
//
// Priorité (premier motif qui accroche, de gauche à droite) :
// 1) variable   : $nom   (nom = \w*, éventuellement vide)
// 2) nombre     : [-+]?[0-9]*\.?[0-9]+  (le signe COLLÉ fait partie du nombre)
// 3) symbole    : + - * / ^ ( )
// 4) espaces    : séparateurs, jamais émis
//
// Conséquence voulue : "2 + -4" => "2", "+", "-4" mais "2 -4" => "2", "-4".
// Il n’y a pas de moins unaire : le signe est une propriété lexicale du nombre.
//
// Tout texte qui ne correspond à aucun motif est émis tel quel (ex: "abc"),
// la classification décidera (jeton malformé).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MOTIF_JETON: Regex =
        Regex::new(r"\$\w*|[-+]?[0-9]*\.?[0-9]+|[-+*/^()]|\s+").expect("motif jeton");
}

/// Itérateur paresseux sur les fragments d’une formule.
/// `Clone` = redémarrable : une copie repart de la même position.
#[derive(Clone, Debug)]
pub struct Jetons<'a> {
    formule: &'a str,
    pos: usize,
}

impl<'a> Jetons<'a> {
    pub fn new(formule: &'a str) -> Self {
        Self { formule, pos: 0 }
    }
}

impl<'a> Iterator for Jetons<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let formule = self.formule;
            let reste = &formule[self.pos..];
            if reste.is_empty() {
                return None;
            }

            match MOTIF_JETON.find(reste) {
                // un motif commence ici
                Some(m) if m.start() == 0 => {
                    self.pos += m.end();
                    let frag = m.as_str();
                    if frag.starts_with(char::is_whitespace) {
                        continue;
                    }
                    return Some(frag);
                }
                // texte libre avant le prochain motif
                Some(m) => {
                    self.pos += m.start();
                    return Some(&reste[..m.start()]);
                }
                None => {
                    self.pos = self.formule.len();
                    return Some(reste);
                }
            }
        }
    }
}

/// Format utilitaire (démarche) : liste de fragments en texte.
pub fn format_jetons<'a>(jetons: impl IntoIterator<Item = &'a str>) -> String {
    jetons.into_iter().collect::<Vec<_>>().join(" ")
}
