// src/noyau/rpn.rs
//
// Shunting-yard -> pile postfixe (RPN)
//
// Deux piles :
// - sortie      : termes en ordre postfixe (Nombre / Operateur), du fond vers le sommet
// - operateurs  : opérateurs en attente + parenthèses ouvrantes (jamais de nombre)
//
// Règle de sortie pour un opérateur `op` face au sommet `top` :
// - `op` associatif à gauche  : on sort `top` tant que prec(op) <= prec(top)
// - `op` associatif à droite  : on sort `top` tant que prec(op) <  prec(top)
//
// À la fin, le SOMMET de `sortie` est le dernier terme logique (l’opérateur racine) :
// l’évaluation dépile depuis le haut.

use std::fmt;

use super::erreur::{ErreurFormule, Resultat};
use super::expr::{Associativite, Expression, Operateur, Parenthese};
use super::pile::Pile;

/// Terme d’une pile postfixe : les parenthèses n’y apparaissent jamais.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Terme {
    Nombre(f64),
    Operateur(Operateur),
}

/// Élément de la pile d’opérateurs : pas de variante nombre possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnAttente {
    Operateur(Operateur),
    Ouvrante,
}

/// Convertit une suite d’expressions (ordre infixe) en pile postfixe.
///
/// Exemple:
///   (2 + 3) * 4   =>   2 3 + 4 *   (sommet = *)
pub fn vers_postfixe(
    expressions: impl IntoIterator<Item = Expression>,
) -> Resultat<Pile<Terme>> {
    let mut sortie: Pile<Terme> = Pile::new();
    let mut operateurs: Pile<EnAttente> = Pile::new();

    for e in expressions {
        match e {
            Expression::Nombre(v) => sortie.empiler(Terme::Nombre(v)),

            Expression::Parenthese(Parenthese::Ouvrante) => operateurs.empiler(EnAttente::Ouvrante),

            Expression::Parenthese(Parenthese::Fermante) => {
                fermer_parenthese(&mut sortie, &mut operateurs)?
            }

            Expression::Operateur(op) => empiler_operateur(op, &mut sortie, &mut operateurs),
        }
    }

    // vide la pile d’opérateurs
    while let Some(top) = operateurs.depiler() {
        match top {
            EnAttente::Operateur(op) => sortie.empiler(Terme::Operateur(op)),
            EnAttente::Ouvrante => return Err(ErreurFormule::ParenthesesDesequilibrees),
        }
    }

    Ok(sortie)
}

/// Dépile jusqu’à '(' (jetée). Pile épuisée sans '(' => parenthèses déséquilibrées.
fn fermer_parenthese(sortie: &mut Pile<Terme>, operateurs: &mut Pile<EnAttente>) -> Resultat<()> {
    while let Some(top) = operateurs.depiler() {
        match top {
            EnAttente::Ouvrante => return Ok(()),
            EnAttente::Operateur(op) => sortie.empiler(Terme::Operateur(op)),
        }
    }
    Err(ErreurFormule::ParenthesesDesequilibrees)
}

fn empiler_operateur(op: Operateur, sortie: &mut Pile<Terme>, operateurs: &mut Pile<EnAttente>) {
    // '(' bloque : seuls les opérateurs au-dessus comptent
    while let Some(&EnAttente::Operateur(top)) = operateurs.sommet() {
        let doit_sortir = match op.associativite() {
            Associativite::Gauche => op.precedence() <= top.precedence(),
            Associativite::Droite => op.precedence() < top.precedence(),
        };
        if !doit_sortir {
            break;
        }
        operateurs.depiler();
        sortie.empiler(Terme::Operateur(top));
    }

    operateurs.empiler(EnAttente::Operateur(op));
}

/// Format utilitaire (démarche) : pile postfixe du fond vers le sommet.
pub fn format_postfixe(pile: &Pile<Terme>) -> String {
    pile.iter()
        .map(Terme::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Terme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terme::Nombre(v) => write!(f, "{v}"),
            Terme::Operateur(op) => write!(f, "{op}"),
        }
    }
}
