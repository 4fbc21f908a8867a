// src/noyau/expr.rs
//
// Expressions terminales (après découpage + substitution) :
// - Nombre     : littéral flottant
// - Operateur  : + - * / ^ (binaire, précédence + associativité fixes)
// - Parenthese : ouvrante / fermante (consommée par le parseur, jamais en postfixe)
//
// Précédence et fonction binaire vivent dans une table statique par symbole.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::erreur::{ErreurFormule, Resultat};
use super::variables::Fragment;

lazy_static! {
    // Même motif que le découpage, mais ancré : "inf", "NaN", "1e5" sont refusés.
    static ref MOTIF_NOMBRE: Regex = Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("motif nombre");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

/// (symbole, opérateur, précédence, associativité)
static TABLE_OPERATEURS: [(char, Operateur, u8, Associativite); 5] = [
    ('+', Operateur::Plus, 4, Associativite::Gauche),
    ('-', Operateur::Moins, 4, Associativite::Gauche),
    ('*', Operateur::Fois, 5, Associativite::Gauche),
    ('/', Operateur::Divise, 5, Associativite::Gauche),
    ('^', Operateur::Puissance, 6, Associativite::Droite),
];

impl Operateur {
    pub fn depuis_symbole(c: char) -> Option<Self> {
        TABLE_OPERATEURS
            .iter()
            .find(|(s, ..)| *s == c)
            .map(|&(_, op, ..)| op)
    }

    fn entree(self) -> &'static (char, Operateur, u8, Associativite) {
        // la table couvre toutes les variantes
        match self {
            Operateur::Plus => &TABLE_OPERATEURS[0],
            Operateur::Moins => &TABLE_OPERATEURS[1],
            Operateur::Fois => &TABLE_OPERATEURS[2],
            Operateur::Divise => &TABLE_OPERATEURS[3],
            Operateur::Puissance => &TABLE_OPERATEURS[4],
        }
    }

    pub fn symbole(self) -> char {
        self.entree().0
    }

    /// Plus grand = lie plus fort.
    pub fn precedence(self) -> u8 {
        self.entree().2
    }

    pub fn associativite(self) -> Associativite {
        self.entree().3
    }

    /// Combine deux opérandes déjà résolus. Pas de garde : IEEE-754 (1/0 = ∞, 0/0 = NaN).
    pub fn appliquer(self, gauche: f64, droite: f64) -> f64 {
        match self {
            Operateur::Plus => gauche + droite,
            Operateur::Moins => gauche - droite,
            Operateur::Fois => gauche * droite,
            Operateur::Divise => gauche / droite,
            Operateur::Puissance => gauche.powf(droite),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parenthese {
    Ouvrante,
    Fermante,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Expression {
    Nombre(f64),
    Operateur(Operateur),
    Parenthese(Parenthese),
}

/// Classe un fragment (déjà substitué) en expression.
pub fn classer(fragment: Fragment<'_>) -> Resultat<Expression> {
    let jeton = match fragment {
        Fragment::Valeur(v) => return Ok(Expression::Nombre(v)),
        Fragment::Brut(j) => j,
    };

    let mut chars = jeton.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        match c {
            '(' => return Ok(Expression::Parenthese(Parenthese::Ouvrante)),
            ')' => return Ok(Expression::Parenthese(Parenthese::Fermante)),
            _ => {
                if let Some(op) = Operateur::depuis_symbole(c) {
                    return Ok(Expression::Operateur(op));
                }
            }
        }
    }

    if MOTIF_NOMBRE.is_match(jeton) {
        if let Ok(v) = jeton.parse::<f64>() {
            return Ok(Expression::Nombre(v));
        }
    }

    Err(ErreurFormule::JetonMalforme(jeton.to_string()))
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Nombre(v) => write!(f, "{v}"),
            Expression::Operateur(op) => write!(f, "{op}"),
            Expression::Parenthese(Parenthese::Ouvrante) => write!(f, "("),
            Expression::Parenthese(Parenthese::Fermante) => write!(f, ")"),
        }
    }
}
